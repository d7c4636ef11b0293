//! Credential management commands.

use docgen::Session;

use crate::cli::AuthAction;
use crate::context::CommandContext;
use crate::error::Result;

pub fn run(action: AuthAction, ctx: &CommandContext) -> Result<()> {
    match action {
        AuthAction::Login { token } => login(&token, ctx),
        AuthAction::Show => show(ctx),
        AuthAction::Logout => logout(ctx),
    }
}

fn login(token: &str, ctx: &CommandContext) -> Result<()> {
    let store = ctx.store();
    store.save(&Session::new(token))?;
    println!("Credential saved to: {}", store.path().display());
    Ok(())
}

fn show(ctx: &CommandContext) -> Result<()> {
    let store = ctx.store();
    match store.load()? {
        Some(session) => {
            println!("Credential file: {}", store.path().display());
            println!("Token: {}", mask(session.token()));
        }
        None => {
            println!("No credential stored.");
            println!("Run `docgen auth login <token>` to authenticate.");
        }
    }
    Ok(())
}

fn logout(ctx: &CommandContext) -> Result<()> {
    if ctx.store().clear()? {
        println!("Credential removed.");
    } else {
        println!("No credential to remove.");
    }
    Ok(())
}

fn mask(token: &str) -> String {
    // Counted in chars, not bytes; tokens are opaque and may be non-ASCII.
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}
