//! Account and session commands.

use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::DefaultEditor;
use shiori_application::AppContext;

fn prompt(label: &str, provided: Option<String>) -> Result<String> {
    match provided {
        Some(value) => Ok(value),
        None => {
            let mut editor = DefaultEditor::new()?;
            Ok(editor.readline(&format!("{}: ", label))?.trim().to_string())
        }
    }
}

/// Logs in and stores the access token; the next commands run authenticated.
pub async fn login(context: &AppContext, username: Option<String>) -> Result<()> {
    let username = prompt("Username", username)?;
    let password = prompt("Password", None)?;

    context
        .auth
        .login(&username, &password)
        .await
        .context("Login failed: check your username and password")?;

    println!("{}", "Logged in.".bright_green());
    Ok(())
}

/// Creates a new account. Log in separately afterwards.
pub async fn register(context: &AppContext, username: Option<String>) -> Result<()> {
    let username = prompt("Username", username)?;
    let password = prompt("Password", None)?;

    context
        .auth
        .register(&username, &password)
        .await
        .context("Registration failed")?;

    println!(
        "{}",
        "Account created. Run `shiori login` to sign in.".bright_green()
    );
    Ok(())
}

/// Clears the stored token. Local only, the server is not called.
pub async fn logout(context: &AppContext) -> Result<()> {
    context.auth.logout().await.context("Logout failed")?;
    println!("{}", "Logged out.".bright_green());
    Ok(())
}

/// Shows the current login state, derived from token presence alone.
pub fn status(context: &AppContext) {
    if context.session.is_logged_in() {
        println!("{}", "Logged in.".bright_green());
    } else {
        println!(
            "{}",
            "Logged out. Run `shiori login` or `shiori register`.".yellow()
        );
    }
}
