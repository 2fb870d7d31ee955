//! Session CLI commands
//!
//! Registration, sign-in and sign-out against the local session provider.

use clap::Args;

use crate::error::{BudgetError, BudgetResult};
use crate::session::SessionProvider;

/// Email and password for `register` and `login`
#[derive(Args, Debug)]
pub struct Credentials {
    /// Account email
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "BUDGETIQ_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Credentials {
    fn password(&self, prompt: &str) -> BudgetResult<String> {
        match &self.password {
            Some(password) => Ok(password.clone()),
            None => rpassword::prompt_password(prompt)
                .map_err(|e| BudgetError::Io(format!("Failed to read password: {}", e))),
        }
    }
}

/// Handle `register`
pub fn handle_register(provider: &impl SessionProvider, credentials: Credentials) -> BudgetResult<()> {
    let password = credentials.password("Password: ")?;
    if credentials.password.is_none() {
        let confirm = credentials.password("Confirm password: ")?;
        if confirm != password {
            return Err(BudgetError::Validation("Passwords do not match".into()));
        }
    }

    provider.register(&credentials.email, &password)?;
    println!("Registered {}", credentials.email.trim());
    println!("Run 'budgetiq login {}' to sign in.", credentials.email.trim());
    Ok(())
}

/// Handle `login`
pub fn handle_login(provider: &impl SessionProvider, credentials: Credentials) -> BudgetResult<()> {
    let password = credentials.password("Password: ")?;
    let session = provider.sign_in(&credentials.email, &password)?;
    println!("Logged in as {}", session.email);
    Ok(())
}

/// Handle `logout`
pub fn handle_logout(provider: &impl SessionProvider) -> BudgetResult<()> {
    provider.sign_out()?;
    println!("Logged out");
    Ok(())
}

/// Handle `whoami`
pub fn handle_whoami(provider: &impl SessionProvider) -> BudgetResult<()> {
    match provider.current()? {
        Some(session) => println!(
            "{} (since {})",
            session.email,
            session.signed_in_at.format("%Y-%m-%d %H:%M")
        ),
        None => println!("Not logged in"),
    }
    Ok(())
}
