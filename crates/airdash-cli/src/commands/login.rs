//! Login and subscribe command implementations.
//!
//! The API owns authentication; these commands only exchange credentials
//! for a bearer token and store it in the config file for later requests.

use airdash_core::ApiClient;
use anyhow::{Context, Result, bail};

use crate::config::{Config, update_token};

pub async fn cmd_login(
    client: &ApiClient,
    email: Option<String>,
    password: Option<String>,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let email = match email.or_else(|| config.email.clone()) {
        Some(email) => email,
        None => bail!(
            "No email specified. Pass one as an argument or set it with \
             'airdash config set email <EMAIL>'."
        ),
    };

    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt(format!("Password for {}", email))
            .interact()
            .context("Failed to read password")?,
    };

    let auth = client
        .login(&email, &password)
        .await
        .context("Login failed")?;

    update_token(&auth.token, Some(&email))?;

    if !quiet {
        eprintln!("Logged in as {}.", email);
        eprintln!("Token stored in {}", Config::path().display());
    }
    Ok(())
}

pub async fn cmd_subscribe(
    client: &ApiClient,
    email: Option<String>,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    if !client.is_authenticated() {
        bail!("Subscribing requires a login. Run 'airdash login' first.");
    }

    let email = match email.or_else(|| config.email.clone()) {
        Some(email) => email,
        None => bail!(
            "No email specified. Pass one as an argument or set it with \
             'airdash config set email <EMAIL>'."
        ),
    };

    client
        .subscribe(&email)
        .await
        .context("Subscription failed")?;

    if !quiet {
        eprintln!("Subscribed {} to threshold notifications.", email);
    }
    Ok(())
}
