use crate::args::SessionAction;
use anyhow::{Context, Result};
use resbook::domain::config::ClientConfig;
use resbook::identity::{CodePurpose, LoginRequest};
use resbook::kernel::config::load_config;
use resbook::logger::Logger;
use resbook::{Client, init_logging};
use std::path::Path;
use tracing::debug;

/// Loads the config, installs logging when an output is enabled, and bootstraps the client.
async fn connect(path: Option<&Path>) -> Result<(Client, Option<Logger>)> {
    let config: ClientConfig = load_config(path).context("Loading client config")?;
    let logger = if config.logging.console || config.logging.dir.is_some() {
        Some(init_logging(&config.logging, env!("CARGO_PKG_NAME"))?)
    } else {
        None
    };

    let client = Client::bootstrap(config).await?;
    debug!(dir = %client.config().storage.dir.display(), "Session store opened");
    Ok((client, logger))
}

fn print_status(client: &Client) {
    let session = client.session().snapshot();
    println!("state: {}", client.session().auth_state());
    if let Some(profile) = &session.profile {
        println!("name: {}", profile.name.as_deref().unwrap_or("-"));
        println!("phone: {}", profile.phone.as_deref().unwrap_or("-"));
        if let Some(status) = profile.audit_status {
            println!("audit: {}", status.label());
        }
    }
}

pub(crate) async fn run(path: Option<&Path>, action: SessionAction) -> Result<()> {
    let (client, _logger) = connect(path).await?;
    match action {
        SessionAction::Status {} => print_status(&client),
        SessionAction::Refresh {} => {
            client.auth().refresh_profile().await?;
            print_status(&client);
        },
        SessionAction::Logout {} => {
            client.auth().logout().await?;
            println!("state: {}", client.session().auth_state());
        },
    }
    Ok(())
}

pub(crate) async fn send_code(path: Option<&Path>, phone: &str, register: bool) -> Result<()> {
    let (client, _logger) = connect(path).await?;
    let purpose = if register { CodePurpose::Register } else { CodePurpose::Login };
    client.auth().send_code(phone, purpose).await?;
    println!("code sent to {phone}");
    Ok(())
}

pub(crate) async fn login(path: Option<&Path>, phone: &str, code: &str) -> Result<()> {
    let (client, _logger) = connect(path).await?;
    client.auth().login(&LoginRequest::new(phone, code)).await?;
    print_status(&client);
    Ok(())
}
