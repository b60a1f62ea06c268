#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod handlers;

use crate::args::{AppCommands, Cli};
use crate::handlers::{navigation, period, session, slots};

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        AppCommands::Slots { action } => slots::run(action)?,
        AppCommands::Period { start, end } => period::describe(&start, end.as_deref())?,
        AppCommands::Window { kind, today } => period::window(config, kind, today.as_deref())?,
        AppCommands::Guard { path, state } => navigation::guard(&path, state.into()),
        AppCommands::Routes {} => navigation::routes(),
        AppCommands::Session { action } => session::run(config, action).await?,
        AppCommands::SendCode { phone, register } => {
            session::send_code(config, &phone, register).await?;
        },
        AppCommands::Login { phone, code } => session::login(config, &phone, &code).await?,
    }

    Ok(())
}
