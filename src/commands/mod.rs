//! Command-line interface.
//!
//! One module per subcommand. Each exposes an `Args` struct parsed by clap and
//! a `cmd` entry point; database work inside the commands runs on the
//! blocking pool through [`crate::libs::worker`].

pub mod car;
pub mod catalog;
pub mod init;
pub mod login;
pub mod logout;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod notify;
pub mod refuel;
pub mod register;
pub mod service;
pub mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Create an account and log in")]
    Register(register::RegisterArgs),
    #[command(about = "Log in")]
    Login(login::LoginArgs),
    #[command(about = "Log out and forget the session")]
    Logout,
    #[command(about = "Manage your cars", arg_required_else_help = true)]
    Car(car::CarArgs),
    #[command(about = "Brands, models, fuels, gas stations and service types", arg_required_else_help = true)]
    Catalog(catalog::CatalogArgs),
    #[command(about = "Record refuelings and show their history", arg_required_else_help = true)]
    Refuel(refuel::RefuelArgs),
    #[command(about = "Record maintenance, show history and forecasts", arg_required_else_help = true)]
    Service(service::ServiceArgs),
    #[command(about = "Show maintenance notifications")]
    Notify(notify::NotifyArgs),
    #[command(about = "Show expense statistics")]
    Stats(stats::StatsArgs),
    #[cfg(debug_assertions)]
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Register(args) => register::cmd(args).await,
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout => logout::cmd(),
            Commands::Car(args) => car::cmd(args).await,
            Commands::Catalog(args) => catalog::cmd(args).await,
            Commands::Refuel(args) => refuel::cmd(args).await,
            Commands::Service(args) => service::cmd(args).await,
            Commands::Notify(args) => notify::cmd(args).await,
            Commands::Stats(args) => stats::cmd(args).await,
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args).await,
        }
    }
}
