use super::toml_config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "bistro")]
#[command(about = "Reserve a table and pre-order at the restaurant")]
pub struct Cli {
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List menu items
    Menu {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show current promotions
    Promotions,
    /// Show frequently asked questions
    Faq,
    /// Log in (or register) with a phone number
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    /// Show the member profile and bookings
    Profile,
    /// Submit a reservation described by a TOML order file
    Reserve {
        #[arg(long)]
        order: PathBuf,
    },
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum AdminCommand {
    /// List all reservations
    Reservations,
    /// Show POS revenue and visitors
    Stats,
    /// Change the status of a reservation
    SetStatus {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },
}
