//! `larder` command-line surface: argument parsing and command wiring.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use larder_infra::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "larder")]
#[command(about = "Stock and packaging tracking for a restaurant kitchen")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults, then ./larder.toml, then this file, then LARDER__* env vars)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Decrement packaging for takeout and delivery orders
    TrackPackaging {
        /// Order export from the point-of-sale system (CSV)
        orders: PathBuf,
    },

    /// Decrement stock for every order
    TrackStock {
        /// Order export from the point-of-sale system (CSV)
        orders: PathBuf,
    },

    /// Draw one pie chart per sales category
    SalesByCategory {
        /// Item-wise sales export (CSV)
        sales: PathBuf,

        /// Output folder
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Total expenses by category and by payer
    SummarizeExpenses {
        /// Expense report (CSV)
        expenses: PathBuf,
    },
}

/// Execute one command against the loaded configuration.
pub fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    match command {
        Command::TrackPackaging { orders } => {
            let report = commands::track_packaging(config, &orders, today)?;
            println!("{report}");
            println!("Packaging Updated Successfully!");
        }
        Command::TrackStock { orders } => {
            let report = commands::track_stock(config, &orders, today)?;
            println!("{report}");
            println!("Stock Updated Successfully!");
        }
        Command::SalesByCategory { sales, output } => {
            for path in commands::sales_by_category(&sales, &output)? {
                println!("{}", path.display());
            }
        }
        Command::SummarizeExpenses { expenses } => {
            println!("{}", commands::summarize_expenses(&expenses)?);
        }
    }
    Ok(())
}
