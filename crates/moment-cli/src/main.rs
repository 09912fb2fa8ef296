use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use moment_core::{LifeExpectancy, TimeEngine};
use tracing_subscriber::EnvFilter;

use moment_cli::commands::events::{self, EventPatchArgs, NewEventArgs};
use moment_cli::commands::{life, profile, status, year};
use moment_cli::{Cli, Commands, Config, EventsAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(moment_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = moment_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    // One clock read for the whole invocation.
    let engine = TimeEngine::local();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut db, config) = open_database(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();
    match command {
        Commands::Status => {
            status::run(&mut stdout, &db, &engine, config.life_expectancy)?;
        }
        Commands::Year {
            year: target_year,
            json,
        } => {
            year::run(&mut stdout, &engine, *target_year, *json)?;
        }
        Commands::Life { expectancy, json } => {
            let expectancy = expectancy.map_or(config.life_expectancy, LifeExpectancy::new);
            life::run(&mut stdout, &db, &engine, expectancy, *json)?;
        }
        Commands::Birthdate { date } => {
            profile::set_birthdate(&mut stdout, &mut db, &engine, date)?;
        }
        Commands::Events(action) => match action {
            EventsAction::List { json } => events::list(&mut stdout, &db, &engine, *json)?,
            EventsAction::Add {
                title,
                date,
                icon,
                color,
            } => {
                let args = NewEventArgs {
                    title: title.clone(),
                    date: date.clone(),
                    icon: icon.clone(),
                    color: color.clone(),
                };
                events::add(&mut stdout, &mut db, &engine, args)?;
            }
            EventsAction::Update {
                id,
                title,
                date,
                icon,
                color,
            } => {
                let args = EventPatchArgs {
                    title: title.clone(),
                    date: date.clone(),
                    icon: icon.clone(),
                    color: color.clone(),
                };
                events::update(&mut stdout, &mut db, &engine, id, args)?;
            }
            EventsAction::Delete { id } => events::delete(&mut stdout, &mut db, id)?,
        },
        Commands::Theme { name } => {
            profile::set_theme(&mut stdout, &mut db, name)?;
        }
        Commands::Premium { state } => {
            profile::set_premium(&mut stdout, &mut db, state.is_on())?;
        }
        Commands::Reset => {
            profile::reset(&mut stdout, &mut db)?;
        }
    }

    Ok(())
}
