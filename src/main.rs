use anyhow::Error;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{configuration::Config, icon::generate};

mod canvas;
mod configuration;
mod glyphs;
mod icon;
mod output;

/// Draws the placeholder crab icon into icons/icon.png for the app bundler.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    init_logging(cli.debug);

    let config = Config::default();
    info!(size = config.size, "generating icon");

    generate(&config)?;
    println!("Created {}", config.display_path());

    Ok(())
}
