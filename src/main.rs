//
//  wpcom-kit
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wpcom_kit::cli::{exit_code, Cli, Commands};
use wpcom_kit::exit_codes;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Logs go to stderr, filtered by `WPK_DEBUG` (e.g. `WPK_DEBUG=wpcom_kit=debug`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("WPK_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Backup(cmd) => cmd.run(&cli.global).await,
        Commands::Scan(cmd) => cmd.run(&cli.global).await,
        Commands::Editor(cmd) => cmd.run(&cli.global).await,
        Commands::Site(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("wpk version {}", wpcom_kit::VERSION);
            Ok(())
        }
    }
}
