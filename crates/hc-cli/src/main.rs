// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

mod commands;
mod output;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hc", about = "Hurricash pool and relay client")]
struct Cli {
    /// Machine-readable output on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Read or change ~/.hurricash/config.json
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
    /// Show a ring's hash and members
    Ring {
        /// Denomination in wei
        amount: String,
        ring_index: u64,
    },
    /// Check a withdrawal request locally without submitting it
    Verify { request: PathBuf },
    /// Send a withdrawal request to the relayer and wait for the result
    Relay { request: PathBuf },
    /// Relayer health, or one submission by key image
    Status {
        /// Key image x coordinate (hex)
        key_image: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    Set { key: String, value: String },
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    output::set_json_mode(cli.json);
    match cli.command {
        Cmd::Config { action } => match action {
            ConfigCmd::Set { key, value } => commands::config::set(&key, &value)?,
            ConfigCmd::Show => commands::config::show()?,
        },
        Cmd::Ring { amount, ring_index } => commands::ring::run(&amount, ring_index).await?,
        Cmd::Verify { request } => commands::verify::run(&request).await?,
        Cmd::Relay { request } => commands::relay::run(&request).await?,
        Cmd::Status { key_image } => commands::status::run(key_image.as_deref()).await?,
    }
    Ok(())
}
