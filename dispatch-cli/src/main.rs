//! A command line interface to split a delivery roster between drivers.
//!

mod commands;

use clap::Command;
use commands::assign::{get_assign_app, run_assign};
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let matches = get_app().get_matches();

    let result = match matches.subcommand() {
        Some(("assign", assign_matches)) => run_assign(assign_matches),
        _ => Err("no subcommand was used. Use -h to print help information.".into()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn get_app() -> Command {
    Command::new("Delivery Dispatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line interface to split deliveries between drivers")
        .subcommand_required(true)
        .subcommand(get_assign_app())
}
