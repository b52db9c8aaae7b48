#![doc = include_str!("../README.md")]

mod charts;
mod cli;
mod core;
mod dataset;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Analyze(args) => args.run()?,
        Command::Window(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
