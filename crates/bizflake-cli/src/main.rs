mod cli;
mod commands;
mod logging;

use crate::cli::{Command, CLI};
use bizflake::Decoder;
use clap::Parser;
use std::io::{self, Write};
use tracing::debug;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();

    logging::init(config.log_format);

    debug!(
        epoch = %config.epoch,
        log_format = %config.log_format,
        "starting bizflake"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.command {
        Command::Generate(args) => {
            let generator = commands::generator(config.epoch);
            commands::generate(&generator, args, &mut out)?;
        }
        Command::Decode(args) => {
            commands::decode(&Decoder::new(config.epoch), args, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
