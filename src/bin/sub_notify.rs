// src/bin/sub_notify.rs
use color_eyre::eyre::Result;
use sub_notify::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    cli::run()?;
    Ok(())
}
