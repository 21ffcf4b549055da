// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::consts::{RETENTION_DAYS, SMTP_HOST, SMTP_PORT, STORE_FILE};
use crate::config::options::RunOptions;
use crate::notify::Carrier;
use crate::runner::{self, RunSummary};

/// Text yourself the top unseen post of a subreddit.
#[derive(Parser, Debug)]
#[command(name = "sub_notify", version, about)]
pub struct Cli {
    /// Subreddit name without prefix, e.g. piano
    pub topic: String,

    /// Cell phone number, e.g. 5555555555
    pub phone: String,

    /// Sending email address (SMTP login)
    pub sender: String,

    /// Cell phone provider
    #[arg(long, value_enum)]
    pub provider: Carrier,

    /// SMTP password for the sender account
    #[arg(long, env = "SUB_NOTIFY_PASSWORD", hide_env_values = true, default_value = "")]
    pub password: String,

    /// Seen-links CSV
    #[arg(long, default_value = STORE_FILE)]
    pub store: PathBuf,

    /// Days before a sent link may be sent again
    #[arg(long, default_value_t = RETENTION_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
    pub retention_days: u32,

    /// Read page markup from this file instead of fetching
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Print the message instead of sending; don't touch the store
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, default_value = SMTP_HOST)]
    pub smtp_host: String,

    #[arg(long, default_value_t = SMTP_PORT)]
    pub smtp_port: u16,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_options(self) -> RunOptions {
        RunOptions {
            topic: self.topic,
            phone: self.phone,
            carrier: self.provider,
            sender: self.sender,
            password: self.password,
            store_path: self.store,
            retention_days: self.retention_days,
            html_file: self.html,
            dry_run: self.dry_run,
            smtp_host: self.smtp_host,
            smtp_port: self.smtp_port,
        }
    }
}

/// Parse args, set up logging, run once.
pub fn run() -> crate::error::Result<RunSummary> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);
    let opts = cli.into_options();
    logd!("Options: topic={} carrier={} store={}", opts.topic, opts.carrier, opts.store_path.display());
    runner::run_with_options(&opts)
}
