// src/runner.rs
use chrono::{Local, NaiveDate};

use crate::{
    config::options::RunOptions,
    core::{Deliver, FileSource, HttpSource, PageSource, SmtpDeliver, StdoutDeliver},
    error::Result,
    extract::Extractor,
    notify,
    select::{SelectionResult, select},
    store::LinkStore,
};

/// What one run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub result: SelectionResult,
    pub payload: String,
    pub store_len: usize, // entries in the store after the run
    pub saved: bool,
}

/// One shot: load store → fetch → extract → select → deliver → save.
///
/// The store is only written after a successful delivery of a new link,
/// so a failed send leaves it untouched and the link is retried next run.
pub fn run(
    opts: &RunOptions,
    source: &dyn PageSource,
    deliver: &dyn Deliver,
    today: NaiveDate,
) -> Result<RunSummary> {
    let to = opts.carrier.address(&opts.phone)?;
    let store = LinkStore::load_or_empty(&opts.store_path)?;
    logf!("Store has {} seen link(s)", store.len());

    let page = source.fetch(&opts.topic)?;
    let candidates = Extractor::new()?.extract(&page);

    let (result, next) = select(&candidates, &store, today, opts.window());
    let payload = notify::format(&result);

    if let Err(e) = deliver.send(&opts.sender, &to, &payload) {
        loge!("Delivery to {to} failed: {e}");
        return Err(e);
    }

    let saved = matches!(result, SelectionResult::Selected(_)) && !opts.dry_run;
    if saved {
        next.save(&opts.store_path)?;
    }

    let store_len = if saved { next.len() } else { store.len() };
    Ok(RunSummary { result, payload, store_len, saved })
}

/// Wire real capabilities from the options and run for today's date.
pub fn run_with_options(opts: &RunOptions) -> Result<RunSummary> {
    let source: Box<dyn PageSource> = match &opts.html_file {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(HttpSource::new()?),
    };
    let deliver: Box<dyn Deliver> = if opts.dry_run {
        Box::new(StdoutDeliver)
    } else {
        Box::new(SmtpDeliver::new(&opts.smtp_host, opts.smtp_port, &opts.sender, &opts.password)?)
    };

    let today = Local::now().date_naive();
    run(opts, source.as_ref(), deliver.as_ref(), today)
}
