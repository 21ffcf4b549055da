// src/config/options.rs
use std::path::PathBuf;

use chrono::Duration;

use super::consts::*;
use crate::notify::Carrier;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub topic: String,
    pub phone: String,
    pub carrier: Carrier,
    pub sender: String,
    pub password: String,
    pub store_path: PathBuf,
    pub retention_days: u32,
    pub html_file: Option<PathBuf>, // read markup from disk instead of fetching
    pub dry_run: bool,              // print payload; no send, no save
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            topic: s!(),
            phone: s!(),
            carrier: Carrier::Verizon,
            sender: s!(),
            password: s!(),
            store_path: PathBuf::from(STORE_FILE),
            retention_days: RETENTION_DAYS,
            html_file: None,
            dry_run: false,
            smtp_host: s!(SMTP_HOST),
            smtp_port: SMTP_PORT,
        }
    }
}

impl RunOptions {
    pub fn window(&self) -> Duration {
        Duration::days(i64::from(self.retention_days))
    }
}

/// Board address for a topic, e.g. `https://www.reddit.com/r/piano`.
pub fn topic_url(base: &str, topic: &str) -> String {
    join!(base, &normalize_topic(topic))
}

/// Trim and drop any `r/` or `/r/` prefix the user typed.
pub fn normalize_topic(topic: &str) -> String {
    let t = topic.trim().trim_start_matches('/');
    let t = t.strip_prefix("r/").unwrap_or(t);
    t.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_prefixes_are_dropped() {
        assert_eq!(normalize_topic("piano"), "piano");
        assert_eq!(normalize_topic(" r/piano/ "), "piano");
        assert_eq!(normalize_topic("/r/piano"), "piano");
    }

    #[test]
    fn topic_url_joins_base() {
        assert_eq!(topic_url(BASE_URL, "r/rust"), "https://www.reddit.com/r/rust");
        assert_eq!(RunOptions::default().window(), Duration::days(14));
    }
}
