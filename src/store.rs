// src/store.rs
//
// Seen-link store: every link we've already texted, with the day it went out.
// Persisted as a two-column CSV (URL,DATE). Always rewritten whole.
//
use std::{fs, io::{self, Write}, path::Path};

use chrono::{Duration, NaiveDate};
use tempfile::NamedTempFile;

use crate::config::consts::{COL_DATE, COL_URL, DATE_FMT, STORE_SEP};
use crate::csv::{parse_rows, split_header, write_row};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeenLink {
    pub url: String,
    pub seen_on: NaiveDate,
}

/// In-memory snapshot of the store. Operations return new snapshots;
/// only `save` touches disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkStore {
    entries: Vec<SeenLink>,
}

impl LinkStore {
    pub fn new() -> Self { Self::default() }

    /// Build from entries, keeping the first occurrence of each url.
    pub fn from_entries(entries: impl IntoIterator<Item = SeenLink>) -> Self {
        let mut out: Vec<SeenLink> = Vec::new();
        for e in entries {
            if !out.iter().any(|x| x.url == e.url) { out.push(e); }
        }
        Self { entries: out }
    }

    pub fn entries(&self) -> &[SeenLink] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Exact match on the canonical url.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|e| e.url == url)
    }

    /// Keep entries strictly newer than `today - window`.
    /// A window reaching past the earliest representable date keeps everything.
    pub fn prune(&self, today: NaiveDate, window: Duration) -> LinkStore {
        let Some(cutoff) = today.checked_sub_signed(window) else {
            return self.clone();
        };
        let kept = self.entries.iter()
            .filter(|e| e.seen_on > cutoff)
            .cloned()
            .collect();
        LinkStore { entries: kept }
    }

    /// Pruned copy plus `{url, today}` at the end.
    pub fn record(&self, url: &str, today: NaiveDate, window: Duration) -> LinkStore {
        let mut next = self.prune(today, window);
        let evicted = self.len() - next.len();
        if evicted > 0 { logd!("Pruned {evicted} expired link(s)"); }
        next.entries.retain(|e| e.url != url);
        next.entries.push(SeenLink { url: s!(url), seen_on: today });
        next
    }

    /* ---------------- Disk ---------------- */

    /// Read the store file. `StoreMissing` if it doesn't exist.
    pub fn load(path: &Path) -> Result<LinkStore> {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::StoreMissing(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::corrupt(path, format!("not UTF-8: {e}")))?;
        let store = Self::parse(&text, path)?;
        logd!("Loaded {} seen link(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Like `load`, but a missing file is just an empty store.
    pub fn load_or_empty(path: &Path) -> Result<LinkStore> {
        match Self::load(path) {
            Err(Error::StoreMissing(p)) => {
                logf!("No link store at {}, starting empty", p.display());
                Ok(LinkStore::new())
            }
            other => other,
        }
    }

    /// Parse store text. `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<LinkStore> {
        // Spreadsheet exports lead with a BOM
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let rows = parse_rows(text, STORE_SEP);
        let (header, body) = split_header(rows)
            .ok_or_else(|| Error::corrupt(path, "empty file, no header row"))?;

        let col = |name: &str| header.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let url_ix = col(COL_URL).ok_or_else(|| Error::corrupt(path, "missing URL column"))?;
        let date_ix = col(COL_DATE).ok_or_else(|| Error::corrupt(path, "missing DATE column"))?;

        let mut entries = Vec::with_capacity(body.len());
        for (n, row) in body.iter().enumerate() {
            let line = n + 2; // 1-based, after header
            let url = row.get(url_ix).map(|s| s.trim()).unwrap_or("");
            let date = row.get(date_ix).map(|s| s.trim()).unwrap_or("");
            if url.is_empty() {
                return Err(Error::corrupt(path, format!("line {line}: empty URL")));
            }
            let seen_on = NaiveDate::parse_from_str(date, DATE_FMT)
                .map_err(|e| Error::corrupt(path, format!("line {line}: bad DATE '{date}': {e}")))?;
            entries.push(SeenLink { url: s!(url), seen_on });
        }

        let store = Self::from_entries(entries);
        if store.len() < body.len() {
            logd!("Dropped {} duplicate url row(s)", body.len() - store.len());
        }
        Ok(store)
    }

    pub fn to_csv_string(&self) -> String {
        let mut buf: Vec<u8> = Vec::new();
        // Vec<u8> writes can't fail
        let _ = write_row(&mut buf, &[COL_URL, COL_DATE], STORE_SEP);
        for e in &self.entries {
            let date = e.seen_on.format(DATE_FMT).to_string();
            let _ = write_row(&mut buf, &[e.url.as_str(), date.as_str()], STORE_SEP);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Overwrite the store file: temp file in the same dir, fsync, rename, dir fsync.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(self.to_csv_string().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        sync_dir(dir)?;

        logd!("Saved {} seen link(s) to {}", self.len(), path.display());
        Ok(())
    }
}

/// Make the rename itself durable.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> { Ok(()) }
