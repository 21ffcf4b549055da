// tests/run_once.rs
//
// Full single-shot runs with an in-memory page and a recording mailer.
//
use std::cell::RefCell;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use sub_notify::config::options::RunOptions;
use sub_notify::core::{Deliver, PageSource};
use sub_notify::notify::Carrier;
use sub_notify::runner::run;
use sub_notify::select::SelectionResult;
use sub_notify::{Error, Result};

struct Page(String);
impl PageSource for Page {
    fn fetch(&self, _topic: &str) -> Result<String> { Ok(self.0.clone()) }
}

#[derive(Default)]
struct Outbox {
    sent: RefCell<Vec<(String, String, String)>>,
    fail: bool,
}
impl Deliver for Outbox {
    fn send(&self, from: &str, to: &str, body: &str) -> Result<()> {
        if self.fail { return Err(Error::DeliveryFailed("connection refused".into())); }
        self.sent.borrow_mut().push((from.into(), to.into(), body.into()));
        Ok(())
    }
}

fn post(id: &str, sticky: bool) -> String {
    let badge = if sticky { r#"<i id="PostBadges--Sticky-1"></i>"# } else { "" };
    format!(r#"<div data-click-id="background">{badge}<a data-click-id="body" href="/r/test/comments/{id}/title/?ref=x">t</a></div>"#)
}

fn page(posts: &[String]) -> Page {
    Page(format!("<html><body>{}</body></html>", posts.concat()))
}

fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 3, 15).unwrap() }

fn opts(store: &Path) -> RunOptions {
    RunOptions {
        topic: "test".into(),
        phone: "555-123-4567".into(),
        carrier: Carrier::Verizon,
        sender: "me@gmail.com".into(),
        store_path: store.to_path_buf(),
        ..RunOptions::default()
    }
}

#[test]
fn first_run_sends_first_unpinned_and_creates_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("visited_links.csv");
    let outbox = Outbox::default();

    let src = page(&[post("pin", true), post("a", false), post("b", false)]);
    let summary = run(&opts(&store), &src, &outbox, today()).unwrap();

    assert_eq!(summary.result, SelectionResult::Selected("https://www.reddit.com/r/test/comments/a/title/".into()));
    assert_eq!(summary.payload, "www.reddit.com/r/test/comments/a/title/");
    assert!(summary.saved);

    let sent = outbox.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "me@gmail.com");
    assert_eq!(sent[0].1, "5551234567@vtext.com");

    let text = fs::read_to_string(&store).unwrap();
    assert_eq!(text, "URL,DATE\nhttps://www.reddit.com/r/test/comments/a/title/,2024-03-15\n");
}

#[test]
fn second_run_moves_to_next_post() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("links.csv");
    let src = page(&[post("a", false), post("b", false)]);

    run(&opts(&store), &src, &Outbox::default(), today()).unwrap();
    let summary = run(&opts(&store), &src, &Outbox::default(), today()).unwrap();

    assert_eq!(summary.payload, "www.reddit.com/r/test/comments/b/title/");
    assert_eq!(summary.store_len, 2);
}

#[test]
fn all_seen_sends_sentinel_and_leaves_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("links.csv");
    // includes an expired row that a prune would drop
    let before = "URL,DATE\n\
        https://www.reddit.com/r/old/comments/z/,2023-01-01\n\
        https://www.reddit.com/r/test/comments/a/title/,2024-03-14\n";
    fs::write(&store, before).unwrap();

    let outbox = Outbox::default();
    let summary = run(&opts(&store), &page(&[post("a", false), post("pin", true)]), &outbox, today()).unwrap();

    assert_eq!(summary.result, SelectionResult::NoNewPosts);
    assert_eq!(outbox.sent.borrow()[0].2, "No new posts");
    assert!(!summary.saved);
    assert_eq!(fs::read_to_string(&store).unwrap(), before);
}

#[test]
fn stale_entry_blocks_until_pruned_then_resends() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("links.csv");
    fs::write(&store, "URL,DATE\nhttps://www.reddit.com/r/test/comments/a/title/,2024-03-01\n").unwrap();
    let src = page(&[post("a", false), post("b", false)]);

    // "a" is 14 days old: still in the store, so "b" goes out and the record prunes "a".
    let summary = run(&opts(&store), &src, &Outbox::default(), today()).unwrap();
    assert_eq!(summary.payload, "www.reddit.com/r/test/comments/b/title/");
    assert!(!fs::read_to_string(&store).unwrap().contains("comments/a/"));

    // Next run, "a" is fair game again.
    let summary = run(&opts(&store), &src, &Outbox::default(), today()).unwrap();
    assert_eq!(summary.payload, "www.reddit.com/r/test/comments/a/title/");
}

#[test]
fn delivery_failure_is_terminal_and_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("links.csv");
    let outbox = Outbox { fail: true, ..Outbox::default() };

    let err = run(&opts(&store), &page(&[post("a", false)]), &outbox, today()).unwrap_err();
    assert!(matches!(err, Error::DeliveryFailed(_)));
    assert!(!store.exists());
}

#[test]
fn corrupt_store_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("links.csv");
    fs::write(&store, "LINK,WHEN\nx,y\n").unwrap();

    let outbox = Outbox::default();
    let err = run(&opts(&store), &page(&[post("a", false)]), &outbox, today()).unwrap_err();
    assert!(matches!(err, Error::StoreCorrupt { .. }));
    assert!(outbox.sent.borrow().is_empty());
}

#[test]
fn dry_run_does_not_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("links.csv");
    let o = RunOptions { dry_run: true, ..opts(&store) };

    let summary = run(&o, &page(&[post("a", false)]), &Outbox::default(), today()).unwrap();
    assert!(matches!(summary.result, SelectionResult::Selected(_)));
    assert!(!summary.saved);
    assert!(!store.exists());
}

#[test]
fn bad_phone_fails_before_fetch() {
    struct Unreachable;
    impl PageSource for Unreachable {
        fn fetch(&self, _: &str) -> Result<String> { panic!("should not fetch") }
    }
    let dir = tempfile::tempdir().unwrap();
    let o = RunOptions { phone: "none".into(), ..opts(&dir.path().join("x.csv")) };
    let err = run(&o, &Unreachable, &Outbox::default(), today()).unwrap_err();
    assert!(matches!(err, Error::Address(_)));
}

#[test]
fn very_long_retention_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("links.csv");
    fs::write(&store, "URL,DATE\nhttps://www.reddit.com/r/old/comments/z/,2000-01-01\n").unwrap();
    let o = RunOptions { retention_days: u32::MAX, ..opts(&store) };

    let summary = run(&o, &page(&[post("a", false)]), &Outbox::default(), today()).unwrap();
    assert!(summary.saved);
    assert_eq!(summary.store_len, 2);
}
