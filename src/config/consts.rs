// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.reddit.com/r/";
pub const USER_AGENT: &str = "sub_notify/0.1";
pub const FETCH_TIMEOUT_SECS: u64 = 20;

// Local store
pub const STORE_FILE: &str = "visited_links.csv";
pub const STORE_SEP: char = ',';
pub const COL_URL: &str = "URL";
pub const COL_DATE: &str = "DATE";
pub const DATE_FMT: &str = "%Y-%m-%d";
pub const RETENTION_DAYS: u32 = 14; // a seen link may be re-sent after this

// Markup
pub const POST_SELECTOR: &str = r#"div[data-click-id="background"]"#;
pub const LINK_SELECTOR: &str = r#"a[data-click-id="body"]"#;
pub const STICKY_PATTERN: &str = r#"id="PostBadges--Sticky[^>]*>"#;

// Delivery
pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;
pub const NO_NEW_POSTS: &str = "No new posts";
