// src/extract.rs
//
// Topic page markup → ordered candidate posts (url + pinned flag).
//
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::consts::{BASE_URL, LINK_SELECTOR, POST_SELECTOR, STICKY_PATTERN};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidatePost {
    pub url: String,
    pub is_pinned: bool,
}

/// Decides whether a post is pinned from its rendered inner markup.
pub trait PinnedRule {
    fn is_pinned(&self, markup: &str) -> bool;
}

/// Pattern match for the sticky badge id. Brittle: tracks the site's markup.
pub struct StickyBadge {
    re: Regex,
}

impl StickyBadge {
    pub fn new() -> Result<Self> {
        Self::with_pattern(STICKY_PATTERN)
    }

    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| Error::Pattern(e.to_string()))?;
        Ok(Self { re })
    }
}

impl PinnedRule for StickyBadge {
    fn is_pinned(&self, markup: &str) -> bool {
        self.re.is_match(markup)
    }
}

pub struct Extractor<R: PinnedRule = StickyBadge> {
    base: Url,
    rule: R,
    posts: Selector,
    link: Selector,
}

impl Extractor<StickyBadge> {
    /// Default extractor: reddit base address + sticky badge rule.
    pub fn new() -> Result<Self> {
        Self::with_rule(BASE_URL, StickyBadge::new()?)
    }
}

impl<R: PinnedRule> Extractor<R> {
    pub fn with_rule(base: &str, rule: R) -> Result<Self> {
        let base = Url::parse(base).map_err(|e| Error::Pattern(format!("base url '{base}': {e}")))?;
        Ok(Self {
            base,
            rule,
            posts: selector(POST_SELECTOR)?,
            link: selector(LINK_SELECTOR)?,
        })
    }

    /// All posts in page order. Posts without a link are logged and skipped.
    pub fn extract(&self, page: &str) -> Vec<CandidatePost> {
        let doc = Html::parse_document(page);
        let mut out = Vec::new();

        for (index, el) in doc.select(&self.posts).enumerate() {
            match self.extract_post(index, el) {
                Ok(post) => {
                    logd!("Post #{index}: {} (pinned: {})", post.url, post.is_pinned);
                    out.push(post);
                }
                Err(e) => logf!("Skipping post: {e}"),
            }
        }
        logd!("Extracted {} candidate(s)", out.len());
        out
    }

    /// One post element → candidate, or `NoLinkFound`.
    pub fn extract_post(&self, index: usize, el: ElementRef<'_>) -> Result<CandidatePost> {
        let url = el.select(&self.link)
            .filter_map(|a| a.value().attr("href"))
            .find_map(|href| resolve_link(&self.base, href))
            .ok_or(Error::NoLinkFound { index })?;

        let is_pinned = self.rule.is_pinned(&el.inner_html());
        Ok(CandidatePost { url, is_pinned })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Pattern(format!("selector '{css}': {e}")))
}

/// Absolute, canonical form of a captured link: relative paths are joined
/// onto the board base; query and fragment are dropped. Only http(s).
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() { return None; }

    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") { return None; }
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}
