// src/notify.rs
use std::{fmt, str::FromStr};

use crate::config::consts::NO_NEW_POSTS;
use crate::error::{Error, Result};
use crate::select::SelectionResult;

/// Text payload for the selection. The scheme is stripped from links:
/// the gateway mangles the `:` in `https://`.
pub fn format(result: &SelectionResult) -> String {
    match result {
        SelectionResult::Selected(url) => strip_scheme(url).to_string(),
        SelectionResult::NoNewPosts => s!(NO_NEW_POSTS),
    }
}

fn strip_scheme(url: &str) -> &str {
    match url.find("://") {
        Some(i) if url[..i].chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) => &url[i + 3..],
        _ => url,
    }
}

/* ---------------- Carriers ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Carrier {
    Verizon,
    Sprint,
    Att,
    #[cfg_attr(feature = "cli", value(name = "tmobile"))]
    TMobile,
}

impl Carrier {
    pub const ALL: [Carrier; 4] = [Carrier::Verizon, Carrier::Sprint, Carrier::Att, Carrier::TMobile];

    pub fn name(self) -> &'static str {
        match self {
            Carrier::Verizon => "verizon",
            Carrier::Sprint  => "sprint",
            Carrier::Att     => "att",
            Carrier::TMobile => "tmobile",
        }
    }

    /// Email-to-SMS gateway domain, with the `@`.
    pub fn gateway(self) -> &'static str {
        match self {
            Carrier::Verizon => "@vtext.com",
            Carrier::Sprint  => "@page.nextel.com",
            Carrier::Att     => "@mms.att.net",
            Carrier::TMobile => "@tmomail.net",
        }
    }

    /// Gateway address for a phone number. Non-digits (dashes, spaces) are dropped.
    pub fn address(self, phone: &str) -> Result<String> {
        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(Error::Address(format!("phone number '{phone}' has no digits")));
        }
        Ok(join!(&digits, self.gateway()))
    }
}

impl FromStr for Carrier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lc = s.trim().to_ascii_lowercase();
        Carrier::ALL.into_iter()
            .find(|c| c.name() == lc || (lc == "t-mobile" && *c == Carrier::TMobile))
            .ok_or_else(|| Error::UnknownCarrier(s!(s)))
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_link_loses_scheme() {
        let r = SelectionResult::Selected(s!("https://www.reddit.com/r/t/comments/abc"));
        assert_eq!(format(&r), "www.reddit.com/r/t/comments/abc");
        let r = SelectionResult::Selected(s!("www.example.com/x"));
        assert_eq!(format(&r), "www.example.com/x");
    }

    #[test]
    fn no_new_posts_is_fixed_text() {
        assert_eq!(format(&SelectionResult::NoNewPosts), "No new posts");
    }

    #[test]
    fn carrier_addresses() {
        assert_eq!(Carrier::Verizon.address("555-555-5555").unwrap(), "5555555555@vtext.com");
        assert_eq!(Carrier::TMobile.address("5555555555").unwrap(), "5555555555@tmomail.net");
        assert!(matches!(Carrier::Att.address("n/a"), Err(Error::Address(_))));
    }

    #[test]
    fn carrier_from_str() {
        assert_eq!("Sprint".parse::<Carrier>().unwrap(), Carrier::Sprint);
        assert_eq!("t-mobile".parse::<Carrier>().unwrap(), Carrier::TMobile);
        assert!(matches!("fido".parse::<Carrier>(), Err(Error::UnknownCarrier(_))));
    }
}
