// src/core/mod.rs
//
// Edge capabilities: where the page comes from, where the text goes.

pub mod mail;
pub mod net;

pub use mail::{Deliver, SmtpDeliver, StdoutDeliver};
pub use net::{FileSource, HttpSource, PageSource};
