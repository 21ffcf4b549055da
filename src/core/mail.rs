// src/core/mail.rs
use lettre::{
    Message, SmtpTransport, Transport,
    message::Mailbox,
    transport::smtp::authentication::Credentials,
};

use crate::error::{Error, Result};

/// Sends one short text payload from `from` to `to`.
pub trait Deliver {
    fn send(&self, from: &str, to: &str, body: &str) -> Result<()>;
}

/// SMTP with STARTTLS and a login (e.g. a Gmail account).
pub struct SmtpDeliver {
    transport: SmtpTransport,
}

impl SmtpDeliver {
    pub fn new(host: &str, port: u16, user: &str, password: &str) -> Result<Self> {
        let transport = SmtpTransport::starttls_relay(host)
            .map_err(|e| Error::DeliveryFailed(format!("{host}: {e}")))?
            .port(port)
            .credentials(Credentials::new(s!(user), s!(password)))
            .build();
        Ok(Self { transport })
    }
}

fn mailbox(addr: &str) -> Result<Mailbox> {
    addr.parse().map_err(|e| Error::Address(format!("'{addr}': {e}")))
}

impl Deliver for SmtpDeliver {
    fn send(&self, from: &str, to: &str, body: &str) -> Result<()> {
        let msg = Message::builder()
            .from(mailbox(from)?)
            .to(mailbox(to)?)
            .body(s!(body))
            .map_err(|e| Error::DeliveryFailed(e.to_string()))?;

        logf!("Sending {} char(s) to {to}", body.len());
        self.transport.send(&msg)
            .map_err(|e| Error::DeliveryFailed(e.to_string()))?;
        Ok(())
    }
}

/// Prints instead of sending.
pub struct StdoutDeliver;

impl Deliver for StdoutDeliver {
    fn send(&self, from: &str, to: &str, body: &str) -> Result<()> {
        println!("{from} -> {to}: {body}");
        Ok(())
    }
}
