use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use thiserror::Error;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address looks invalid")]
    InvalidEmail,
    #[error("request failed: {0}")]
    Transport(String),
}

/// Result of one submission, reported back to the UI loop.
pub type SubmitOutcome = Result<(), ContactError>;

/// Something that can deliver an encoded form body.
pub trait FormTransport: Send + Sync {
    fn post(&self, endpoint: &str, body: &str) -> SubmitOutcome;
}

/// Blocking HTTP delivery. No timeout and no retry.
///
/// Any answer from the handler counts as delivered, whatever its status.
/// Only a failure to reach it is an error.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FormTransport for HttpTransport {
    fn post(&self, endpoint: &str, body: &str) -> SubmitOutcome {
        match self
            .agent
            .post(endpoint)
            .set("Content-Type", FORM_CONTENT_TYPE)
            .send_string(body)
        {
            Ok(resp) => {
                tracing::debug!(status = resp.status(), "form handler answered");
                Ok(())
            }
            Err(ureq::Error::Status(code, _)) => {
                tracing::warn!(status = code, "form handler answered with an error status");
                Ok(())
            }
            Err(ureq::Error::Transport(t)) => Err(ContactError::Transport(t.to_string())),
        }
    }
}

/// Runs submissions off the UI thread, one worker per request.
pub struct Submitter {
    transport: Arc<dyn FormTransport>,
    endpoint: String,
    tx: Sender<SubmitOutcome>,
}

impl Submitter {
    pub fn new(
        transport: Arc<dyn FormTransport>,
        endpoint: impl Into<String>,
    ) -> (Self, Receiver<SubmitOutcome>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                transport,
                endpoint: endpoint.into(),
                tx,
            },
            rx,
        )
    }

    /// Fire and forget: the outcome arrives on the receiver from `new`.
    pub fn dispatch(&self, body: String) {
        let transport = Arc::clone(&self.transport);
        let endpoint = self.endpoint.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            tracing::debug!(%endpoint, "posting contact form");
            let outcome = transport.post(&endpoint, &body);
            let _ = tx.send(outcome);
        });
    }
}
