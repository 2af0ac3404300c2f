//! Contact form: field buffers, validation, URL-encoding and the relay to
//! the static-site form handler.

mod encode;
mod form;
mod submit;

pub use form::{ContactForm, FormField};
pub use submit::{ContactError, FormTransport, HttpTransport, SubmitOutcome, Submitter};

#[cfg(test)]
mod tests;
