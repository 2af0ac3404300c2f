use crate::config::ContactSettings;

use super::encode::encode_form;
use super::submit::ContactError;

/// Focusable parts of the form, in tab order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
    Send,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nom",
            FormField::Email => "Email",
            FormField::Message => "Message",
            FormField::Send => "Envoyez",
        }
    }

    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Message,
            FormField::Message => FormField::Send,
            FormField::Send => FormField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Send,
            FormField::Email => FormField::Name,
            FormField::Message => FormField::Email,
            FormField::Send => FormField::Message,
        }
    }
}

/// Editable state of the contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub focus: FormField,
    /// A submission is waiting for its response.
    pub in_flight: bool,
    /// Why the last submit attempt was refused locally, if it was.
    pub notice: Option<String>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            focus: FormField::Name,
            in_flight: false,
            notice: None,
        }
    }
}

impl ContactForm {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Message => Some(&mut self.message),
            FormField::Send => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buf) = self.focused_buffer() {
            buf.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(buf) = self.focused_buffer() {
            buf.pop();
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
            FormField::Send => "",
        }
    }

    /// Required-field checks, the same ones the browser enforces on the page.
    pub fn validate(&self) -> Result<(), ContactError> {
        // Text inputs only need a value; email inputs are trimmed first.
        if self.name.is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        match self.email.trim().split_once('@') {
            Some((user, host)) if !user.is_empty() && !host.is_empty() => {}
            _ => return Err(ContactError::InvalidEmail),
        }
        if self.message.is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        Ok(())
    }

    /// Field name to value, in document order, including the marker and
    /// the always-empty honeypot.
    pub fn fields(&self, settings: &ContactSettings) -> Vec<(String, String)> {
        vec![
            ("form-name".to_string(), settings.form_name.clone()),
            (settings.honeypot_field.clone(), String::new()),
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("message".to_string(), self.message.clone()),
        ]
    }

    pub fn body(&self, settings: &ContactSettings) -> String {
        encode_form(&self.fields(settings))
    }
}
