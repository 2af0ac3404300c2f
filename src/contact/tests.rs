use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use super::encode::encode_form;
use super::*;
use crate::config::ContactSettings;

fn filled() -> ContactForm {
    ContactForm {
        name: "Django R".into(),
        email: "django@example.org".into(),
        message: "Un concert le 12 & 13?".into(),
        ..ContactForm::default()
    }
}

struct FakeTransport {
    outcome: SubmitOutcome,
    seen: Mutex<Vec<(String, String)>>,
}

impl FormTransport for FakeTransport {
    fn post(&self, endpoint: &str, body: &str) -> SubmitOutcome {
        self.seen
            .lock()
            .unwrap()
            .push((endpoint.to_string(), body.to_string()));
        self.outcome.clone()
    }
}

#[test]
fn encode_form_escapes_keys_and_values_in_order() {
    let body = encode_form(&[("form-name", "contact"), ("msg", "a b&c=d/é")]);
    assert_eq!(body, "form-name=contact&msg=a%20b%26c%3Dd%2F%C3%A9");
    assert_eq!(encode_form::<&str, &str>(&[]), "");
}

#[test]
fn body_starts_with_marker_and_carries_empty_honeypot() {
    let body = filled().body(&ContactSettings::default());
    assert_eq!(
        body,
        "form-name=contact&bot-field=&name=Django%20R&email=django%40example.org\
         &message=Un%20concert%20le%2012%20%26%2013%3F"
    );
}

#[test]
fn fields_follow_configured_names() {
    let settings = ContactSettings {
        form_name: "booking".into(),
        honeypot_field: "trap".into(),
        ..ContactSettings::default()
    };
    let fields = filled().fields(&settings);
    assert_eq!(fields[0], ("form-name".to_string(), "booking".to_string()));
    assert_eq!(fields[1], ("trap".to_string(), String::new()));
    assert_eq!(fields.len(), 5);
}

#[test]
fn validate_requires_every_field() {
    assert_eq!(filled().validate(), Ok(()));

    let mut f = filled();
    f.name.clear();
    assert_eq!(f.validate(), Err(ContactError::MissingField("name")));

    let mut f = filled();
    f.email = "   ".into();
    assert_eq!(f.validate(), Err(ContactError::MissingField("email")));

    let mut f = filled();
    f.email.clear();
    assert_eq!(f.validate(), Err(ContactError::MissingField("email")));

    let mut f = filled();
    f.email = "django.example.org".into();
    assert_eq!(f.validate(), Err(ContactError::InvalidEmail));

    let mut f = filled();
    f.email = "django@".into();
    assert_eq!(f.validate(), Err(ContactError::InvalidEmail));

    let mut f = filled();
    f.message.clear();
    assert_eq!(f.validate(), Err(ContactError::MissingField("message")));
}

#[test]
fn whitespace_only_text_fields_count_as_filled() {
    let mut f = filled();
    f.name = "  ".into();
    f.message = "\n".into();
    assert_eq!(f.validate(), Ok(()));
}

#[test]
fn typing_goes_to_focused_field_only() {
    let mut f = ContactForm::default();
    f.push_char('a');
    f.focus_next();
    f.push_char('b');
    f.push_char('c');
    f.pop_char();
    f.focus_next();
    f.push_char('m');
    f.focus_next();
    assert_eq!(f.focus, FormField::Send);
    f.push_char('x');
    f.pop_char();

    assert_eq!(f.name, "a");
    assert_eq!(f.email, "b");
    assert_eq!(f.message, "m");

    f.focus_next();
    assert_eq!(f.focus, FormField::Name);
    f.focus_prev();
    assert_eq!(f.focus, FormField::Send);
}

#[test]
fn submitter_reports_outcome_from_worker() {
    let transport = Arc::new(FakeTransport {
        outcome: Ok(()),
        seen: Mutex::new(Vec::new()),
    });
    let (submitter, rx) = Submitter::new(transport.clone(), "http://127.0.0.1:8888/");
    submitter.dispatch("form-name=contact".into());

    let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(outcome, Ok(()));
    assert_eq!(
        transport.seen.lock().unwrap().as_slice(),
        &[(
            "http://127.0.0.1:8888/".to_string(),
            "form-name=contact".to_string()
        )]
    );
}

#[test]
fn submitter_reports_failure() {
    let transport = Arc::new(FakeTransport {
        outcome: Err(ContactError::Transport("connection refused".into())),
        seen: Mutex::new(Vec::new()),
    });
    let (submitter, rx) = Submitter::new(transport, "http://127.0.0.1:8888/");
    submitter.dispatch(String::new());
    assert!(matches!(
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        Err(ContactError::Transport(_))
    ));
}

/// Accept one request on a loopback port, answer with `status_line` and hand
/// back the raw request text.
fn one_shot_server(status_line: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let done = line == "\r\n";
            head.push_str(&line);
            if done {
                break;
            }
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();
        head.push_str(&String::from_utf8(body).unwrap());

        let mut stream = reader.into_inner();
        write!(stream, "HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").unwrap();
        tx.send(head).unwrap();
    });
    (endpoint, rx)
}

#[test]
fn http_transport_posts_form_encoded_body() {
    let (endpoint, rx) = one_shot_server("200 OK");
    let body = filled().body(&ContactSettings::default());

    assert_eq!(HttpTransport::new().post(&endpoint, &body), Ok(()));

    let request = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(request.starts_with("POST / HTTP/1.1\r\n"), "{request}");
    assert!(
        request
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded\r\n"),
        "{request}"
    );
    assert!(request.ends_with(&format!("\r\n\r\n{body}")), "{request}");
}

#[test]
fn http_transport_counts_error_statuses_as_delivered() {
    for status in ["404 Not Found", "500 Internal Server Error"] {
        let (endpoint, rx) = one_shot_server(status);
        assert_eq!(HttpTransport::new().post(&endpoint, "form-name=contact"), Ok(()));
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
}

#[test]
fn http_transport_reports_unreachable_handler() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    assert!(matches!(
        HttpTransport::new().post(&endpoint, "form-name=contact"),
        Err(ContactError::Transport(_))
    ));
}
