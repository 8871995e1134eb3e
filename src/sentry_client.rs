use crate::{ClientConfig, ClientFactory, Error, ErrorReport, Severity, ShutdownFlag, TrackerClient};
use sentry_core::{protocol, types, ClientOptions};
use std::{sync::Arc, time::Duration};

/// How long a flush may block once shutdown handling has begun.
const SHUTDOWN_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Option keys recognized in a [`ClientConfig`]'s options mapping; anything
/// else is passed over with a debug log rather than rejected.
fn client_options(key: &str, config: &ClientConfig) -> Result<ClientOptions, Error> {
    let mut options = ClientOptions::default();

    if let Some(dsn) = &config.dsn {
        options.dsn = Some(dsn.parse::<types::Dsn>().map_err(|source| Error::InvalidDsn {
            key: key.to_owned(),
            source,
        })?);
    }

    for (name, value) in &config.options {
        match (name.as_str(), value) {
            ("environment", serde_json::Value::String(s)) => {
                options.environment = Some(s.clone().into());
            }
            ("release", serde_json::Value::String(s)) => {
                options.release = Some(s.clone().into());
            }
            ("server_name", serde_json::Value::String(s)) => {
                options.server_name = Some(s.clone().into());
            }
            ("debug", serde_json::Value::Bool(b)) => {
                options.debug = *b;
            }
            ("attach_stacktrace", serde_json::Value::Bool(b)) => {
                options.attach_stacktrace = *b;
            }
            ("sample_rate", serde_json::Value::Number(n)) => {
                if let Some(rate) = n.as_f64() {
                    options.sample_rate = rate as f32;
                }
            }
            ("max_breadcrumbs", serde_json::Value::Number(n)) => {
                if let Some(max) = n.as_u64() {
                    options.max_breadcrumbs = max as usize;
                }
            }
            (other, _) => {
                debug_print!("ignoring unrecognized client option '{}'", other);
            }
        }
    }

    Ok(options)
}

fn exception_event(report: &ErrorReport) -> protocol::Event<'static> {
    let stacktrace = report.file.as_ref().map(|file| protocol::Stacktrace {
        frames: vec![protocol::Frame {
            filename: Some(file.clone()),
            lineno: report.line.map(u64::from),
            ..Default::default()
        }],
        ..Default::default()
    });

    let exception = protocol::Exception {
        ty: report
            .class
            .map(|class| class.as_str())
            .unwrap_or("Exception")
            .to_owned(),
        value: Some(report.message.clone()),
        stacktrace,
        ..Default::default()
    };

    protocol::Event {
        level: protocol::Level::Error,
        exception: vec![exception].into(),
        timestamp: types::Utc::now(),
        ..Default::default()
    }
}

fn message_event(
    message: &str,
    severity: Severity,
    category: Option<&str>,
) -> protocol::Event<'static> {
    let level = match severity {
        Severity::Error => protocol::Level::Error,
        Severity::Warning => protocol::Level::Warning,
        Severity::Info => protocol::Level::Info,
        Severity::Debug => protocol::Level::Debug,
    };

    let mut event = protocol::Event {
        level,
        message: Some(message.to_owned()),
        timestamp: types::Utc::now(),
        ..Default::default()
    };

    if let Some(category) = category {
        event.tags.insert("category".to_owned(), category.to_owned());
    }

    event
}

/// [`TrackerClient`] backed by a `sentry_core` client. Everything past event
/// assembly, batching and delivery included, happens inside `sentry_core`.
pub struct SentryClient {
    client: sentry_core::Client,
    shutdown: Arc<ShutdownFlag>,
}

impl SentryClient {
    pub fn is_enabled(&self) -> bool {
        self.client.is_enabled()
    }
}

impl TrackerClient for SentryClient {
    fn capture_exception(&self, report: &ErrorReport) {
        self.client.capture_event(exception_event(report), None);
    }

    fn capture_message(&self, message: &str, severity: Severity, category: Option<&str>) {
        self.client
            .capture_event(message_event(message, severity, category), None);
    }

    fn send_unsent_errors(&self) {
        // Once shutdown handling has begun there is no later chance to
        // deliver, so don't wait on the transport indefinitely
        let timeout = if self.shutdown.is_shutting_down() {
            Some(SHUTDOWN_FLUSH_TIMEOUT)
        } else {
            None
        };

        self.client.flush(timeout);
    }
}

/// Builds [`SentryClient`]s from configuration entries.
pub struct SentryFactory {
    shutdown: Arc<ShutdownFlag>,
}

impl SentryFactory {
    pub fn new(shutdown: Arc<ShutdownFlag>) -> Self {
        Self { shutdown }
    }
}

impl ClientFactory for SentryFactory {
    fn create(&self, key: &str, config: &ClientConfig) -> Result<Arc<dyn TrackerClient>, Error> {
        let options = client_options(key, config)?;

        Ok(Arc::new(SentryClient {
            client: sentry_core::Client::from_config(options),
            shutdown: self.shutdown.clone(),
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorClass;

    fn entry(dsn: Option<&str>, options: serde_json::Value) -> ClientConfig {
        ClientConfig {
            dsn: dsn.map(str::to_owned),
            options: match options {
                serde_json::Value::Object(map) => map,
                _ => panic!("options must be a map"),
            },
        }
    }

    #[test]
    fn empty_config_yields_inert_options() {
        let options = client_options("default", &ClientConfig::default()).unwrap();
        assert!(options.dsn.is_none());
    }

    #[test]
    fn recognized_options_applied() {
        let config = entry(
            Some("https://a0b1c2@sentry.io/42"),
            serde_json::json!({
                "environment": "staging",
                "release": "1.4.2",
                "debug": true,
                "sample_rate": 0.5,
                "max_breadcrumbs": 32,
                "attach_stacktrace": true,
                "not_an_option": "ignored"
            }),
        );

        let options = client_options("custom", &config).unwrap();
        assert!(options.dsn.is_some());
        assert_eq!(options.environment.as_deref(), Some("staging"));
        assert_eq!(options.release.as_deref(), Some("1.4.2"));
        assert!(options.debug);
        assert!(options.attach_stacktrace);
        assert_eq!(options.sample_rate, 0.5);
        assert_eq!(options.max_breadcrumbs, 32);
    }

    #[test]
    fn invalid_dsn_is_rejected() {
        let config = entry(Some("not a dsn"), serde_json::json!({}));

        match client_options("custom", &config) {
            Err(Error::InvalidDsn { key, .. }) => assert_eq!(key, "custom"),
            other => panic!("expected InvalidDsn, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn exception_event_shape() {
        let report = ErrorReport {
            class: Some(ErrorClass::Parse),
            message: "unexpected token".to_owned(),
            file: Some("view.tpl".to_owned()),
            line: Some(3),
        };

        let event = exception_event(&report);
        assert_eq!(event.level, protocol::Level::Error);

        let exception = &event.exception.values[0];
        assert_eq!(exception.ty, "parse error");
        assert_eq!(exception.value.as_deref(), Some("unexpected token"));

        let frame = &exception.stacktrace.as_ref().unwrap().frames[0];
        assert_eq!(frame.filename.as_deref(), Some("view.tpl"));
        assert_eq!(frame.lineno, Some(3));
    }

    #[test]
    fn message_event_shape() {
        let event = message_event("cache miss storm", Severity::Warning, Some("app.cache"));

        assert_eq!(event.level, protocol::Level::Warning);
        assert_eq!(event.message.as_deref(), Some("cache miss storm"));
        assert_eq!(event.tags.get("category").map(String::as_str), Some("app.cache"));
    }

    #[test]
    fn message_event_without_category() {
        let event = message_event("heartbeat", Severity::Debug, None);
        assert_eq!(event.level, protocol::Level::Debug);
        assert!(event.tags.is_empty());
    }

    #[test]
    fn factory_builds_inert_client_without_dsn() {
        let factory = SentryFactory::new(Arc::new(ShutdownFlag::new()));
        // Smoke test only; the handle is opaque past construction
        factory.create("default", &ClientConfig::default()).unwrap();
    }
}
