use crate::{ClientRegistry, Severity};
use std::sync::Arc;

/// Log severities as the host framework emits them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Trace,
    Profile,
}

impl LogLevel {
    /// Total mapping onto the tracker's severities. Anything that is not an
    /// error, warning or info message is forwarded as debug.
    pub fn severity(self) -> Severity {
        match self {
            Self::Error => Severity::Error,
            Self::Warning => Severity::Warning,
            Self::Info => Severity::Info,
            _ => Severity::Debug,
        }
    }
}

/// One record as delivered by the host's log router.
#[derive(Clone, Debug)]
pub struct LogRecord {
    pub message: String,
    pub level: LogLevel,
    pub category: String,
}

/// Log sink that forwards every record through the client registry.
pub struct LogBridge {
    clients: Arc<ClientRegistry>,
}

impl LogBridge {
    pub fn new(clients: Arc<ClientRegistry>) -> Self {
        Self { clients }
    }

    /// Forwards each record of a batch as a captured message on the default
    /// client, tagged with the record's category.
    pub fn process_batch(&self, records: &[LogRecord]) {
        let client = match self.clients.default_client() {
            Ok(client) => client,
            Err(e) => {
                debug_print!("unable to obtain default client: {}", e);
                return;
            }
        };

        for record in records {
            client.capture_message(
                &record.message,
                record.level.severity(),
                Some(&record.category),
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ClientConfig, ErrorReport, TrackerClient};
    use std::collections::HashMap;

    #[test]
    fn severity_mapping_is_total() {
        assert_eq!(LogLevel::Error.severity(), Severity::Error);
        assert_eq!(LogLevel::Warning.severity(), Severity::Warning);
        assert_eq!(LogLevel::Info.severity(), Severity::Info);
        assert_eq!(LogLevel::Trace.severity(), Severity::Debug);
        assert_eq!(LogLevel::Profile.severity(), Severity::Debug);
    }

    #[derive(Default)]
    struct RecordingClient {
        messages: parking_lot::Mutex<Vec<(String, Severity, Option<String>)>>,
    }

    impl TrackerClient for Arc<RecordingClient> {
        fn capture_exception(&self, _report: &ErrorReport) {}

        fn capture_message(&self, message: &str, severity: Severity, category: Option<&str>) {
            self.messages.lock().push((
                message.to_owned(),
                severity,
                category.map(str::to_owned),
            ));
        }

        fn send_unsent_errors(&self) {}
    }

    #[test]
    fn batch_forwarded_record_by_record() {
        let recorder = Arc::new(RecordingClient::default());
        let handle = recorder.clone();
        let registry = ClientRegistry::new(
            HashMap::new(),
            move |_key: &str,
                  _config: &ClientConfig|
                  -> Result<Arc<dyn TrackerClient>, crate::Error> {
                Ok(Arc::new(handle.clone()))
            },
        );

        let bridge = LogBridge::new(Arc::new(registry));
        bridge.process_batch(&[
            LogRecord {
                message: "db connection lost".to_owned(),
                level: LogLevel::Error,
                category: "app.db".to_owned(),
            },
            LogRecord {
                message: "query took 1.2s".to_owned(),
                level: LogLevel::Profile,
                category: "app.db.query".to_owned(),
            },
        ]);

        let messages = recorder.messages.lock();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0],
            (
                "db connection lost".to_owned(),
                Severity::Error,
                Some("app.db".to_owned())
            )
        );
        assert_eq!(
            messages[1],
            (
                "query took 1.2s".to_owned(),
                Severity::Debug,
                Some("app.db.query".to_owned())
            )
        );
    }
}
