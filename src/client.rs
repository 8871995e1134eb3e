/// The surface of the wrapped error-tracking client. The concrete
/// implementation ([`SentryClient`](crate::SentryClient)) owns all
/// serialization, batching and delivery; nothing at this layer does.
pub trait TrackerClient: Send + Sync {
    /// Reports a captured error.
    fn capture_exception(&self, report: &ErrorReport);

    /// Reports a plain message at the given severity, optionally tagged
    /// with the log category it originated from.
    fn capture_message(&self, message: &str, severity: Severity, category: Option<&str>);

    /// Flushes anything the client has held back for batched sending.
    fn send_unsent_errors(&self);
}

/// Severity attached to captured messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Platform error classes, as reported by the host's error facility.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Fatal,
    Warning,
    Parse,
    Notice,
    CoreError,
    CoreWarning,
    CompileError,
    CompileWarning,
    UserError,
    UserWarning,
    UserNotice,
    Strict,
    Recoverable,
    Deprecated,
    UserDeprecated,
}

impl ErrorClass {
    /// Whether an error of this class is still worth reporting when it shows
    /// up as the platform's last recorded error at end of request. Classes
    /// outside this set were already delivered through the exception and
    /// runtime-error hooks while the request was running.
    pub fn reported_at_shutdown(self) -> bool {
        match self {
            Self::Fatal
            | Self::Parse
            | Self::CoreError
            | Self::CoreWarning
            | Self::CompileError
            | Self::CompileWarning
            | Self::Strict => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal error",
            Self::Warning => "warning",
            Self::Parse => "parse error",
            Self::Notice => "notice",
            Self::CoreError => "core error",
            Self::CoreWarning => "core warning",
            Self::CompileError => "compile error",
            Self::CompileWarning => "compile warning",
            Self::UserError => "user error",
            Self::UserWarning => "user warning",
            Self::UserNotice => "user notice",
            Self::Strict => "strict warning",
            Self::Recoverable => "recoverable error",
            Self::Deprecated => "deprecated",
            Self::UserDeprecated => "user deprecated",
        }
    }
}

/// The generic exception shape every capture path funnels into, whether it
/// started life as an unhandled exception, a runtime error, or the last
/// fatal error inspected at shutdown.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    /// Platform error class, when the report came from the error facility
    /// rather than an exception object
    pub class: Option<ErrorClass>,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            class: None,
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// Builds a report from an unhandled exception object.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// What the host's last-fatal-error query yields after abnormal termination.
#[derive(Clone, Debug)]
pub struct LastError {
    pub class: ErrorClass,
    pub message: String,
    pub file: String,
    pub line: u32,
}

impl From<&LastError> for ErrorReport {
    fn from(last: &LastError) -> Self {
        Self {
            class: Some(last.class),
            message: last.message.clone(),
            file: Some(last.file.clone()),
            line: Some(last.line),
        }
    }
}
