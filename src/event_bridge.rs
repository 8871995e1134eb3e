use crate::{
    ClientRegistry, Config, ErrorReport, LastError, MemoryReserve, ShutdownFlag, TrackerClient,
};
use std::sync::Arc;

/// The host framework's lifecycle registration surface. The host implements
/// this and delivers each occurrence to the registered handler; handlers are
/// synchronous and nothing they produce feeds back into request handling.
pub trait LifecycleHooks {
    /// An exception escaped the request handler.
    fn on_exception(&mut self, handler: Box<dyn Fn(&ErrorReport) + Send + Sync>);

    /// A non-fatal runtime error (warning, notice, ...) was raised.
    fn on_error(&mut self, handler: Box<dyn Fn(&ErrorReport) + Send + Sync>);

    /// The request finished, normally or via a fatal error. The handler
    /// receives whatever the platform's last-error facility recorded.
    fn on_request_end(&mut self, handler: Box<dyn Fn(Option<&LastError>) + Send + Sync>);
}

/// Forwards lifecycle events to the registry's default client.
pub struct EventBridge {
    clients: Arc<ClientRegistry>,
    shutdown: Arc<ShutdownFlag>,
    reserve: MemoryReserve,
    capture_errors: bool,
}

impl EventBridge {
    pub fn new(config: &Config, clients: Arc<ClientRegistry>, shutdown: Arc<ShutdownFlag>) -> Self {
        Self {
            clients,
            shutdown,
            reserve: MemoryReserve::new(config.reserve_bytes),
            capture_errors: config.capture_errors,
        }
    }

    /// Registers the three lifecycle handlers on the host. Does nothing when
    /// automatic error capture is disabled in configuration.
    pub fn install(self: &Arc<Self>, hooks: &mut dyn LifecycleHooks) {
        if !self.capture_errors {
            return;
        }

        let bridge = self.clone();
        hooks.on_exception(Box::new(move |report| bridge.handle_exception(report)));

        let bridge = self.clone();
        hooks.on_error(Box::new(move |report| bridge.handle_error(report)));

        let bridge = self.clone();
        hooks.on_request_end(Box::new(move |last| bridge.handle_request_end(last)));
    }

    /// Re-arms the scratch reserve before the next request is processed.
    pub fn begin_request(&self) {
        self.reserve.rearm();
    }

    pub fn handle_exception(&self, report: &ErrorReport) {
        if let Some(client) = self.default_client() {
            client.capture_exception(report);
        }
    }

    pub fn handle_error(&self, report: &ErrorReport) {
        if let Some(client) = self.default_client() {
            client.capture_exception(report);
        }
    }

    /// End-of-request handling. Runs whether the request ended normally or
    /// died on a fatal error, in a fixed order: mark shutdown, free the
    /// scratch reserve, flush held-back errors, then report the last fatal
    /// error if its class was not already covered by the other hooks.
    pub fn handle_request_end(&self, last_error: Option<&LastError>) {
        self.shutdown.begin();
        self.reserve.release();

        let client = match self.default_client() {
            Some(client) => client,
            None => return,
        };

        client.send_unsent_errors();

        if let Some(last) = last_error {
            if last.class.reported_at_shutdown() {
                client.capture_exception(&ErrorReport::from(last));
            }
        }
    }

    fn default_client(&self) -> Option<Arc<dyn TrackerClient>> {
        match self.clients.default_client() {
            Ok(client) => Some(client),
            Err(e) => {
                debug_print!("unable to obtain default client: {}", e);
                None
            }
        }
    }
}
