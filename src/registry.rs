use crate::{ClientConfig, Error, TrackerClient};
use std::{collections::HashMap, sync::Arc};

/// The well-known fallback client key.
pub const DEFAULT_CLIENT: &str = "default";

/// Constructs client handles from configuration entries. The seam between
/// the registry and the wrapped client library.
pub trait ClientFactory: Send + Sync {
    fn create(&self, key: &str, config: &ClientConfig) -> Result<Arc<dyn TrackerClient>, Error>;
}

impl<F> ClientFactory for F
where
    F: Fn(&str, &ClientConfig) -> Result<Arc<dyn TrackerClient>, Error> + Send + Sync,
{
    fn create(&self, key: &str, config: &ClientConfig) -> Result<Arc<dyn TrackerClient>, Error> {
        (self)(key, config)
    }
}

/// Lazily constructs and caches one client handle per configured key.
pub struct ClientRegistry {
    configs: HashMap<String, ClientConfig>,
    factory: Box<dyn ClientFactory>,
    cache: parking_lot::Mutex<HashMap<String, Arc<dyn TrackerClient>>>,
}

impl ClientRegistry {
    pub fn new(
        configs: HashMap<String, ClientConfig>,
        factory: impl ClientFactory + 'static,
    ) -> Self {
        Self {
            configs,
            factory: Box::new(factory),
            cache: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached handle for `key`, constructing it on first use.
    ///
    /// Construction happens under the cache lock, so at most one handle is
    /// ever built per key for the lifetime of this registry.
    pub fn get_client(&self, key: &str) -> Result<Arc<dyn TrackerClient>, Error> {
        let mut cache = self.cache.lock();

        if let Some(client) = cache.get(key) {
            return Ok(client.clone());
        }

        let client = self.build(key)?;
        cache.insert(key.to_owned(), client.clone());
        Ok(client)
    }

    /// Shorthand for [`get_client`](Self::get_client) with [`DEFAULT_CLIENT`].
    pub fn default_client(&self) -> Result<Arc<dyn TrackerClient>, Error> {
        self.get_client(DEFAULT_CLIENT)
    }

    /// Constructs a fresh handle for `key`, bypassing the cache entirely.
    pub fn create_client(&self, key: &str) -> Result<Arc<dyn TrackerClient>, Error> {
        self.build(key)
    }

    fn build(&self, key: &str) -> Result<Arc<dyn TrackerClient>, Error> {
        match self.configs.get(key) {
            Some(config) => self.factory.create(key, config),
            // The default client may be left unconfigured, yielding a client
            // in its library-default inert state. Any other missing key is a
            // configuration error.
            None if key == DEFAULT_CLIENT => self.factory.create(key, &ClientConfig::default()),
            None => Err(Error::UnknownClient(key.to_owned())),
        }
    }
}
