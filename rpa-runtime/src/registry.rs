//! Named singleton registry for external-service clients.
//!
//! Handles are constructed lazily on first `get` and live for the process
//! lifetime. Construction is memoized under a synchronous lock with no await
//! point between the existence check and the cache write, so concurrent
//! first-accesses for the same name always observe one handle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

use crate::error::{Result, RuntimeError};

/// A named singleton wrapping an external-service client.
///
/// Every capability call goes through [`client`](Self::client), which fails
/// with [`RuntimeError::Uninitialised`] until [`initialise`](Self::initialise)
/// binds a client. Re-initialising replaces the bound client without
/// changing the handle's identity.
pub struct ResourceHandle<C> {
    name: String,
    client: RwLock<Option<Arc<C>>>,
}

impl<C> ResourceHandle<C> {
    fn new(name: String) -> Self {
        Self {
            name,
            client: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_initialised(&self) -> bool {
        self.client.read().unwrap().is_some()
    }

    /// Bind (or rebind) the client this handle fronts.
    pub fn initialise(&self, client: C) {
        debug!(resource = %self.name, "initialising resource");
        *self.client.write().unwrap() = Some(Arc::new(client));
    }

    /// The bound client.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Uninitialised`] naming this resource when no client
    /// has been bound yet.
    pub fn client(&self) -> Result<Arc<C>> {
        self.client
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| RuntimeError::Uninitialised {
                resource: self.name.clone(),
            })
    }
}

/// Registry of lazily constructed, process-lifetime resource handles.
///
/// # Example
///
/// ```ignore
/// use rpa_runtime::registry::ResourceRegistry;
///
/// let registry: ResourceRegistry<DriveConnector> = ResourceRegistry::new();
/// let handle = registry.get("drive");
/// handle.initialise(DriveConnector::new(http, credentials));
/// let drive = handle.client()?;
/// ```
pub struct ResourceRegistry<C> {
    handles: Mutex<HashMap<String, Arc<ResourceHandle<C>>>>,
}

impl<C> ResourceRegistry<C> {
    pub fn new() -> Self {
        Self {
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Return the handle for `name`, constructing it on first access.
    ///
    /// Idempotent: repeated and concurrent calls return the same `Arc`.
    pub fn get(&self, name: &str) -> Arc<ResourceHandle<C>> {
        let mut handles = self.handles.lock().unwrap();
        handles
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(resource = name, "constructing resource handle");
                Arc::new(ResourceHandle::new(name.to_string()))
            })
            .clone()
    }

    /// Bind a client to the named handle, constructing the handle first if
    /// needed. Idempotent per handle: rebinding keeps the handle identity.
    pub fn initialise(&self, name: &str, client: C) {
        self.get(name).initialise(client);
    }
}

impl<C> Default for ResourceRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
