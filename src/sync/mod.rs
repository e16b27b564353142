//! Persistence Adapters
//!
//! One contract, three strategies: poll a JSON file, browser local storage,
//! or a cloud document with push updates. The reconciliation rule lives in
//! the board; adapters only deliver catalogs.

mod cloud;
mod file_poll;
mod http;
mod local;
#[cfg(test)]
mod memory;

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::SyncResult;
use crate::models::Catalog;
use crate::settings::{Backend, BoardSettings};

pub use cloud::CloudSyncSource;
pub use file_poll::FilePollSource;
pub use local::LocalStorageSource;
#[cfg(test)]
pub use memory::MemorySource;

/// Called with every externally changed catalog
pub type ChangeHandler = Rc<dyn Fn(Catalog)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    FilePoll,
    Local,
    Cloud,
}

impl SourceKind {
    /// Whether another party can change the catalog behind our back
    pub fn has_remote(self) -> bool {
        matches!(self, SourceKind::FilePoll | SourceKind::Cloud)
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::FilePoll => "data.json",
            SourceKind::Local => "this device",
            SourceKind::Cloud => "cloud",
        }
    }
}

/// Uniform load/save/subscribe contract
#[async_trait(?Send)]
pub trait CatalogSource {
    fn kind(&self) -> SourceKind;

    /// Save after every admin edit (otherwise the admin publishes explicitly)
    fn autosave(&self) -> bool;

    /// `Ok(None)` when there is no stored catalog yet
    async fn load(&self) -> SyncResult<Option<Catalog>>;

    async fn save(&self, catalog: &Catalog) -> SyncResult<()>;

    /// Deliver external changes until the subscription is dropped
    fn subscribe(&self, on_change: ChangeHandler) -> Subscription;
}

/// Handle for an active subscription; dropping it unsubscribes
#[must_use = "dropping a subscription stops it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// For sources without an external change feed
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Build the configured adapter
pub fn connect(settings: &BoardSettings) -> Rc<dyn CatalogSource> {
    match &settings.backend {
        Backend::FilePoll { data_url, interval_ms } => {
            log::info!("using file backend {data_url} (poll every {interval_ms} ms)");
            Rc::new(FilePollSource::new(data_url.clone(), *interval_ms))
        }
        Backend::Local => {
            log::info!("using local storage backend");
            Rc::new(LocalStorageSource)
        }
        Backend::Cloud(cloud) => {
            log::info!("using cloud backend {}/{}", cloud.database_url, cloud.document_path);
            Rc::new(CloudSyncSource::new(cloud.clone()))
        }
    }
}
