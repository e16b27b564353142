//! File Poll Source
//!
//! Reads `data.json` from the serving origin and re-reads it on a fixed
//! interval. Saving is a download: the admin replaces the file by hand.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

use super::{http, CatalogSource, ChangeHandler, SourceKind, Subscription};
use crate::browser;
use crate::document::{self, DOCUMENT_FILE_NAME};
use crate::error::{SyncError, SyncResult};
use crate::models::Catalog;

#[derive(Clone)]
pub struct FilePollSource {
    data_url: String,
    interval_ms: u32,
    /// Last catalog read from the file
    last_known: Rc<RefCell<Option<Catalog>>>,
}

impl FilePollSource {
    pub fn new(data_url: String, interval_ms: u32) -> Self {
        Self {
            data_url,
            interval_ms,
            last_known: Rc::new(RefCell::new(None)),
        }
    }

    /// Record a freshly read catalog; true when it differs from the last one
    fn remember(&self, catalog: &Catalog) -> bool {
        let mut last = self.last_known.borrow_mut();
        if last.as_ref() == Some(catalog) {
            return false;
        }
        *last = Some(catalog.clone());
        true
    }

    /// One poll cycle: the catalog if the file changed since the last read
    async fn poll_once(&self) -> SyncResult<Option<Catalog>> {
        let Some(catalog) = self.fetch().await? else {
            return Ok(None);
        };
        Ok(self.remember(&catalog).then_some(catalog))
    }

    async fn fetch(&self) -> SyncResult<Option<Catalog>> {
        let url = http::cache_busted(&self.data_url, chrono::Utc::now().timestamp_millis());
        let response = http::get(&url).await?;
        if response.status == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(SyncError::Status(response.status));
        }
        Ok(Some(document::parse(&response.body)?.catalog))
    }
}

#[async_trait(?Send)]
impl CatalogSource for FilePollSource {
    fn kind(&self) -> SourceKind {
        SourceKind::FilePoll
    }

    fn autosave(&self) -> bool {
        false
    }

    async fn load(&self) -> SyncResult<Option<Catalog>> {
        let catalog = self.fetch().await?;
        if let Some(catalog) = &catalog {
            self.remember(catalog);
        }
        Ok(catalog)
    }

    async fn save(&self, catalog: &Catalog) -> SyncResult<()> {
        let text = document::to_json(catalog)?;
        browser::download_text(DOCUMENT_FILE_NAME, &text).map_err(SyncError::Storage)
    }

    fn subscribe(&self, on_change: ChangeHandler) -> Subscription {
        let source = self.clone();
        let interval = Interval::new(self.interval_ms, move || {
            let source = source.clone();
            let on_change = on_change.clone();
            spawn_local(async move {
                match source.poll_once().await {
                    Ok(Some(catalog)) => {
                        log::info!("{} changed, {} items", source.data_url, catalog.items.len());
                        on_change(catalog);
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("poll of {} failed: {e}", source.data_url),
                }
            });
        });
        Subscription::new(move || drop(interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    #[test]
    fn test_remember_reports_changes_only() {
        let source = FilePollSource::new("data.json".to_string(), 2_000);
        let mut catalog = Catalog {
            items: vec![Item::new(1, "Cola", "Bar", 2.0)],
            ..Default::default()
        };

        assert!(source.remember(&catalog));
        assert!(!source.remember(&catalog.clone()));

        catalog.items[0].price = 2.5;
        assert!(source.remember(&catalog));
        assert!(!source.remember(&catalog));
    }
}
