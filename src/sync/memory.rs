//! In-memory source for exercising the sync loop without a browser

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use super::{CatalogSource, ChangeHandler, SourceKind, Subscription};
use crate::error::SyncResult;
use crate::models::Catalog;

#[derive(Default)]
pub struct MemorySource {
    stored: RefCell<Option<Catalog>>,
    listeners: Rc<RefCell<Vec<(usize, ChangeHandler)>>>,
    next_listener: Cell<usize>,
    saves: Cell<usize>,
}

impl MemorySource {
    pub fn with(catalog: Catalog) -> Self {
        let source = Self::default();
        *source.stored.borrow_mut() = Some(catalog);
        source
    }

    /// Simulate another writer changing the stored catalog
    pub fn push(&self, catalog: Catalog) {
        *self.stored.borrow_mut() = Some(catalog.clone());
        let listeners: Vec<ChangeHandler> =
            self.listeners.borrow().iter().map(|(_, h)| h.clone()).collect();
        for handler in listeners {
            handler(catalog.clone());
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn stored(&self) -> Option<Catalog> {
        self.stored.borrow().clone()
    }
}

#[async_trait(?Send)]
impl CatalogSource for MemorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Cloud
    }

    fn autosave(&self) -> bool {
        true
    }

    async fn load(&self) -> SyncResult<Option<Catalog>> {
        Ok(self.stored.borrow().clone())
    }

    async fn save(&self, catalog: &Catalog) -> SyncResult<()> {
        *self.stored.borrow_mut() = Some(catalog.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn subscribe(&self, on_change: ChangeHandler) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, on_change));

        let listeners = self.listeners.clone();
        Subscription::new(move || listeners.borrow_mut().retain(|(i, _)| *i != id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::form::ItemForm;
    use crate::models::Item;
    use crate::reconcile::Reconciliation;

    fn seed() -> Catalog {
        Catalog {
            items: vec![Item::new(1, "Cola", "Bar", 2.0)],
            categories: vec!["Bar".to_string()],
            ..Default::default()
        }
    }

    fn renamed(name: &str) -> Catalog {
        let mut catalog = seed();
        catalog.items[0].name = name.to_string();
        catalog
    }

    /// Wire a board to a source the way the app does
    fn attach(board: &Rc<RefCell<Board>>, source: &MemorySource) -> Subscription {
        let board = board.clone();
        source.subscribe(Rc::new(move |catalog| {
            board.borrow_mut().apply_inbound(catalog, false);
        }))
    }

    #[tokio::test]
    async fn test_inbound_updates_flow_into_board() {
        let source = MemorySource::with(seed());
        let board = Rc::new(RefCell::new(Board::default()));
        let initial = source.load().await.unwrap().unwrap();
        board.borrow_mut().apply_inbound(initial, true);

        let _sub = attach(&board, &source);
        source.push(renamed("Cola Zero"));
        assert_eq!(board.borrow().catalog().items[0].name, "Cola Zero");
    }

    #[tokio::test]
    async fn test_edit_in_progress_holds_updates_until_it_closes() {
        let source = MemorySource::with(seed());
        let board = Rc::new(RefCell::new(Board::default()));
        board.borrow_mut().apply_inbound(seed(), true);
        board.borrow_mut().request_admin(Some("admin"));
        assert!(board.borrow_mut().start_edit(1));

        let _sub = attach(&board, &source);
        source.push(renamed("Remote Cola"));
        source.push(renamed("Remote Cola Zero"));
        assert_eq!(board.borrow().catalog(), &seed());

        board.borrow_mut().cancel_edit();
        assert_eq!(board.borrow().catalog().items[0].name, "Remote Cola Zero");
    }

    #[tokio::test]
    async fn test_leaving_admin_resyncs_from_source() {
        let source = MemorySource::with(seed());
        let board = Rc::new(RefCell::new(Board::default()));
        board.borrow_mut().apply_inbound(seed(), true);
        board.borrow_mut().request_admin(Some("admin"));
        assert!(board.borrow_mut().start_edit(1));

        // written while nobody was subscribed
        source.push(renamed("Remote Cola"));
        board.borrow_mut().leave_admin();
        assert_eq!(board.borrow().catalog(), &seed());

        let latest = source.load().await.unwrap().unwrap();
        let outcome = board.borrow_mut().apply_inbound(latest, true);
        assert_eq!(outcome, Reconciliation::Applied);
        assert_eq!(board.borrow().catalog().items[0].name, "Remote Cola");
    }

    #[tokio::test]
    async fn test_editing_does_not_block_saves() {
        let source = MemorySource::with(seed());
        let mut board = Board::default();
        board.apply_inbound(seed(), true);
        board.start_edit(1);
        board
            .submit_item(&ItemForm {
                name: "Cola Light".to_string(),
                price: "2".to_string(),
                category: "Bar".to_string(),
                ..Default::default()
            })
            .unwrap();

        source.save(board.catalog()).await.unwrap();
        assert_eq!(source.saves(), 1);
        assert_eq!(source.stored().unwrap().items[0].name, "Cola Light");
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let source = MemorySource::with(seed());
        let board = Rc::new(RefCell::new(Board::default()));
        let sub = attach(&board, &source);
        assert_eq!(source.listener_count(), 1);
        sub.unsubscribe();
        assert_eq!(source.listener_count(), 0);

        source.push(renamed("Ignored"));
        assert!(board.borrow().catalog().items.is_empty());
    }
}
