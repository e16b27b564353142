//! Reconciliation Rule
//!
//! Decides whether an inbound catalog (poll, stream, resync) may replace the
//! in-memory one. An open edit form blocks every non-forced update; nothing
//! is merged or queued.

use crate::models::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Inbound catalog replaced the current one
    Applied,
    /// Inbound catalog equals the current one; nothing to render
    Unchanged,
    /// Edit in progress; inbound catalog dropped
    Deferred,
}

/// Decide the fate of `inbound` against `current`
pub fn reconcile(current: &Catalog, inbound: &Catalog, editing: bool, force: bool) -> Reconciliation {
    if force {
        return Reconciliation::Applied;
    }
    if editing {
        return Reconciliation::Deferred;
    }
    if current == inbound {
        Reconciliation::Unchanged
    } else {
        Reconciliation::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn catalog_with(name: &str) -> Catalog {
        Catalog {
            items: vec![Item::new(1, name, "Bar", 2.0)],
            categories: vec!["Bar".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_editing_blocks_inbound() {
        let current = catalog_with("Cola");
        let inbound = catalog_with("Cola Zero");
        assert_eq!(reconcile(&current, &inbound, true, false), Reconciliation::Deferred);
    }

    #[test]
    fn test_force_always_applies() {
        let current = catalog_with("Cola");
        assert_eq!(reconcile(&current, &catalog_with("Cola Zero"), true, true), Reconciliation::Applied);
        assert_eq!(reconcile(&current, &current.clone(), false, true), Reconciliation::Applied);
    }

    #[test]
    fn test_identical_inbound_is_unchanged() {
        let current = catalog_with("Cola");
        assert_eq!(reconcile(&current, &current.clone(), false, false), Reconciliation::Unchanged);
        assert_eq!(
            reconcile(&current, &catalog_with("Water"), false, false),
            Reconciliation::Applied
        );
    }
}
