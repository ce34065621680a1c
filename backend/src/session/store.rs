use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shared::PageNav;
use uuid::Uuid;

use crate::session::paginator;

/// Pagination cursors, keyed session id -> category id -> offset. One
/// session is minted per analysis; its cursors survive across page
/// navigations until the process restarts.
#[derive(Clone, Default)]
pub struct SessionStore {
    cursors: Arc<Mutex<HashMap<Uuid, HashMap<u32, usize>>>>,
}

impl SessionStore {
    /// Mints a session with no cursors; each category starts at 0 on
    /// first display.
    pub fn begin(&self) -> Uuid {
        let session = Uuid::new_v4();
        self.cursors
            .lock()
            .unwrap()
            .insert(session, HashMap::new());
        session
    }

    /// Applies one navigation step against a category's cursor and
    /// returns the stored offset. None for sessions this store never
    /// minted. If the product list shrank beneath the stored offset the
    /// cursor restarts at 0 before navigating.
    pub fn navigate(
        &self,
        session: Uuid,
        category_id: u32,
        nav: PageNav,
        len: usize,
    ) -> Option<usize> {
        let mut cursors = self.cursors.lock().unwrap();
        let session_cursors = cursors.get_mut(&session)?;

        let current = session_cursors.get(&category_id).copied().unwrap_or(0);
        let current = if current >= len { 0 } else { current };

        let next = match nav {
            PageNav::Stay => current,
            PageNav::Next => paginator::advance(current, len),
            PageNav::Prev => paginator::retreat(current, len),
        };

        session_cursors.insert(category_id, next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_display_starts_at_zero() {
        let store = SessionStore::default();
        let session = store.begin();
        assert_eq!(store.navigate(session, 0, PageNav::Stay, 5), Some(0));
    }

    #[test]
    fn cursors_persist_across_navigations() {
        let store = SessionStore::default();
        let session = store.begin();
        assert_eq!(store.navigate(session, 0, PageNav::Next, 5), Some(3));
        // A plain re-render keeps the stored offset.
        assert_eq!(store.navigate(session, 0, PageNav::Stay, 5), Some(3));
        assert_eq!(store.navigate(session, 0, PageNav::Next, 5), Some(1));
    }

    #[test]
    fn categories_do_not_share_cursors() {
        let store = SessionStore::default();
        let session = store.begin();
        store.navigate(session, 0, PageNav::Next, 5);
        assert_eq!(store.navigate(session, 7, PageNav::Stay, 5), Some(0));
    }

    #[test]
    fn sessions_are_independent() {
        let store = SessionStore::default();
        let first = store.begin();
        let second = store.begin();
        store.navigate(first, 0, PageNav::Next, 5);
        assert_eq!(store.navigate(second, 0, PageNav::Stay, 5), Some(0));
    }

    #[test]
    fn unknown_sessions_are_rejected() {
        let store = SessionStore::default();
        assert_eq!(store.navigate(Uuid::new_v4(), 0, PageNav::Stay, 5), None);
    }

    #[test]
    fn shrunken_lists_reset_the_cursor() {
        let store = SessionStore::default();
        let session = store.begin();
        assert_eq!(store.navigate(session, 0, PageNav::Next, 9), Some(3));
        assert_eq!(store.navigate(session, 0, PageNav::Next, 9), Some(6));
        // The store now returns only 4 items; 6 is out of range.
        assert_eq!(store.navigate(session, 0, PageNav::Stay, 4), Some(0));
    }

    #[test]
    fn empty_lists_stay_at_zero() {
        let store = SessionStore::default();
        let session = store.begin();
        assert_eq!(store.navigate(session, 3, PageNav::Next, 0), Some(0));
        assert_eq!(store.navigate(session, 3, PageNav::Prev, 0), Some(0));
    }
}
