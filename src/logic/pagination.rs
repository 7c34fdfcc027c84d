//! Per-controller pagination state: the page cursor and the in-flight guard.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Next page a controller will request.
///
/// Only mutated while the owning controller holds its [`LoadGuard`].
#[derive(Debug)]
pub struct PaginationCursor {
    page: AtomicU32,
}

impl PaginationCursor {
    /// Cursor positioned on `first_page` (clamped to at least 1).
    #[must_use]
    pub fn new(first_page: u32) -> Self {
        Self {
            page: AtomicU32::new(first_page.max(1)),
        }
    }

    /// Page most recently loaded.
    #[must_use]
    pub fn current(&self) -> u32 {
        self.page.load(Ordering::Acquire)
    }

    /// What: Move forward by `step` pages.
    ///
    /// Output:
    /// - `(previous, next)` so a failed fetch can restore `previous`.
    pub fn advance_by(&self, step: u32) -> (u32, u32) {
        let prev = self.page.fetch_add(step, Ordering::AcqRel);
        (prev, prev.saturating_add(step))
    }

    /// Move forward by one page.
    pub fn advance(&self) -> (u32, u32) {
        self.advance_by(1)
    }

    /// Put the cursor back on `page`.
    pub fn restore(&self, page: u32) {
        self.page.store(page.max(1), Ordering::Release);
    }
}

/// Single in-flight request flag of a controller.
#[derive(Debug, Default)]
pub struct LoadGuard {
    in_flight: AtomicBool,
}

/// Proof of holding a [`LoadGuard`]; releases it on drop.
#[derive(Debug)]
#[must_use = "the guard is released as soon as the permit is dropped"]
pub struct LoadPermit<'a> {
    guard: &'a LoadGuard,
}

impl LoadGuard {
    /// What: Claim the guard if no request is in flight.
    ///
    /// Output:
    /// - `Some(permit)` on success; `None` when another request holds it.
    ///
    /// Details:
    /// - The permit clears the flag when dropped, including on early return,
    ///   error propagation and future cancellation.
    pub fn try_acquire(&self) -> Option<LoadPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadPermit { guard: self })
    }

    /// Whether a request currently holds the guard.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for LoadPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_admits_one_holder_and_releases_on_drop() {
        let guard = LoadGuard::default();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_loading());
        assert!(guard.try_acquire().is_none());
        drop(permit);
        assert!(!guard.is_loading());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    /// What: Advance reports the pre-call page so it can be restored
    fn cursor_advance_and_restore() {
        let cursor = PaginationCursor::new(1);
        assert_eq!(cursor.advance(), (1, 2));
        assert_eq!(cursor.current(), 2);
        cursor.restore(1);
        assert_eq!(cursor.current(), 1);
        assert_eq!(cursor.advance_by(2), (1, 3));
        assert_eq!(PaginationCursor::new(0).current(), 1);
    }
}
