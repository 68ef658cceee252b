//! "Show more" and infinite-scroll pagination.
//!
//! ```text
//!            request / sentinel visible
//!   Idle ─────────────────────────────▶ Loading
//!    ▲                                    │ complete (+batch, clamped)
//!    └──────────── has more ◀─────────────┤
//!                                         ▼
//!                                     Exhausted  (until filters relax)
//! ```
//!
//! Only one load may be in flight; extra requests while `Loading` are dropped.

use std::time::Duration;

use super::store::{CountUpdate, FilterSync};
use super::view::ListingView;

/// Products added per load.
pub const LOAD_MORE_BATCH: usize = 10;

/// Pause before revealing the next batch after the scroll sentinel appears.
pub const LOAD_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Exhausted,
}

/// Proof that a load was started; hand it back to [`LoadMoreTrigger::complete`].
#[derive(Debug)]
#[must_use = "a load in flight blocks further loads until completed or cancelled"]
pub struct LoadTicket {
    _private: (),
}

/// Single-flight pagination trigger for one listing.
#[derive(Debug, Clone)]
pub struct LoadMoreTrigger {
    batch: usize,
    delay: Duration,
    in_flight: bool,
}

impl Default for LoadMoreTrigger {
    fn default() -> Self {
        Self::new(LOAD_MORE_BATCH, LOAD_DELAY)
    }
}

impl LoadMoreTrigger {
    #[must_use]
    pub const fn new(batch: usize, delay: Duration) -> Self {
        Self {
            batch,
            delay,
            in_flight: false,
        }
    }

    pub fn state<S: FilterSync>(&self, view: &mut ListingView<S>) -> LoadState {
        if self.in_flight {
            LoadState::Loading
        } else if view.has_more_products() {
            LoadState::Idle
        } else {
            LoadState::Exhausted
        }
    }

    /// Start a load if idle. Returns `None` while loading or exhausted.
    pub fn request<S: FilterSync>(&mut self, view: &mut ListingView<S>) -> Option<LoadTicket> {
        if self.in_flight {
            tracing::trace!("load already in flight, ignoring trigger");
            return None;
        }
        if !view.has_more_products() {
            return None;
        }
        self.in_flight = true;
        Some(LoadTicket { _private: () })
    }

    /// Finish a load: advance the cursor by one batch, clamped to the
    /// filtered length.
    pub fn complete<S: FilterSync>(
        &mut self,
        ticket: LoadTicket,
        view: &mut ListingView<S>,
    ) -> LoadState {
        drop(ticket);
        self.in_flight = false;

        let total = view.filtered_len();
        let batch = self.batch;
        view.set_display_count(CountUpdate::with(move |prev| {
            prev.saturating_add(batch).min(total).max(prev)
        }));
        tracing::debug!(
            display_count = view.store().display_count(),
            total,
            "loaded more products"
        );

        self.state(view)
    }

    /// Abandon a load without advancing the cursor.
    pub fn cancel(&mut self, ticket: LoadTicket) {
        drop(ticket);
        self.in_flight = false;
    }

    /// Click path: load the next batch immediately. Returns whether anything loaded.
    pub fn show_more<S: FilterSync>(&mut self, view: &mut ListingView<S>) -> bool {
        match self.request(view) {
            Some(ticket) => {
                self.complete(ticket, view);
                true
            }
            None => false,
        }
    }

    /// Scroll path: the sentinel entered the viewport. Waits the smoothing
    /// delay, then loads the next batch. Returns whether anything loaded.
    pub async fn on_sentinel_visible<S: FilterSync>(&mut self, view: &mut ListingView<S>) -> bool {
        let Some(ticket) = self.request(view) else {
            return false;
        };
        let delay = self.delay;
        let mut pending = PendingLoad {
            trigger: self,
            ticket: Some(ticket),
        };
        tokio::time::sleep(delay).await;
        pending.finish(view);
        true
    }
}

/// A load waiting out the delay. Dropping it before `finish` releases the
/// single-flight guard.
struct PendingLoad<'a> {
    trigger: &'a mut LoadMoreTrigger,
    ticket: Option<LoadTicket>,
}

impl PendingLoad<'_> {
    fn finish<S: FilterSync>(&mut self, view: &mut ListingView<S>) {
        if let Some(ticket) = self.ticket.take() {
            self.trigger.complete(ticket, view);
        }
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            tracing::debug!("scroll load dropped before completing");
            self.trigger.cancel(ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use heirloom_core::Product;

    use super::super::store::INITIAL_PAGE_SIZE;
    use super::*;

    fn catalog(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| Product::new(format!("piece-{i}"), format!("Piece {i}"), 1_000))
            .collect()
    }

    #[test]
    fn test_show_more_clamps_to_filtered_length() {
        let mut view = ListingView::local(catalog(12));
        let mut trigger = LoadMoreTrigger::default();

        assert_eq!(trigger.state(&mut view), LoadState::Idle);
        assert!(trigger.show_more(&mut view));
        assert_eq!(view.store().display_count(), 12);
        assert_eq!(trigger.state(&mut view), LoadState::Exhausted);
        assert!(!trigger.show_more(&mut view));
    }

    #[test]
    fn test_second_request_while_loading_is_ignored() {
        let mut view = ListingView::local(catalog(40));
        let mut trigger = LoadMoreTrigger::default();

        let ticket = trigger.request(&mut view);
        assert!(ticket.is_some());
        assert_eq!(trigger.state(&mut view), LoadState::Loading);
        assert!(trigger.request(&mut view).is_none());

        if let Some(ticket) = ticket {
            assert_eq!(trigger.complete(ticket, &mut view), LoadState::Idle);
        }
        assert_eq!(view.store().display_count(), 20);
    }

    #[test]
    fn test_cancel_releases_guard_without_advancing() {
        let mut view = ListingView::local(catalog(40));
        let mut trigger = LoadMoreTrigger::default();

        if let Some(ticket) = trigger.request(&mut view) {
            trigger.cancel(ticket);
        }
        assert_eq!(view.store().display_count(), INITIAL_PAGE_SIZE);
        assert_eq!(trigger.state(&mut view), LoadState::Idle);
    }

    #[test]
    fn test_exhausted_until_filters_relax() {
        let mut view = ListingView::local(catalog(30));
        let mut trigger = LoadMoreTrigger::default();

        view.store_mut().set_search_text("piece 2");
        assert_eq!(view.filtered_len(), 11);
        assert!(trigger.show_more(&mut view));
        assert_eq!(trigger.state(&mut view), LoadState::Exhausted);

        view.store_mut().set_search_text("");
        assert_eq!(trigger.state(&mut view), LoadState::Idle);
        assert_eq!(view.store().display_count(), INITIAL_PAGE_SIZE);
    }

    #[test]
    fn test_empty_listing_is_exhausted() {
        let mut view = ListingView::local(Vec::new());
        let mut trigger = LoadMoreTrigger::default();
        assert_eq!(trigger.state(&mut view), LoadState::Exhausted);
        assert!(trigger.request(&mut view).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentinel_waits_for_delay() {
        let mut view = ListingView::local(catalog(25));
        let mut trigger = LoadMoreTrigger::default();

        let started = tokio::time::Instant::now();
        assert!(trigger.on_sentinel_visible(&mut view).await);
        assert!(started.elapsed() >= LOAD_DELAY);
        assert_eq!(view.store().display_count(), 20);

        assert!(trigger.on_sentinel_visible(&mut view).await);
        assert_eq!(view.store().display_count(), 25);
        assert!(!trigger.on_sentinel_visible(&mut view).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_scroll_load_releases_guard() {
        let mut view = ListingView::local(catalog(40));
        let mut trigger = LoadMoreTrigger::default();

        let result = tokio::time::timeout(
            Duration::from_millis(10),
            trigger.on_sentinel_visible(&mut view),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(view.store().display_count(), INITIAL_PAGE_SIZE);
        assert_eq!(trigger.state(&mut view), LoadState::Idle);

        assert!(trigger.show_more(&mut view));
        assert_eq!(view.store().display_count(), 20);
    }
}
