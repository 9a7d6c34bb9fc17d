//! Optimistic list state for the entity list views.
//!
//! The machine is `idle -> submitting -> (reconciled | error)`. Create and
//! update refetch the whole list on success (one round trip buys
//! consistency; there is no merge logic). Delete removes the item locally
//! without a refetch. A failed request leaves the local items untouched so
//! the user can retry without losing anything.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyncPhase {
    #[default]
    Idle,
    Submitting,
    /// Last request failed; the message is shown to the user.
    Error(String),
}

#[derive(Clone, Debug, Default)]
pub struct ListSync<T> {
    items: Vec<T>,
    phase: SyncPhase,
}

impl<T> ListSync<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            items: initial,
            phase: SyncPhase::Idle,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn phase(&self) -> &SyncPhase {
        &self.phase
    }

    /// Submit controls stay disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        self.phase != SyncPhase::Submitting
    }

    /// Mark a request as in flight. Returns `false` (and changes nothing)
    /// when one already is, so double submission is impossible.
    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.phase = SyncPhase::Submitting;
        true
    }

    /// Server-confirmed create/update: replace the list with the refetched
    /// one.
    pub fn reconcile(&mut self, fresh: Vec<T>) {
        self.items = fresh;
        self.phase = SyncPhase::Idle;
    }

    /// Server-confirmed delete: drop matching items locally, no refetch.
    pub fn remove_local(&mut self, matches: impl Fn(&T) -> bool) {
        self.items.retain(|item| !matches(item));
        self.phase = SyncPhase::Idle;
    }

    /// Failed request: keep the local items so nothing the user typed or
    /// saw is lost.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = SyncPhase::Error(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_submit_is_blocked_while_in_flight() {
        let mut sync = ListSync::new(vec![1, 2, 3]);
        assert!(sync.begin_submit());
        assert!(!sync.can_submit());
        assert!(!sync.begin_submit());
    }

    #[test]
    fn reconcile_replaces_items_and_returns_to_idle() {
        let mut sync = ListSync::new(vec![1]);
        sync.begin_submit();
        sync.reconcile(vec![1, 2]);
        assert_eq!(sync.items(), &[1, 2]);
        assert_eq!(*sync.phase(), SyncPhase::Idle);
        assert!(sync.can_submit());
    }

    #[test]
    fn failure_preserves_local_items() {
        let mut sync = ListSync::new(vec![10, 20]);
        sync.begin_submit();
        sync.fail("server unavailable");
        assert_eq!(sync.items(), &[10, 20]);
        assert_eq!(
            *sync.phase(),
            SyncPhase::Error("server unavailable".to_string())
        );
        // The user may retry straight away.
        assert!(sync.can_submit());
    }

    #[test]
    fn optimistic_delete_removes_only_matches() {
        let mut sync = ListSync::new(vec![1, 2, 3]);
        sync.begin_submit();
        sync.remove_local(|item| *item == 2);
        assert_eq!(sync.items(), &[1, 3]);
        assert_eq!(*sync.phase(), SyncPhase::Idle);
    }
}
