//! Deferred onboarding: units that only become eligible after a number of
//! presentation attempts have been registered.

use tutti_store::DisplayStateStore;

use crate::displayable::Displayable;

/// Sub-key under which the attempt counter of a deferred unit is stored.
pub const PRESENTATION_ATTEMPTS_KEY: &str = "presentationAttempts";

/// A displayable that must be asked for `required_presentation_attempts`
/// times before it should be presented.
///
/// The counter saturates at the required count and every derived value is
/// recomputed from the store on access.
pub trait DeferredOnboarding: Displayable {
    fn required_presentation_attempts(&self) -> i64;

    /// Stored counter, with negative values read as zero.
    fn registered_presentation_attempts(&self) -> i64 {
        self.store()
            .get_int(&self.object_state_key(PRESENTATION_ATTEMPTS_KEY))
            .max(0)
    }

    fn remaining_presentation_attempts(&self) -> i64 {
        self.required_presentation_attempts()
            .saturating_sub(self.registered_presentation_attempts())
    }

    /// True once enough attempts are registered and the unit has not been
    /// displayed yet.
    fn should_be_presented(&self) -> bool {
        !self.has_been_displayed() && self.remaining_presentation_attempts() <= 0
    }

    /// Counts one more attempt; a no-op once the required count is reached.
    fn register_presentation_attempt(&self) {
        if self.remaining_presentation_attempts() <= 0 {
            return;
        }
        let key = self.object_state_key(PRESENTATION_ATTEMPTS_KEY);
        let registered = self.registered_presentation_attempts().saturating_add(1);
        self.store().set_int(&key, registered);
        tracing::debug!(
            key = %key,
            registered,
            required = self.required_presentation_attempts(),
            "registered presentation attempt"
        );
    }

    fn reset_presentation_attempts(&self) {
        self.store()
            .set_int(&self.object_state_key(PRESENTATION_ATTEMPTS_KEY), 0);
    }
}

/// Wraps any displayable with a required attempt count.
#[derive(Debug, Clone)]
pub struct Deferred<D> {
    inner: D,
    required_presentation_attempts: u32,
}

impl<D: Displayable> Deferred<D> {
    pub fn new(inner: D, required_presentation_attempts: u32) -> Self {
        Self {
            inner,
            required_presentation_attempts,
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Displayable> Displayable for Deferred<D> {
    fn type_tag(&self) -> &str {
        self.inner.type_tag()
    }

    fn identifier(&self) -> &str {
        self.inner.identifier()
    }

    fn user_id(&self) -> Option<&str> {
        self.inner.user_id()
    }

    fn store(&self) -> &dyn DisplayStateStore {
        self.inner.store()
    }
}

impl<D: Displayable> DeferredOnboarding for Deferred<D> {
    fn required_presentation_attempts(&self) -> i64 {
        i64::from(self.required_presentation_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::{Deferred, DeferredOnboarding, PRESENTATION_ATTEMPTS_KEY};
    use crate::displayable::{
        Displayable, DisplayableKind, DisplayableRecord, SharedDisplayStateStore,
    };
    use std::sync::Arc;
    use tutti_store::InMemoryDisplayStateStore;

    fn deferred_hint(store: SharedDisplayStateStore, required: u32) -> Deferred<DisplayableRecord> {
        Deferred::new(
            DisplayableRecord::of_kind(store, DisplayableKind::Hint, "deferred", None),
            required,
        )
    }

    #[test]
    fn unit_fresh_counter_reads_zero() {
        let hint = deferred_hint(Arc::new(InMemoryDisplayStateStore::new()), 5);
        assert_eq!(hint.registered_presentation_attempts(), 0);
        assert_eq!(hint.remaining_presentation_attempts(), 5);
    }

    #[test]
    fn functional_attempts_count_down_and_saturate() {
        let hint = deferred_hint(Arc::new(InMemoryDisplayStateStore::new()), 5);
        for _ in 0..3 {
            hint.register_presentation_attempt();
        }
        assert_eq!(hint.remaining_presentation_attempts(), 2);

        hint.register_presentation_attempt();
        hint.register_presentation_attempt();
        assert_eq!(hint.remaining_presentation_attempts(), 0);

        hint.register_presentation_attempt();
        assert_eq!(hint.remaining_presentation_attempts(), 0);
        assert_eq!(hint.registered_presentation_attempts(), 5);
    }

    #[test]
    fn functional_counter_never_exceeds_required() {
        let hint = deferred_hint(Arc::new(InMemoryDisplayStateStore::new()), 3);
        for _ in 0..40 {
            hint.register_presentation_attempt();
        }
        assert_eq!(hint.registered_presentation_attempts(), 3);
    }

    #[test]
    fn regression_should_be_presented_tracks_remaining_attempts_not_zero_requirement() {
        let hint = deferred_hint(Arc::new(InMemoryDisplayStateStore::new()), 5);
        for _ in 0..3 {
            hint.register_presentation_attempt();
        }
        assert!(!hint.should_be_presented());

        hint.register_presentation_attempt();
        hint.register_presentation_attempt();
        assert_eq!(hint.registered_presentation_attempts(), 5);
        assert!(hint.should_be_presented());

        hint.mark_displayed();
        assert!(!hint.should_be_presented());
    }

    #[test]
    fn unit_zero_required_attempts_is_immediately_eligible() {
        let hint = deferred_hint(Arc::new(InMemoryDisplayStateStore::new()), 0);
        assert!(hint.should_be_presented());
        hint.register_presentation_attempt();
        assert_eq!(hint.registered_presentation_attempts(), 0);
    }

    #[test]
    fn functional_counter_is_persisted_under_sub_key_and_shared_by_views() {
        let store: SharedDisplayStateStore = Arc::new(InMemoryDisplayStateStore::new());
        deferred_hint(store.clone(), 5).register_presentation_attempt();
        deferred_hint(store.clone(), 5).register_presentation_attempt();

        assert_eq!(
            store.get_int(&format!("tutti.hint.deferred.anonymous.{PRESENTATION_ATTEMPTS_KEY}")),
            2
        );
        assert!(!store.get_bool("tutti.hint.deferred.anonymous"));
        assert_eq!(deferred_hint(store, 5).remaining_presentation_attempts(), 3);
    }

    #[test]
    fn regression_lowered_requirement_does_not_grow_counter() {
        let store: SharedDisplayStateStore = Arc::new(InMemoryDisplayStateStore::new());
        let original = deferred_hint(store.clone(), 4);
        for _ in 0..4 {
            original.register_presentation_attempt();
        }

        let lowered = deferred_hint(store, 2);
        assert_eq!(lowered.remaining_presentation_attempts(), -2);
        lowered.register_presentation_attempt();
        assert_eq!(lowered.registered_presentation_attempts(), 4);
        assert!(lowered.should_be_presented());
    }

    #[test]
    fn regression_out_of_range_stored_counter_does_not_overflow() {
        let store: SharedDisplayStateStore = Arc::new(InMemoryDisplayStateStore::new());
        let hint = deferred_hint(store.clone(), 3);
        let counter_key = hint.object_state_key(PRESENTATION_ATTEMPTS_KEY);

        store.set_int(&counter_key, i64::MIN);
        assert_eq!(hint.registered_presentation_attempts(), 0);
        assert_eq!(hint.remaining_presentation_attempts(), 3);
        assert!(!hint.should_be_presented());
        hint.register_presentation_attempt();
        assert_eq!(store.get_int(&counter_key), 1);

        store.set_int(&counter_key, i64::MAX);
        assert_eq!(hint.remaining_presentation_attempts(), 3 - i64::MAX);
        hint.register_presentation_attempt();
        assert_eq!(store.get_int(&counter_key), i64::MAX);
        assert!(hint.should_be_presented());
    }

    #[test]
    fn unit_reset_presentation_attempts_restarts_countdown() {
        let hint = deferred_hint(Arc::new(InMemoryDisplayStateStore::new()), 2);
        hint.register_presentation_attempt();
        hint.register_presentation_attempt();
        hint.reset_presentation_attempts();
        assert_eq!(hint.remaining_presentation_attempts(), 2);
        assert!(!hint.should_be_presented());
    }

    #[test]
    fn unit_decorator_keeps_inner_identity() {
        let hint = deferred_hint(Arc::new(InMemoryDisplayStateStore::new()), 1);
        assert_eq!(hint.identifier(), hint.inner().identifier());
        assert_eq!(hint.display_state_key(), "tutti.hint.deferred.anonymous");
    }
}
