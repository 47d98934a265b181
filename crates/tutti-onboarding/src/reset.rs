//! Maintenance helpers that make onboarding units presentable again.

use tutti_store::{DisplayStateStore, KEY_PREFIX};

use crate::deferred::DeferredOnboarding;
use crate::displayable::Displayable;

/// Sets `has_been_displayed = false` on every item. Returns how many items
/// were displayed before the reset.
pub fn reset_display_state(displayables: &[&dyn Displayable]) -> usize {
    let mut previously_displayed = 0;
    for displayable in displayables {
        if displayable.has_been_displayed() {
            previously_displayed += 1;
        }
        displayable.reset_display_state();
    }
    tracing::debug!(
        items = displayables.len(),
        previously_displayed,
        "reset display state"
    );
    previously_displayed
}

/// Resets display flags and also zeroes the attempt counters of deferred
/// items. Returns the number of flags and counters that were not already
/// cleared.
pub fn reset_onboarding_state(
    displayables: &[&dyn Displayable],
    deferred: &[&dyn DeferredOnboarding],
) -> usize {
    let mut touched = reset_display_state(displayables);
    for item in deferred {
        if item.has_been_displayed() {
            touched += 1;
        }
        if item.registered_presentation_attempts() != 0 {
            touched += 1;
        }
        item.reset_display_state();
        item.reset_presentation_attempts();
    }
    touched
}

/// Removes every display state entry from `store`, including entries of
/// identities the caller no longer knows about.
pub fn clear_all_display_state(store: &dyn DisplayStateStore) -> usize {
    let prefix = format!("{KEY_PREFIX}.");
    let keys = store.keys_with_prefix(&prefix);
    let removed = keys.iter().filter(|key| store.remove(key)).count();
    tracing::debug!(removed, "cleared display state");
    removed
}
