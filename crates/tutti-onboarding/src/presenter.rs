//! Presentation contract between display state and whatever renders it.

use crate::deferred::DeferredOnboarding;
use crate::displayable::Displayable;

/// Renders a displayable from an anchor inside a host.
///
/// Returns whether presentation started. Once the displayable has actually
/// been shown the presenter is responsible for marking it displayed.
pub trait Presenter<D: ?Sized> {
    type Host: ?Sized;
    type Anchor: ?Sized;

    fn present(&mut self, displayable: &D, host: &mut Self::Host, anchor: &Self::Anchor) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationOutcome {
    Presented,
    AlreadyDisplayed,
    Declined,
    Deferred { remaining: i64 },
}

impl PresentationOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Presented => "presented",
            Self::AlreadyDisplayed => "already_displayed",
            Self::Declined => "declined",
            Self::Deferred { .. } => "deferred",
        }
    }
}

/// Presents `displayable` unless it has already been displayed.
pub fn present_once<D, P>(
    presenter: &mut P,
    displayable: &D,
    host: &mut P::Host,
    anchor: &P::Anchor,
) -> PresentationOutcome
where
    D: Displayable + ?Sized,
    P: Presenter<D>,
{
    if displayable.has_been_displayed() {
        tracing::debug!(
            key = %displayable.display_state_key(),
            "skipping presentation of displayed item"
        );
        return PresentationOutcome::AlreadyDisplayed;
    }
    if presenter.present(displayable, host, anchor) {
        PresentationOutcome::Presented
    } else {
        PresentationOutcome::Declined
    }
}

/// Registers one presentation attempt and presents once the deferred item has
/// become eligible.
pub fn present_deferred<D, P>(
    presenter: &mut P,
    displayable: &D,
    host: &mut P::Host,
    anchor: &P::Anchor,
) -> PresentationOutcome
where
    D: DeferredOnboarding + ?Sized,
    P: Presenter<D>,
{
    if displayable.has_been_displayed() {
        return PresentationOutcome::AlreadyDisplayed;
    }
    displayable.register_presentation_attempt();
    if !displayable.should_be_presented() {
        return PresentationOutcome::Deferred {
            remaining: displayable.remaining_presentation_attempts(),
        };
    }
    present_once(presenter, displayable, host, anchor)
}

#[cfg(test)]
mod tests {
    use super::{present_deferred, present_once, PresentationOutcome, Presenter};
    use crate::displayable::{Displayable, SharedDisplayStateStore};
    use crate::hint::{Hint, StandardHint};
    use std::sync::Arc;
    use tutti_store::InMemoryDisplayStateStore;

    #[derive(Default)]
    struct RecordingPresenter {
        accept: bool,
        presented: Vec<String>,
    }

    impl<H: Hint + ?Sized> Presenter<H> for RecordingPresenter {
        type Host = Vec<String>;
        type Anchor = str;

        fn present(&mut self, hint: &H, host: &mut Vec<String>, anchor: &str) -> bool {
            if !self.accept {
                return false;
            }
            self.presented.push(hint.identifier().to_string());
            host.push(format!("{anchor}: {}", hint.text()));
            hint.mark_displayed();
            true
        }
    }

    fn store() -> SharedDisplayStateStore {
        Arc::new(InMemoryDisplayStateStore::new())
    }

    #[test]
    fn functional_present_once_presents_then_reports_already_displayed() {
        let hint = StandardHint::new(store(), "hint", "Tap to edit.");
        let mut presenter = RecordingPresenter {
            accept: true,
            ..RecordingPresenter::default()
        };
        let mut host = Vec::new();

        assert_eq!(
            present_once(&mut presenter, &hint, &mut host, "cell-0"),
            PresentationOutcome::Presented
        );
        assert_eq!(
            present_once(&mut presenter, &hint, &mut host, "cell-0"),
            PresentationOutcome::AlreadyDisplayed
        );
        assert_eq!(presenter.presented, vec!["hint".to_string()]);
        assert_eq!(host, vec!["cell-0: Tap to edit.".to_string()]);
    }

    #[test]
    fn unit_declined_presentation_leaves_item_undisplayed() {
        let hint = StandardHint::new(store(), "hint", "Tap to edit.");
        let mut presenter = RecordingPresenter::default();
        assert_eq!(
            present_once(&mut presenter, &hint, &mut Vec::new(), "cell-0"),
            PresentationOutcome::Declined
        );
        assert!(!hint.has_been_displayed());
    }

    #[test]
    fn functional_present_deferred_waits_for_required_attempts() {
        let hint = StandardHint::new(store(), "later", "Long-press for options.").deferred(3);
        let mut presenter = RecordingPresenter {
            accept: true,
            ..RecordingPresenter::default()
        };
        let mut host = Vec::new();

        assert_eq!(
            present_deferred(&mut presenter, &hint, &mut host, "toolbar"),
            PresentationOutcome::Deferred { remaining: 2 }
        );
        assert_eq!(
            present_deferred(&mut presenter, &hint, &mut host, "toolbar"),
            PresentationOutcome::Deferred { remaining: 1 }
        );
        assert_eq!(
            present_deferred(&mut presenter, &hint, &mut host, "toolbar"),
            PresentationOutcome::Presented
        );
        assert_eq!(
            present_deferred(&mut presenter, &hint, &mut host, "toolbar"),
            PresentationOutcome::AlreadyDisplayed
        );
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn unit_outcome_labels_are_stable() {
        assert_eq!(PresentationOutcome::Presented.as_str(), "presented");
        assert_eq!(
            PresentationOutcome::Deferred { remaining: 1 }.as_str(),
            "deferred"
        );
    }
}
