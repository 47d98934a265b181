use std::collections::BTreeMap;
use std::sync::Arc;

use tutti_onboarding::{
    present_deferred, present_once, reset_display_state, DeferredOnboarding, Displayable, Hint,
    LocalizedTutorial, PageTextSource, PresentationOutcome, Presenter, SharedDisplayStateStore,
    StandardHint, StandardTutorial, Tutorial,
};
use tutti_store::JsonFileDisplayStateStore;

#[derive(Default)]
struct TranscriptPresenter {
    shown: Vec<String>,
}

impl<D: Displayable + ?Sized> Presenter<D> for TranscriptPresenter {
    type Host = ();
    type Anchor = str;

    fn present(&mut self, displayable: &D, _host: &mut (), anchor: &str) -> bool {
        self.shown
            .push(format!("{}@{anchor}", displayable.display_state_key()));
        displayable.mark_displayed();
        true
    }
}

fn open_store(path: &std::path::Path) -> SharedDisplayStateStore {
    Arc::new(JsonFileDisplayStateStore::open(path).expect("open display state store"))
}

fn page_texts() -> Arc<dyn PageTextSource> {
    let mut texts = BTreeMap::new();
    texts.insert("welcome_0_title".to_string(), "Welcome".to_string());
    texts.insert("welcome_1_title".to_string(), "Next".to_string());
    Arc::new(texts)
}

#[test]
fn integration_hint_shown_once_survives_restart() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join(".tutti/display-state.json");
    let mut presenter = TranscriptPresenter::default();

    {
        let store = open_store(&path);
        let hint = StandardHint::new(store, "hint", "Only once.");
        assert_eq!(hint.text(), "Only once.");
        assert_eq!(
            present_once(&mut presenter, &hint, &mut (), "cell"),
            PresentationOutcome::Presented
        );
    }

    let relaunched = open_store(&path);
    let hint = StandardHint::new(relaunched, "hint", "Only once.");
    assert!(hint.has_been_displayed());
    assert_eq!(
        present_once(&mut presenter, &hint, &mut (), "cell"),
        PresentationOutcome::AlreadyDisplayed
    );
    assert_eq!(
        presenter.shown,
        vec!["tutti.hint.hint.anonymous@cell".to_string()]
    );
}

#[test]
fn integration_deferred_counter_accumulates_across_restarts() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("display-state.json");
    let mut presenter = TranscriptPresenter::default();

    for expected_remaining in [4, 3, 2, 1] {
        let hint = StandardHint::new(open_store(&path), "later", "Eventually.").deferred(5);
        assert_eq!(
            present_deferred(&mut presenter, &hint, &mut (), "toolbar"),
            PresentationOutcome::Deferred {
                remaining: expected_remaining
            }
        );
    }

    let hint = StandardHint::new(open_store(&path), "later", "Eventually.").deferred(5);
    assert_eq!(
        present_deferred(&mut presenter, &hint, &mut (), "toolbar"),
        PresentationOutcome::Presented
    );
    assert_eq!(hint.registered_presentation_attempts(), 5);
    assert_eq!(hint.remaining_presentation_attempts(), 0);
    assert!(!hint.should_be_presented());
}

#[test]
fn integration_tutorials_are_isolated_per_user_and_resettable() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("display-state.json");
    let store = open_store(&path);
    let texts = page_texts();

    let users = [None, Some("1"), Some("2")];
    let tutorials: Vec<StandardTutorial> = users
        .iter()
        .map(|user| {
            StandardTutorial::new(store.clone(), texts.clone(), "welcome", 2).with_user_id(*user)
        })
        .collect();
    let localized = LocalizedTutorial::new(store.clone(), texts, "welcome");
    assert_eq!(localized.page_count(), 2);

    tutorials[1].mark_displayed();
    localized.mark_displayed();
    assert!(!tutorials[0].has_been_displayed());
    assert!(tutorials[1].has_been_displayed());
    assert!(!tutorials[2].has_been_displayed());

    let mut targets: Vec<&dyn Displayable> = tutorials
        .iter()
        .map(|tutorial| tutorial as &dyn Displayable)
        .collect();
    targets.push(&localized);
    assert_eq!(reset_display_state(&targets), 2);

    let reopened = open_store(&path);
    assert!(!reopened.get_bool(&tutorials[1].display_state_key()));
    assert!(!reopened.get_bool(&localized.display_state_key()));
}
