//! Demo hints and tutorials mirroring the sample onboarding screen.

use std::collections::BTreeMap;
use std::sync::Arc;

use tutti_onboarding::{
    DeferredHint, DeferredOnboarding, Displayable, LocalizedTutorial, PageTextSource,
    SharedDisplayStateStore, StandardHint, StandardTutorial,
};

pub(crate) const DEFAULT_DEFERRED_ATTEMPTS: u32 = 3;
pub(crate) const DEMO_USER_IDS: [Option<&str>; 3] = [None, Some("1"), Some("2")];

const HINT_IDENTIFIER: &str = "hint";
const HINT_TEXT: &str = "This is a quick hint. It will only be displayed once.";
const DEFERRED_HINT_IDENTIFIER: &str = "deferredHint";
const DEFERRED_HINT_TEXT: &str = "You keep coming back here. Long-press an item for more options.";
const TUTORIAL_IDENTIFIER: &str = "tutorial";
const LOCALIZED_TUTORIAL_IDENTIFIER: &str = "basicTutorial";

const DEMO_PAGE_TEXTS: [(&str, &str); 8] = [
    ("tutorial_0_title", "Welcome"),
    ("tutorial_0_text", "This tutorial is shown once per user."),
    ("basicTutorial_0_title", "Getting started"),
    ("basicTutorial_0_text", "Pages are discovered from the string table."),
    ("basicTutorial_0_image", "getting-started.png"),
    ("basicTutorial_1_title", "Hints"),
    ("basicTutorial_1_text", "Hints point out a single feature."),
    ("basicTutorial_2_title", "Done"),
];

pub(crate) struct DemoCatalog {
    store: SharedDisplayStateStore,
    texts: Arc<dyn PageTextSource>,
}

impl DemoCatalog {
    pub(crate) fn new(store: SharedDisplayStateStore) -> Self {
        let texts: BTreeMap<String, String> = DEMO_PAGE_TEXTS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            store,
            texts: Arc::new(texts),
        }
    }

    pub(crate) fn hint(&self, user_id: Option<&str>) -> StandardHint {
        StandardHint::new(self.store.clone(), HINT_IDENTIFIER, HINT_TEXT).with_user_id(user_id)
    }

    pub(crate) fn deferred_hint(&self, user_id: Option<&str>, required: u32) -> DeferredHint {
        StandardHint::new(
            self.store.clone(),
            DEFERRED_HINT_IDENTIFIER,
            DEFERRED_HINT_TEXT,
        )
        .with_user_id(user_id)
        .deferred(required)
    }

    pub(crate) fn tutorial(&self, user_id: Option<&str>) -> StandardTutorial {
        StandardTutorial::new(
            self.store.clone(),
            self.texts.clone(),
            TUTORIAL_IDENTIFIER,
            1,
        )
        .with_user_id(user_id)
    }

    pub(crate) fn localized_tutorial(&self, user_id: Option<&str>) -> LocalizedTutorial {
        LocalizedTutorial::new(
            self.store.clone(),
            self.texts.clone(),
            LOCALIZED_TUTORIAL_IDENTIFIER,
        )
        .with_user_id(user_id)
    }

    /// Every plain item for `user_id`, in display order.
    pub(crate) fn displayables(&self, user_id: Option<&str>) -> Vec<Box<dyn Displayable>> {
        let hint: Box<dyn Displayable> = Box::new(self.hint(user_id));
        let tutorial: Box<dyn Displayable> = Box::new(self.tutorial(user_id));
        let localized: Box<dyn Displayable> = Box::new(self.localized_tutorial(user_id));
        vec![hint, tutorial, localized]
    }

    pub(crate) fn deferred(&self, user_id: Option<&str>) -> Vec<Box<dyn DeferredOnboarding>> {
        let deferred_hint: Box<dyn DeferredOnboarding> =
            Box::new(self.deferred_hint(user_id, DEFAULT_DEFERRED_ATTEMPTS));
        vec![deferred_hint]
    }
}

/// Demo users plus `extra`, when it is not one of them.
pub(crate) fn demo_users(extra: Option<&str>) -> Vec<Option<&str>> {
    let mut users: Vec<Option<&str>> = DEMO_USER_IDS.to_vec();
    if let Some(extra) = extra {
        if !users.contains(&Some(extra)) {
            users.push(Some(extra));
        }
    }
    users
}
