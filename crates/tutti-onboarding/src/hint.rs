//! Hints: short messages meant to be shown once, e.g. to explain one part of
//! a screen.

use std::fmt;

use tutti_store::DisplayStateStore;

use crate::deferred::Deferred;
use crate::displayable::{Displayable, DisplayableKind, SharedDisplayStateStore};

pub trait Hint: Displayable {
    fn text(&self) -> &str;
}

impl<D: Hint> Hint for Deferred<D> {
    fn text(&self) -> &str {
        self.inner().text()
    }
}

/// Hint that only becomes eligible after a number of presentation attempts.
pub type DeferredHint = Deferred<StandardHint>;

#[derive(Clone)]
pub struct StandardHint {
    identifier: String,
    text: String,
    user_id: Option<String>,
    store: SharedDisplayStateStore,
}

impl StandardHint {
    pub fn new(
        store: SharedDisplayStateStore,
        identifier: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
            user_id: None,
            store,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(str::to_string);
        self
    }

    pub fn deferred(self, required_presentation_attempts: u32) -> DeferredHint {
        Deferred::new(self, required_presentation_attempts)
    }
}

impl fmt::Debug for StandardHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardHint")
            .field("identifier", &self.identifier)
            .field("text", &self.text)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Displayable for StandardHint {
    fn type_tag(&self) -> &str {
        DisplayableKind::Hint.as_str()
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn store(&self) -> &dyn DisplayStateStore {
        self.store.as_ref()
    }
}

impl Hint for StandardHint {
    fn text(&self) -> &str {
        &self.text
    }
}
