//! Identity and persisted "has been displayed" state shared by every
//! onboarding unit.

use std::fmt;
use std::sync::Arc;

use tutti_store::{display_state_key, validate_type_tag, DisplayStateStore, StoreResult};

/// Shared handle to the store every displayable reads and writes through.
pub type SharedDisplayStateStore = Arc<dyn DisplayStateStore>;

/// Built-in displayable type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayableKind {
    Hint,
    Tutorial,
    LocalizedTutorial,
}

impl DisplayableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::Tutorial => "tutorial",
            Self::LocalizedTutorial => "localized_tutorial",
        }
    }
}

impl fmt::Display for DisplayableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An onboarding unit with a persisted display flag.
///
/// Implementors only describe identity and hand out the store; reading and
/// writing the flag is provided here so every kind maps identity to the same
/// key. Nothing is cached: each call round-trips the store.
pub trait Displayable {
    fn type_tag(&self) -> &str;
    fn identifier(&self) -> &str;
    fn user_id(&self) -> Option<&str>;
    fn store(&self) -> &dyn DisplayStateStore;

    fn display_state_key(&self) -> String {
        display_state_key(self.type_tag(), self.identifier(), None, self.user_id())
    }

    /// Key of an auxiliary value namespaced under this identity.
    fn object_state_key(&self, object_key: &str) -> String {
        display_state_key(
            self.type_tag(),
            self.identifier(),
            Some(object_key),
            self.user_id(),
        )
    }

    fn has_been_displayed(&self) -> bool {
        self.store().get_bool(&self.display_state_key())
    }

    fn set_has_been_displayed(&self, value: bool) {
        self.store().set_bool(&self.display_state_key(), value);
    }

    fn mark_displayed(&self) {
        self.set_has_been_displayed(true);
    }

    fn reset_display_state(&self) {
        self.set_has_been_displayed(false);
    }
}

impl<T: Displayable + ?Sized> Displayable for &T {
    fn type_tag(&self) -> &str {
        (**self).type_tag()
    }

    fn identifier(&self) -> &str {
        (**self).identifier()
    }

    fn user_id(&self) -> Option<&str> {
        (**self).user_id()
    }

    fn store(&self) -> &dyn DisplayStateStore {
        (**self).store()
    }
}

/// Displayable with a caller-chosen type tag, for onboarding units that are
/// neither hints nor tutorials.
#[derive(Clone)]
pub struct DisplayableRecord {
    type_tag: String,
    identifier: String,
    user_id: Option<String>,
    store: SharedDisplayStateStore,
}

impl DisplayableRecord {
    pub fn new(
        store: SharedDisplayStateStore,
        type_tag: impl Into<String>,
        identifier: impl Into<String>,
        user_id: Option<&str>,
    ) -> StoreResult<Self> {
        let type_tag = type_tag.into();
        validate_type_tag(&type_tag)?;
        Ok(Self {
            type_tag,
            identifier: identifier.into(),
            user_id: user_id.map(str::to_string),
            store,
        })
    }

    pub fn of_kind(
        store: SharedDisplayStateStore,
        kind: DisplayableKind,
        identifier: impl Into<String>,
        user_id: Option<&str>,
    ) -> Self {
        Self {
            type_tag: kind.as_str().to_string(),
            identifier: identifier.into(),
            user_id: user_id.map(str::to_string),
            store,
        }
    }
}

impl fmt::Debug for DisplayableRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayableRecord")
            .field("type_tag", &self.type_tag)
            .field("identifier", &self.identifier)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Displayable for DisplayableRecord {
    fn type_tag(&self) -> &str {
        &self.type_tag
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
