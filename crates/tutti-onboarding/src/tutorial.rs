//! Tutorials: multi-page onboarding flows whose page content is resolved from
//! a text source through `<identifier>_<index>_<field>` keys.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tutti_store::DisplayStateStore;

use crate::displayable::{Displayable, DisplayableKind, SharedDisplayStateStore};

/// Upper bound on pages probed when discovering a localized tutorial.
pub const MAX_LOCALIZED_TUTORIAL_PAGES: usize = 64;

/// Page content lookup, typically backed by a string table.
pub trait PageTextSource: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl PageTextSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl PageTextSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageField {
    Title,
    Text,
    Image,
}

impl PageField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

pub fn tutorial_page_key(identifier: &str, index: usize, field: PageField) -> String {
    format!("{identifier}_{index}_{}", field.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialPage {
    pub index: usize,
    pub title: String,
    pub text: String,
    pub image_name: Option<String>,
}

pub trait Tutorial: Displayable {
    fn page_count(&self) -> usize;
    fn page(&self, index: usize) -> Option<TutorialPage>;

    fn pages(&self) -> Vec<TutorialPage> {
        (0..self.page_count())
            .filter_map(|index| self.page(index))
            .collect()
    }
}

/// Tutorial with a fixed page count. Missing title or text entries fall back
/// to their lookup key so a partially translated tutorial still renders.
#[derive(Clone)]
pub struct StandardTutorial {
    identifier: String,
    page_count: usize,
    user_id: Option<String>,
    texts: Arc<dyn PageTextSource>,
    store: SharedDisplayStateStore,
}

impl StandardTutorial {
    pub fn new(
        store: SharedDisplayStateStore,
        texts: Arc<dyn PageTextSource>,
        identifier: impl Into<String>,
        page_count: usize,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            page_count,
            user_id: None,
            texts,
            store,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(str::to_string);
        self
    }
}

impl fmt::Debug for StandardTutorial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardTutorial")
            .field("identifier", &self.identifier)
            .field("page_count", &self.page_count)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Displayable for StandardTutorial {
    fn type_tag(&self) -> &str {
        DisplayableKind::Tutorial.as_str()
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

impl Tutorial for StandardTutorial {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page(&self, index: usize) -> Option<TutorialPage> {
        if index >= self.page_count {
            return None;
        }
        let resolve = |field| {
            let key = tutorial_page_key(&self.identifier, index, field);
            self.texts.lookup(&key).unwrap_or(key)
        };
        Some(TutorialPage {
            index,
            title: resolve(PageField::Title),
            text: resolve(PageField::Text),
            image_name: self
                .texts
                .lookup(&tutorial_page_key(&self.identifier, index, PageField::Image)),
        })
    }
}

/// Tutorial whose pages are discovered from the text source: page `n` exists
/// while its title or text resolves, stopping at the first gap.
#[derive(Clone)]
pub struct LocalizedTutorial {
    identifier: String,
    user_id: Option<String>,
    texts: Arc<dyn PageTextSource>,
    store: SharedDisplayStateStore,
}

impl LocalizedTutorial {
    pub fn new(
        store: SharedDisplayStateStore,
        texts: Arc<dyn PageTextSource>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            user_id: None,
            texts,
            store,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(str::to_string);
        self
    }

    fn lookup(&self, index: usize, field: PageField) -> Option<String> {
        self.texts
            .lookup(&tutorial_page_key(&self.identifier, index, field))
    }

    fn has_page(&self, index: usize) -> bool {
        self.lookup(index, PageField::Title).is_some()
            || self.lookup(index, PageField::Text).is_some()
    }
}

impl fmt::Debug for LocalizedTutorial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedTutorial")
            .field("identifier", &self.identifier)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Displayable for LocalizedTutorial {
    fn type_tag(&self) -> &str {
        DisplayableKind::LocalizedTutorial.as_str()
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

impl Tutorial for LocalizedTutorial {
    fn page_count(&self) -> usize {
        (0..MAX_LOCALIZED_TUTORIAL_PAGES)
            .take_while(|index| self.has_page(*index))
            .count()
    }

    fn page(&self, index: usize) -> Option<TutorialPage> {
        if index >= self.page_count() {
            return None;
        }
        Some(TutorialPage {
            index,
            title: self.lookup(index, PageField::Title).unwrap_or_default(),
            text: self.lookup(index, PageField::Text).unwrap_or_default(),
            image_name: self.lookup(index, PageField::Image),
        })
    }
}
