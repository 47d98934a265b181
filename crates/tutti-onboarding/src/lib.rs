//! Once-only onboarding primitives for Tutti.
//!
//! Hints and tutorials are stateless views over a shared display state store:
//! they read and write their "has been displayed" flag (and, when deferred,
//! their presentation attempt counter) through keys derived from identity.
//! Rendering lives behind the [`Presenter`] contract.

pub mod deferred;
pub mod displayable;
pub mod hint;
pub mod presenter;
pub mod reset;
pub mod tutorial;

pub use deferred::{Deferred, DeferredOnboarding, PRESENTATION_ATTEMPTS_KEY};
pub use displayable::{
    Displayable, DisplayableKind, DisplayableRecord, SharedDisplayStateStore,
};
pub use hint::{DeferredHint, Hint, StandardHint};
pub use presenter::{present_deferred, present_once, PresentationOutcome, Presenter};
pub use reset::{clear_all_display_state, reset_display_state, reset_onboarding_state};
pub use tutorial::{
    tutorial_page_key, LocalizedTutorial, PageField, PageTextSource, StandardTutorial, Tutorial,
    TutorialPage, MAX_LOCALIZED_TUTORIAL_PAGES,
};
pub use tutti_store::{DisplayStateStore, InMemoryDisplayStateStore, JsonFileDisplayStateStore};
