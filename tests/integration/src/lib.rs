//! Cross-crate display state scenarios live under `tests/`.
