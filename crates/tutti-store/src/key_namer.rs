//! Storage key construction for displayable identities.
//!
//! Keys have the shape `tutti.<type>.<identifier>.<user>[.<objectKey>]` where
//! `<user>` is `anonymous` or `user-<id>`. Every component is escaped so that
//! `.` only ever separates components, which keeps the mapping injective.

use crate::{StoreError, StoreResult};

/// Leading namespace shared by every key this crate produces.
pub const KEY_PREFIX: &str = "tutti";

const ANONYMOUS_USER_SEGMENT: &str = "anonymous";
const USER_SEGMENT_PREFIX: &str = "user-";

/// Builds the storage key for a displayable identity, optionally scoped to an
/// auxiliary `object_key` such as an attempt counter.
pub fn display_state_key(
    type_tag: &str,
    identifier: &str,
    object_key: Option<&str>,
    user_id: Option<&str>,
) -> String {
    let user_segment = match user_id {
        Some(user_id) => format!("{USER_SEGMENT_PREFIX}{}", escape_component(user_id)),
        None => ANONYMOUS_USER_SEGMENT.to_string(),
    };
    let mut key = format!(
        "{KEY_PREFIX}.{}.{}.{}",
        escape_component(type_tag),
        escape_component(identifier),
        user_segment
    );
    if let Some(object_key) = object_key {
        key.push('.');
        key.push_str(&escape_component(object_key));
    }
    key
}

/// Type tags name a kind of displayable and must be non-blank.
pub fn validate_type_tag(type_tag: &str) -> StoreResult<()> {
    if type_tag.trim().is_empty() {
        return Err(StoreError::InvalidTypeTag(type_tag.to_string()));
    }
    Ok(())
}

fn escape_component(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '.' => escaped.push_str("%2E"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
