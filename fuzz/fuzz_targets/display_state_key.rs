#![no_main]

use libfuzzer_sys::fuzz_target;
use tutti_store::{display_state_key, KEY_PREFIX};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let mut parts = raw.splitn(4, '\u{0}');
    let type_tag = parts.next().unwrap_or("hint");
    let identifier = parts.next().unwrap_or_default();
    let user_id = parts.next();
    let object_key = parts.next();

    let key = display_state_key(type_tag, identifier, object_key, user_id);
    assert!(key.starts_with(KEY_PREFIX));
    assert_eq!(
        key,
        display_state_key(type_tag, identifier, object_key, user_id)
    );

    let expected_segments = 4 + usize::from(object_key.is_some());
    assert_eq!(key.split('.').count(), expected_segments);
    if user_id.is_some() {
        assert_ne!(key, display_state_key(type_tag, identifier, object_key, None));
    }
});
