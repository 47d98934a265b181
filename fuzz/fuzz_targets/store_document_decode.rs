#![no_main]

use libfuzzer_sys::fuzz_target;
use tutti_store::{decode_store_document, encode_store_document};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    if let Ok(entries) = decode_store_document(&raw) {
        let encoded = encode_store_document(&entries).expect("decoded entries must re-encode");
        let decoded = decode_store_document(&encoded).expect("encoded document must decode");
        assert_eq!(decoded, entries);
    }
});
