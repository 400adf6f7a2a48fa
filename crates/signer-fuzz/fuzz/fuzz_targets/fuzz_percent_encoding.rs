#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth1_signer::oauth::{percent_decode, percent_encode};

fuzz_target!(|input: &str| {
    let encoded = percent_encode(input);
    assert_eq!(percent_decode(&encoded).ok().as_deref(), Some(input));
});
