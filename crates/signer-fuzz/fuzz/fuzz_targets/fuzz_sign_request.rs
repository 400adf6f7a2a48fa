#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth1_signer::models::SignRequest;

fuzz_target!(|data: &[u8]| {
    // Parse and validate arbitrary bodies; must only ever return Ok or Err
    if let Ok(req) = serde_json::from_slice::<SignRequest>(data) {
        let _ = req.to_signing_request();
    }
});
