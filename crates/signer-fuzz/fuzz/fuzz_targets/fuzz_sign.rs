#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth1_signer::oauth::{Credentials, Signer, SigningRequest, Token};

fuzz_target!(|input: (&str, &str, Vec<(String, String)>)| {
    let (method, url, params) = input;
    let signer = Signer::new(Credentials::new("ck", "cs"), Token::new("tk", "ts"));

    if let Ok(request) = SigningRequest::new(method, url, params) {
        let header = signer.sign_at(&request, "fuzz", 0).expect("valid request must sign");
        assert!(header.to_string().starts_with("OAuth oauth_consumer_key="));
    }
});
