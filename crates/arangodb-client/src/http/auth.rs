//! Basic authentication header encoding

use crate::config::Credential;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Build the `Authorization` header value for a credential.
///
/// `username:password` is encoded as ISO-8859-1 (one byte per character)
/// before base64, which is what the server decodes. Characters outside
/// Latin-1 are replaced with `?`.
pub fn basic_auth_header(credential: &Credential) -> String {
    let raw = format!("{}:{}", credential.username(), credential.password());
    format!("Basic {}", STANDARD.encode(encode_latin1(&raw)))
}

fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
