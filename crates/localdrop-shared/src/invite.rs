//! Shareable invite links.
//!
//! The token is cosmetic: nothing registers or validates it, so collisions
//! are harmless.

use rand::Rng;

use crate::constants::{INVITE_QUERY_PARAM, INVITE_TOKEN_LEN};

const TOKEN_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Build an invite link for `page_url` using the thread-local RNG.
pub fn generate_invite_link(page_url: &str) -> String {
    generate_invite_link_with(&mut rand::thread_rng(), page_url)
}

pub fn generate_invite_link_with<R: Rng + ?Sized>(rng: &mut R, page_url: &str) -> String {
    format!(
        "{}?{}={}",
        strip_query(page_url),
        INVITE_QUERY_PARAM,
        random_token(rng)
    )
}

/// Everything before the first `?`.
pub fn strip_query(page_url: &str) -> &str {
    page_url
        .split_once('?')
        .map(|(base, _)| base)
        .unwrap_or(page_url)
}

pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..INVITE_TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
