//! Identifier helpers.
//!
//! Planet and sector ids are opaque strings of the form `<prefix>-<suffix>`
//! where the suffix is seven base-36 characters drawn from the injected RNG.
//! Collision resistance only needs to hold within one process lifetime.

use crate::rng::DeterministicRng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

/// Returns a random base-36 suffix of seven characters.
pub fn random_suffix(rng: &mut dyn DeterministicRng) -> String {
    (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.next_u32_range(0, 35) as usize;
            char::from(ALPHABET[idx.min(35)])
        })
        .collect()
}

/// Returns a prefixed id such as `planet-k3v9q0a`.
pub fn prefixed_id(prefix: &str, rng: &mut dyn DeterministicRng) -> String {
    format!("{prefix}-{}", random_suffix(rng))
}
