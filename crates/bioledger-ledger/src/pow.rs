use bioledger_crypto::DIGEST_HEX_LEN;

/// Highest meaningful difficulty: every hex character of the digest is zero.
pub const MAX_DIFFICULTY: u32 = DIGEST_HEX_LEN as u32;

/// Returns `true` if the first `difficulty` characters of `hash` are all `'0'`.
///
/// A difficulty of zero accepts any hash. A hash shorter than the difficulty
/// never satisfies it.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}
