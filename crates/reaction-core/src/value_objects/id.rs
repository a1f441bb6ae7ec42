//! Entity ID - 26-character lowercase base32 identifier
//!
//! Every post and user is keyed by one of these. They are random, not
//! time-ordered, so callers must not rely on their sort order.

use rand::Rng;

/// Length of every entity ID
pub const ID_LENGTH: usize = 26;

/// Base32 alphabet used for generated IDs (all lowercase, no padding)
const ENCODING: &[u8; 32] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

/// Generate a new random entity ID
pub fn new_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ENCODING[rng.gen_range(0..ENCODING.len())] as char)
        .collect()
}

/// Check whether a string has the shape of an entity ID
///
/// Accepts exactly 26 ASCII letters or digits in either case, so ids minted
/// elsewhere in mixed case still pass.
pub fn is_valid_id(value: &str) -> bool {
    value.len() == ID_LENGTH && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_valid() {
        for _ in 0..100 {
            let id = new_id();
            assert_eq!(id.len(), ID_LENGTH);
            assert!(is_valid_id(&id), "generated id {id} should be valid");
        }
    }

    #[test]
    fn test_new_id_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn test_is_valid_id_rejects_bad_shapes() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("abc"));
        assert!(!is_valid_id(&"a".repeat(27)));
        assert!(!is_valid_id(&format!("{}-", "a".repeat(25))));
        assert!(!is_valid_id(&format!("{}é", "a".repeat(24))));
        assert!(is_valid_id(&"a1".repeat(13)));
    }

    #[test]
    fn test_is_valid_id_accepts_mixed_case() {
        assert!(is_valid_id(&"A".repeat(26)));
        assert!(is_valid_id(&("aB3".repeat(8) + "Zz")));
    }
}
