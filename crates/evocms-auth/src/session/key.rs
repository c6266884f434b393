//! Random session keys.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Generate a random alphanumeric key of `length` characters.
pub fn generate_key(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_length_and_alphabet() {
        let key = generate_key(32);
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_keys_differ() {
        assert_ne!(generate_key(32), generate_key(32));
    }
}
