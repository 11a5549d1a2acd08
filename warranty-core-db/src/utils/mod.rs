use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// Stable across runs and systems: CBOR gives a deterministic binary
/// representation and XxHash64 runs with a fixed seed (0). Row hashes built
/// with this function act as optimistic concurrency tokens.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_content_sensitive() {
        let first = hash_as_i64(&("Toyota", "Camry", 2024)).unwrap();
        let again = hash_as_i64(&("Toyota", "Camry", 2024)).unwrap();
        let other = hash_as_i64(&("Toyota", "Camry", 2025)).unwrap();

        assert_eq!(first, again);
        assert_ne!(first, other);
    }
}
