use crate::error::Result;
use crate::store::LinkStore;
use rand::Rng;

/// Alphabet for generated codes: upper and lower case letters plus digits.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated codes before the fallback kicks in.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// How many candidates are checked against the store before falling back
/// to a longer code.
const MAX_ATTEMPTS: usize = 5;

/// Generates a random code of `length` characters from the 62-symbol alphabet.
pub fn random_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Picks a code for a creation request that did not supply one.
///
/// Up to five length-6 candidates are checked against the store; if every
/// one is taken, a single length-7 candidate is returned without a further
/// existence check. Uniqueness is therefore best-effort, not guaranteed:
/// the subsequent insert can still fail with
/// [`Conflict`](crate::error::StorageError::Conflict), and that conflict
/// is the caller's to surface. The store layer never retries it.
pub async fn assign_code(store: &dyn LinkStore) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = random_code(DEFAULT_CODE_LENGTH);
        if !store.exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    Ok(random_code(DEFAULT_CODE_LENGTH + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LinkRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store stub that reports every code as taken.
    struct SaturatedStore {
        checks: AtomicUsize,
    }

    impl SaturatedStore {
        fn new() -> Self {
            Self {
                checks: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LinkStore for SaturatedStore {
        async fn get_all(&self) -> Result<Vec<LinkRecord>> {
            unreachable!()
        }

        async fn get(&self, _code: &str) -> Result<Option<LinkRecord>> {
            unreachable!()
        }

        async fn exists(&self, _code: &str) -> Result<bool> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        async fn insert(&self, _code: &str, _url: &str) -> Result<LinkRecord> {
            unreachable!()
        }

        async fn delete(&self, _code: &str) -> Result<bool> {
            unreachable!()
        }

        async fn increment_clicks(&self, _code: &str) -> Result<bool> {
            unreachable!()
        }
    }

    /// Store stub with no records at all.
    struct EmptyStore;

    #[async_trait]
    impl LinkStore for EmptyStore {
        async fn get_all(&self) -> Result<Vec<LinkRecord>> {
            unreachable!()
        }

        async fn get(&self, _code: &str) -> Result<Option<LinkRecord>> {
            unreachable!()
        }

        async fn exists(&self, _code: &str) -> Result<bool> {
            Ok(false)
        }

        async fn insert(&self, _code: &str, _url: &str) -> Result<LinkRecord> {
            unreachable!()
        }

        async fn delete(&self, _code: &str) -> Result<bool> {
            unreachable!()
        }

        async fn increment_clicks(&self, _code: &str) -> Result<bool> {
            unreachable!()
        }
    }

    #[test]
    fn random_code_has_requested_length() {
        assert_eq!(random_code(6).len(), 6);
        assert_eq!(random_code(7).len(), 7);
        assert_eq!(random_code(1).len(), 1);
    }

    #[test]
    fn random_code_uses_alphanumeric_alphabet() {
        let code = random_code(64);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn assigns_default_length_when_store_is_empty() {
        let store = EmptyStore;

        let code = assign_code(&store).await.unwrap();
        assert_eq!(code.len(), DEFAULT_CODE_LENGTH);
    }

    #[tokio::test]
    async fn saturated_store_falls_back_to_longer_code() {
        let store = SaturatedStore::new();

        let code = assign_code(&store).await.unwrap();

        // Five length-6 candidates were checked; the final length-7
        // candidate is accepted without another lookup.
        assert_eq!(code.len(), DEFAULT_CODE_LENGTH + 1);
        assert_eq!(store.checks.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn assigned_codes_vary() {
        let store = EmptyStore;

        let first = assign_code(&store).await.unwrap();
        let second = assign_code(&store).await.unwrap();

        // 62^6 candidates; a repeat here points at a broken generator.
        assert_ne!(first, second);
    }
}
