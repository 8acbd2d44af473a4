use std::sync::Arc;

use async_trait::async_trait;
use auth::HashingCost;
use auth::PasswordError;
use auth::PasswordHasher;
use tokio::sync::Semaphore;

use crate::domain::auth::errors::HashError;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::ports::CredentialHasher;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Argon2id hasher that runs on tokio's blocking thread pool.
///
/// At most `max_concurrency` hash or verify jobs run at once, independently of
/// how many requests the server accepts.
pub struct BlockingHasher {
    hasher: Arc<PasswordHasher>,
    permits: Arc<Semaphore>,
    decoy_digest: Arc<str>,
}

impl BlockingHasher {
    /// Build the hasher and precompute the decoy digest.
    ///
    /// Blocks for one hash computation; call it during startup.
    ///
    /// # Arguments
    /// * `cost` - Work factor for new digests
    /// * `max_concurrency` - Number of hashing jobs allowed in parallel (at least 1)
    ///
    /// # Errors
    /// * `HashingFailed` - Cost is invalid or the decoy digest could not be computed
    pub fn new(cost: HashingCost, max_concurrency: usize) -> Result<Self, HashError> {
        let hasher =
            PasswordHasher::with_cost(cost).map_err(|e| HashError::HashingFailed(e.to_string()))?;
        let decoy_digest = hasher
            .hash(DECOY_PASSWORD)
            .map_err(|e| HashError::HashingFailed(e.to_string()))?;

        Ok(Self {
            hasher: Arc::new(hasher),
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
            decoy_digest: decoy_digest.into(),
        })
    }

    async fn run<T, F>(&self, job: F) -> Result<T, HashError>
    where
        F: FnOnce(&PasswordHasher) -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| HashError::WorkerUnavailable(e.to_string()))?;
        let hasher = Arc::clone(&self.hasher);

        // The permit travels with the job: a cancelled request cannot free a
        // slot while its hash is still running.
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job(hasher.as_ref())
        })
        .await
        .map_err(|e| HashError::WorkerUnavailable(e.to_string()))
    }
}

impl From<PasswordError> for HashError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::MalformedDigest(msg) => HashError::MalformedDigest(msg),
            PasswordError::HashingFailed(msg) | PasswordError::InvalidCost(msg) => {
                HashError::HashingFailed(msg)
            }
        }
    }
}

#[async_trait]
impl CredentialHasher for BlockingHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError> {
        let password = password.as_str().to_owned();

        let digest = self.run(move |hasher| hasher.hash(&password)).await??;

        Ok(PasswordHash::new(digest))
    }

    async fn verify(&self, digest: &PasswordHash, password: &Password) -> Result<bool, HashError> {
        let password = password.as_str().to_owned();
        let digest = digest.as_str().to_owned();

        Ok(self
            .run(move |hasher| hasher.verify(&password, &digest))
            .await??)
    }

    async fn verify_decoy(&self, password: &Password) {
        let password = password.as_str().to_owned();
        let digest = Arc::clone(&self.decoy_digest);

        if let Err(e) = self
            .run(move |hasher| hasher.verify(&password, &digest))
            .await
        {
            tracing::warn!(error = %e, "Decoy verification did not run");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_cost() -> HashingCost {
        HashingCost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn password(raw: &str) -> Password {
        Password::new(raw.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = BlockingHasher::new(cheap_cost(), 2).unwrap();

        let digest = hasher.hash(&password("s3cret")).await.unwrap();
        assert!(digest.as_str().starts_with("$argon2id$"));

        assert!(hasher.verify(&digest, &password("s3cret")).await.unwrap());
        assert!(!hasher.verify(&digest, &password("S3cret")).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_malformed_digest() {
        let hasher = BlockingHasher::new(cheap_cost(), 1).unwrap();

        let result = hasher
            .verify(&PasswordHash::new("plaintext".to_string()), &password("x"))
            .await;
        assert!(matches!(result, Err(HashError::MalformedDigest(_))));
    }

    #[tokio::test]
    async fn test_single_permit_serializes_concurrent_jobs() {
        let hasher = Arc::new(BlockingHasher::new(cheap_cost(), 1).unwrap());

        let jobs: Vec<_> = (0..8)
            .map(|i| {
                let hasher = Arc::clone(&hasher);
                tokio::spawn(async move { hasher.hash(&password(&format!("pw-{i}"))).await })
            })
            .collect();

        for job in jobs {
            assert!(job.await.unwrap().is_ok());
        }
        assert_eq!(hasher.permits.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_makes_progress() {
        let hasher = BlockingHasher::new(cheap_cost(), 0).unwrap();

        assert!(hasher.hash(&password("pw")).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_decoy_completes() {
        let hasher = BlockingHasher::new(cheap_cost(), 1).unwrap();

        hasher.verify_decoy(&password("anything")).await;
        assert_eq!(hasher.permits.available_permits(), 1);
    }

    #[test]
    fn test_invalid_cost() {
        let result = BlockingHasher::new(
            HashingCost {
                memory_kib: 0,
                iterations: 0,
                parallelism: 0,
            },
            1,
        );
        assert!(matches!(result, Err(HashError::HashingFailed(_))));
    }

    #[tokio::test]
    async fn test_cancelled_waiter_leaves_permits_intact() {
        let hasher = BlockingHasher::new(cheap_cost(), 1).unwrap();

        let held = Arc::clone(&hasher.permits).acquire_owned().await.unwrap();
        assert_eq!(hasher.permits.available_permits(), 0);

        let waiting = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            hasher.hash(&password("queued")),
        )
        .await;
        assert!(waiting.is_err());
        assert_eq!(hasher.permits.available_permits(), 0);

        drop(held);
        assert_eq!(hasher.permits.available_permits(), 1);

        let digest = hasher.hash(&password("after")).await.unwrap();
        assert!(hasher.verify(&digest, &password("after")).await.unwrap());
        assert_eq!(hasher.permits.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_abandoned_job_keeps_permit_until_done() {
        let hasher = Arc::new(
            BlockingHasher::new(
                HashingCost {
                    memory_kib: 8 * 1024,
                    iterations: 4,
                    parallelism: 1,
                },
                1,
            )
            .unwrap(),
        );

        let job = {
            let hasher = Arc::clone(&hasher);
            tokio::spawn(async move { hasher.hash(&password("abandoned")).await })
        };

        // Wait until the job owns the permit, then abandon its caller.
        while hasher.permits.available_permits() == 1 && !job.is_finished() {
            tokio::task::yield_now().await;
        }
        job.abort();

        // The next job still gets a permit once the abandoned hash finishes.
        let digest = hasher.hash(&password("next")).await.unwrap();
        assert!(hasher.verify(&digest, &password("next")).await.unwrap());
        assert_eq!(hasher.permits.available_permits(), 1);
    }
}
