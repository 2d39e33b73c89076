use thiserror::Error;

/// Failures while bringing up or talking to a test container.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("failed to start or inspect container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("failed to reach redis container: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
