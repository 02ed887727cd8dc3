//! provides error types related to submitting transactions.

/// enumerates possible transaction submission errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("invalid transaction entry: {0}")]
    InvalidTransaction(String),

    #[error("not configured with entry credits")]
    NoCredential,

    #[error(
        "insufficient entry credits. required: {}, available: {}",
        required,
        available
    )]
    InsufficientCredits { required: u64, available: u64 },

    #[error("could not fetch entry credit balance")]
    BalanceLookup(#[source] anyhow::Error),

    #[error("could not submit entry")]
    Submission(#[source] anyhow::Error),
}
