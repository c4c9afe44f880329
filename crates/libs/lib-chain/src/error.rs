use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors surfaced by wallet and contract calls.
///
/// Adapters map provider failures into these variants so the purchase
/// workflow can produce a user-facing message without inspecting raw
/// provider strings. [`ChainError::classify`] covers adapters that only
/// have an opaque message to work with.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The user declined the signature prompt in their wallet.
    #[error("Transaction was cancelled by the user")]
    UserRejected,

    #[error("Insufficient funds in wallet")]
    InsufficientFunds,

    /// The acting address lacks minter authorization on the contract.
    #[error("No minting authorization")]
    Unauthorized,

    #[error("Maximum supply exceeded")]
    SupplyExceeded,

    /// The contract could not be reached or did not respond as expected.
    #[error("Contract unreachable: {0}")]
    Unreachable(String),

    /// Any other transaction failure (revert, nonce issue, provider error).
    #[error("Transaction failed: {0}")]
    Execution(String),
}

impl ChainError {
    /// Map an opaque provider error message onto a known variant.
    ///
    /// Mirrors the substring rules wallet providers are known to emit:
    /// `ACTION_REJECTED` / "user rejected" for declined prompts,
    /// "insufficient funds", "unauthorized", "supply exceeded". Anything
    /// else stays a generic execution failure carrying the message.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if message.contains("ACTION_REJECTED") || lower.contains("user rejected") {
            ChainError::UserRejected
        } else if lower.contains("insufficient funds") {
            ChainError::InsufficientFunds
        } else if lower.contains("unauthorized") {
            ChainError::Unauthorized
        } else if lower.contains("supply exceeded") {
            ChainError::SupplyExceeded
        } else {
            ChainError::Execution(message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_user_rejected() {
        assert!(matches!(
            ChainError::classify("ACTION_REJECTED: denied by user"),
            ChainError::UserRejected
        ));
        assert!(matches!(
            ChainError::classify("error: User rejected the request"),
            ChainError::UserRejected
        ));
    }

    #[test]
    fn test_classify_known_messages() {
        assert!(matches!(
            ChainError::classify("insufficient funds for gas * price + value"),
            ChainError::InsufficientFunds
        ));
        assert!(matches!(
            ChainError::classify("execution reverted: unauthorized minter"),
            ChainError::Unauthorized
        ));
        assert!(matches!(
            ChainError::classify("execution reverted: supply exceeded"),
            ChainError::SupplyExceeded
        ));
    }

    #[test]
    fn test_classify_fallback_keeps_message() {
        match ChainError::classify("nonce too low") {
            ChainError::Execution(msg) => assert_eq!(msg, "nonce too low"),
            other => panic!("expected Execution, got {other:?}"),
        }
    }
}
