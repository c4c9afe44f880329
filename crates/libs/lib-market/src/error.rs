use lib_chain::ChainError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PurchaseError>;

/// Terminal failures of one purchase attempt.
///
/// Every variant's `Display` string is the user-facing message; the UI shows
/// it until the next attempt. Classification exists only for messaging -
/// nothing here drives a retry.
#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("Please connect your wallet first")]
    NotConnected,

    #[error("This NFT is sold out")]
    SoldOut,

    #[error("Quantity must be between 1 and {max} for this purchase")]
    QuantityOutOfRange { max: u64 },

    /// Another attempt from this dialog is still in flight.
    #[error("A purchase is already in progress")]
    Busy,

    #[error("You are not authorized to mint this NFT. Use the marketplace or contact the administrator")]
    MintUnauthorized,

    /// Direct mint never charges; paid groups must go through the
    /// marketplace.
    #[error("Direct mint does not support paid NFTs, please contact the administrator")]
    PaidDirectMint,

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Transaction was cancelled by the user")]
    UserRejected,

    #[error("Insufficient funds in wallet")]
    InsufficientFunds,

    #[error("Maximum supply exceeded")]
    SupplyExceeded,

    #[error("Contract unreachable: {0}")]
    ContractUnreachable(String),

    /// `price_wei * quantity` does not fit in 256 bits.
    #[error("Total price overflows")]
    PriceOverflow,

    #[error("Purchase failed: {0}")]
    Transaction(String),
}

impl From<ChainError> for PurchaseError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::UserRejected => PurchaseError::UserRejected,
            ChainError::InsufficientFunds => PurchaseError::InsufficientFunds,
            ChainError::Unauthorized => PurchaseError::MintUnauthorized,
            ChainError::SupplyExceeded => PurchaseError::SupplyExceeded,
            ChainError::Unreachable(msg) => PurchaseError::ContractUnreachable(msg),
            ChainError::Execution(msg) => PurchaseError::Transaction(msg),
        }
    }
}
