use anchor_lang::prelude::*;

#[error_code]
pub enum BetError {
    #[msg("Asset not supported by this program/feed.")]
    UnsupportedAsset,
    #[msg("Bet direction must be 0 (DOWN) or 1 (UP).")]
    InvalidDirection,
    #[msg("Bet amount must be greater than zero.")]
    ZeroAmount,
    #[msg("Bet duration must be positive.")]
    InvalidDuration,
    #[msg("User does not have enough points for this bet.")]
    InsufficientPoints,
    #[msg("Bet account does not exist or is not a bet.")]
    BetNotFound,
    #[msg("Bet is not active or has already been resolved.")]
    BetNotActiveOrAlreadyResolved,
    #[msg("Bet has not yet expired and cannot be resolved.")]
    BetNotYetExpired,
    #[msg("Pyth price is too old or currently unavailable.")]
    StalePriceFeed,
    #[msg("Pyth price feed error.")]
    PriceFeedError,
    #[msg("Price update does not belong to the asset's configured feed.")]
    PriceFeedMismatch,
    #[msg("Invalid Pyth Feed ID hex format.")]
    InvalidPythFeedIdFormat,
    #[msg("Oracle price is non-positive.")]
    InvalidOraclePrice,
    #[msg("Price calculation resulted in an overflow during scaling.")]
    PriceCalculationOverflow,
    #[msg("Timestamp calculation resulted in an overflow.")]
    TimestampOverflow,
    #[msg("Math operation overflow.")]
    MathOverflow,
    #[msg("The user profile's authority does not match the signer.")]
    UserProfileAuthorityMismatch,
    #[msg("The user profile does not belong to the user who placed the bet.")]
    UserProfileBetUserMismatch,
    #[msg("Delegation message or signature is invalid.")]
    InvalidSignature,
    #[msg("Delegation message nonce does not match the current nonce.")]
    NonceMismatch,
    #[msg("Auth state custody does not allow this delegation step.")]
    DelegationStateMismatch,
    #[msg("Delegation action must be 0 (DISABLE) or 1 (ENABLE).")]
    InvalidDelegationAction,
    #[msg("Unauthorized action.")]
    Unauthorized,
    #[msg("Invalid program configuration.")]
    InvalidConfig,
}
