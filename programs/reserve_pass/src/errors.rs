//! Program errors. Explicit codes improve auditability and client handling.

use anchor_lang::prelude::*;

#[error_code]
pub enum PassError {
    #[msg("Unauthorized: super admin required")]
    Unauthorized,

    #[msg("Signer is not a member of the admin committee")]
    NotMultisigMember,

    #[msg("Signer already approved the pending proposal")]
    AlreadyApproved,

    #[msg("A different proposal is pending; cancel it first")]
    DifferentProposalPending,

    #[msg("No proposal is pending")]
    NoProposalPending,

    #[msg("Proposed super admin cannot be empty")]
    InvalidSuperAdmin,

    #[msg("Vice admin cannot equal the super admin")]
    InvalidViceAdmin,

    #[msg("Duplicate vice admin in proposed committee")]
    DuplicateViceAdmin,

    #[msg("Proposed committee is identical to the current committee")]
    SameSuperAdmin,

    #[msg("Withdraw amount must be greater than zero")]
    InvalidWithdrawAmount,

    #[msg("Insufficient vault balance for withdrawal")]
    InsufficientVaultBalance,

    #[msg("Invalid withdraw wallet")]
    InvalidWithdrawWallet,

    #[msg("New withdraw wallet must differ from the current one")]
    SameWithdrawWallet,

    #[msg("Payment mint does not match the registry")]
    InvalidPaymentMint,

    #[msg("Invalid payment token account")]
    InvalidPaymentTokenAccount,

    #[msg("New payment mint must differ from the current one")]
    SamePaymentMint,

    #[msg("Vault must be empty before changing the payment mint")]
    VaultNotEmpty,

    #[msg("Tier supply cap reached")]
    MaxSupplyReached,

    #[msg("Tier admin mint limit reached")]
    AdminMintLimitReached,

    #[msg("User already holds a reservation pass")]
    UserAlreadyMinted,

    #[msg("User does not own this pass")]
    UserDoesNotOwnNft,

    #[msg("Token account is not the holder's associated account for the pass")]
    InvalidTokenAccount,

    #[msg("Dongle purchase has not started")]
    PurchaseNotStarted,

    #[msg("Minting has not started yet")]
    MintNotStarted,

    #[msg("Mint fee must be greater than zero")]
    InvalidMintFee,

    #[msg("Dongle price must be greater than zero")]
    InvalidDonglePrice,

    #[msg("Collection address cannot be empty")]
    InvalidCollection,

    #[msg("Supply cap cannot be below the current reserved count")]
    InvalidMaxSupply,

    #[msg("Reserved count overflow")]
    ReservedCountOverflow,

    #[msg("Reserved count underflow")]
    ReservedCountUnderflow,

    #[msg("Committee must seat at least as many members as the approval threshold")]
    CommitteeBelowThreshold,
}
