//! Events emitted by the reservation pass program.
//! Indexers and off-chain tooling consume these for accounting and audit.

use anchor_lang::prelude::*;

use crate::state::Tier;

#[event]
pub struct PassMinted {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub tier: Tier,
    pub fee_paid: u64,
    pub admin_initiated: bool,
    pub timestamp: i64,
}

#[event]
pub struct PassBurned {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub tier: Tier,
    pub timestamp: i64,
}

#[event]
pub struct DonglePurchased {
    pub buyer: Pubkey,
    pub price: u64,
    pub holder_discount: bool,
    pub timestamp: i64,
}

#[event]
pub struct VaultWithdrawal {
    pub super_admin: Pubkey,
    pub destination_wallet: Pubkey,
    pub amount: u64,
    pub remaining_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct CommitteeRotated {
    pub old_super_admin: Pubkey,
    pub new_super_admin: Pubkey,
    pub approvals: u8,
    pub timestamp: i64,
}

#[event]
pub struct WithdrawWalletRotated {
    pub old_wallet: Pubkey,
    pub new_wallet: Pubkey,
    pub approvals: u8,
    pub timestamp: i64,
}

#[event]
pub struct ProposalCancelled {
    pub cancelled_by: Pubkey,
    /// Head of the cancelled value: proposed super admin or proposed wallet.
    pub proposed_value: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PaymentMintUpdated {
    pub old_mint: Pubkey,
    pub new_mint: Pubkey,
    pub timestamp: i64,
}
