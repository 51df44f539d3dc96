//! Program state accounts for the reservation pass registry.
//!
//! The registry is a single PDA owning committee, pricing, and tier state;
//! every instruction takes it explicitly. Each principal gets one lazily
//! created `Reservation` PDA. The vault is a plain token account whose
//! authority is the registry PDA, one per accepted payment mint.

use anchor_lang::prelude::*;

use crate::errors::PassError;
use crate::multisig::{ApprovalSet, APPROVAL_THRESHOLD, COMMITTEE_SIZE};

/// Reservation pools. Each tier has its own fee, caps, and counters; tier
/// logic is generic over the selector instead of duplicated per pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tier {
    Og,
    Regular,
    Basic,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Og, Tier::Regular, Tier::Basic];

    pub fn index(self) -> usize {
        match self {
            Tier::Og => 0,
            Tier::Regular => 1,
            Tier::Basic => 2,
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Basic
    }
}

/// Who initiated a reservation. Admin mints are metered separately and do
/// not pay the tier fee.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReserveKind {
    Public,
    Admin,
}

/// Per-tier pool configuration and counters.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct TierConfig {
    /// Collection mint grouping passes of this tier (informational; metadata
    /// handling lives off-program).
    pub collection_mint: Pubkey,
    /// Fee in payment-mint base units charged on a public mint.
    pub fee: u64,
    /// Maximum live reservations (0 = unlimited).
    pub supply_cap: u64,
    /// Currently live reservations in this tier.
    pub reserved_count: u64,
    /// Maximum admin-initiated mints, ever (0 = admin cannot mint).
    pub admin_mint_cap: u64,
    /// Admin-initiated mints consumed so far. Never decremented, so burning
    /// an admin-minted pass cannot free an admin slot.
    pub admin_mint_count: u64,
}

impl TierConfig {
    pub const LEN: usize = 32 + 8 + 8 + 8 + 8 + 8;
}

/// Initial parameters for one tier.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct TierParams {
    pub fee: u64,
    pub supply_cap: u64,
    pub admin_mint_cap: u64,
}

/// Arguments for `initialize_registry`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeRegistryArgs {
    /// Initial vice admins seated alongside the signing super admin, so the
    /// committee can reach the approval threshold from the start.
    pub vice_admins: [Pubkey; 4],
    pub withdraw_wallet: Pubkey,
    pub mint_window_start: i64,
    pub price_holder: u64,
    pub price_standard: u64,
    pub og: TierParams,
    pub regular: TierParams,
    pub basic: TierParams,
}

/// Governance registry. Single instance per program, seeds `[b"registry"]`.
/// Owns committee, withdrawal, pricing, and tier state.
#[account]
#[derive(Default)]
pub struct Registry {
    /// Committee head; sole authority for withdrawals and admin mints.
    pub super_admin: Pubkey,
    /// Remaining committee slots. `Pubkey::default()` marks an empty slot.
    pub vice_admins: [Pubkey; 4],
    /// Committee rotation proposal in flight (all-default = none pending).
    pub pending_committee: [Pubkey; COMMITTEE_SIZE],
    /// Approvals collected for `pending_committee`.
    pub committee_approvals: ApprovalSet,
    /// Destination wallet for vault withdrawals.
    pub withdraw_wallet: Pubkey,
    /// Withdraw wallet rotation proposal in flight (default = none pending).
    pub pending_withdraw_wallet: Pubkey,
    /// Approvals collected for `pending_withdraw_wallet`.
    pub withdraw_approvals: ApprovalSet,
    /// SPL mint accepted for fees and dongle purchases.
    pub payment_mint: Pubkey,
    /// Gate for the dongle purchase flow.
    pub purchase_enabled: bool,
    /// Dongle price for principals holding a live pass.
    pub price_holder: u64,
    /// Dongle price for everyone else.
    pub price_standard: u64,
    /// Earliest unix time minting is accepted (0 = unrestricted).
    pub mint_window_start: i64,
    /// Tier pools, indexed by `Tier`.
    pub tiers: [TierConfig; 3],
    /// PDA bump for the registry.
    pub bump: u8,
}

impl Registry {
    pub const LEN: usize = 32            // super_admin
        + 4 * 32                         // vice_admins
        + COMMITTEE_SIZE * 32            // pending_committee
        + ApprovalSet::LEN               // committee_approvals
        + 32                             // withdraw_wallet
        + 32                             // pending_withdraw_wallet
        + ApprovalSet::LEN               // withdraw_approvals
        + 32                             // payment_mint
        + 1                              // purchase_enabled
        + 8 + 8                          // prices
        + 8                              // mint_window_start
        + 3 * TierConfig::LEN            // tiers
        + 1; // bump

    /// The live committee as one array: index 0 = super admin, 1..=4 = vices.
    pub fn committee(&self) -> [Pubkey; COMMITTEE_SIZE] {
        [
            self.super_admin,
            self.vice_admins[0],
            self.vice_admins[1],
            self.vice_admins[2],
            self.vice_admins[3],
        ]
    }

    /// Committee index of `key`, or `None` if it is not a member. Empty vice
    /// slots never match.
    pub fn member_index(&self, key: &Pubkey) -> Option<usize> {
        if *key == self.super_admin {
            return Some(0);
        }
        self.vice_admins
            .iter()
            .position(|vice| *vice != Pubkey::default() && vice == key)
            .map(|i| i + 1)
    }

    /// Membership rules shared by initialization and rotation proposals:
    /// non-empty super admin, no vice equal to the super admin, no duplicate
    /// vices, and enough seated members to reach the approval threshold.
    /// The last rule keeps every committee able to govern itself.
    pub fn validate_committee_members(proposed: &[Pubkey; COMMITTEE_SIZE]) -> Result<()> {
        let super_admin = proposed[0];
        require!(super_admin != Pubkey::default(), PassError::InvalidSuperAdmin);

        let vices = &proposed[1..];
        for vice in vices.iter().filter(|v| **v != Pubkey::default()) {
            require!(*vice != super_admin, PassError::InvalidViceAdmin);
        }
        for i in 0..vices.len() {
            if vices[i] == Pubkey::default() {
                continue;
            }
            for j in (i + 1)..vices.len() {
                require!(vices[i] != vices[j], PassError::DuplicateViceAdmin);
            }
        }

        let seated = proposed.iter().filter(|m| **m != Pubkey::default()).count();
        require!(
            seated >= APPROVAL_THRESHOLD as usize,
            PassError::CommitteeBelowThreshold
        );
        Ok(())
    }

    /// Validate a proposed committee before it may enter the proposal slot.
    pub fn validate_committee_proposal(
        &self,
        proposed: &[Pubkey; COMMITTEE_SIZE],
    ) -> Result<()> {
        Self::validate_committee_members(proposed)?;
        require!(*proposed != self.committee(), PassError::SameSuperAdmin);
        Ok(())
    }

    /// Apply the pending committee and clear the proposal slot. Called in
    /// the same instruction that collected the threshold approval.
    pub fn apply_committee_proposal(&mut self) {
        self.super_admin = self.pending_committee[0];
        self.vice_admins = [
            self.pending_committee[1],
            self.pending_committee[2],
            self.pending_committee[3],
            self.pending_committee[4],
        ];
        self.pending_committee = [Pubkey::default(); COMMITTEE_SIZE];
        self.committee_approvals.reset();
    }

    /// Apply the pending withdraw wallet and clear the proposal slot.
    pub fn apply_withdraw_wallet_proposal(&mut self) {
        self.withdraw_wallet = self.pending_withdraw_wallet;
        self.pending_withdraw_wallet = Pubkey::default();
        self.withdraw_approvals.reset();
    }

    pub fn tier(&self, tier: Tier) -> &TierConfig {
        &self.tiers[tier.index()]
    }

    pub fn tier_mut(&mut self, tier: Tier) -> &mut TierConfig {
        &mut self.tiers[tier.index()]
    }

    /// Claim one reservation slot in `tier`. Checks every cap before any
    /// counter moves; public mints deposit the tier fee before the slot is
    /// claimed, in the same transaction.
    pub fn reserve(&mut self, tier: Tier, kind: ReserveKind) -> Result<()> {
        let config = self.tier_mut(tier);

        if config.supply_cap != 0 {
            require!(
                config.reserved_count < config.supply_cap,
                PassError::MaxSupplyReached
            );
        }
        if kind == ReserveKind::Admin {
            require!(
                config.admin_mint_count < config.admin_mint_cap,
                PassError::AdminMintLimitReached
            );
        }

        config.reserved_count = config
            .reserved_count
            .checked_add(1)
            .ok_or(PassError::ReservedCountOverflow)?;
        if kind == ReserveKind::Admin {
            config.admin_mint_count = config
                .admin_mint_count
                .checked_add(1)
                .ok_or(PassError::ReservedCountOverflow)?;
        }
        Ok(())
    }

    /// Release one reservation slot in `tier` (burn path). Admin mint
    /// consumption stays permanent so a burn cannot free an admin slot.
    pub fn release(&mut self, tier: Tier) -> Result<()> {
        let config = self.tier_mut(tier);
        config.reserved_count = config
            .reserved_count
            .checked_sub(1)
            .ok_or(PassError::ReservedCountUnderflow)?;
        Ok(())
    }

    /// Dongle price for a buyer given their reservation status.
    pub fn dongle_price(&self, holds_pass: bool) -> u64 {
        if holds_pass {
            self.price_holder
        } else {
            self.price_standard
        }
    }

    /// Whether `now` falls inside the mint window.
    pub fn mint_window_open(&self, now: i64) -> bool {
        self.mint_window_start == 0 || now >= self.mint_window_start
    }
}

/// Validate a withdrawal against the current vault balance and return the
/// balance remaining after it. All checks happen before any transfer.
pub fn validate_withdrawal(vault_balance: u64, amount: u64) -> Result<u64> {
    require!(amount > 0, PassError::InvalidWithdrawAmount);
    require!(vault_balance >= amount, PassError::InsufficientVaultBalance);
    Ok(vault_balance - amount)
}

/// Per-principal reservation record, seeds `[b"reservation", owner]`.
/// Created lazily on first mint; cleared (not closed) on burn so the
/// mint history survives as an existing-but-empty record.
#[account]
#[derive(Default)]
pub struct Reservation {
    /// Principal this record belongs to.
    pub owner: Pubkey,
    /// Mint of the held pass; `Pubkey::default()` when empty.
    pub nft_mint: Pubkey,
    /// Tier of the held pass (meaningless while empty).
    pub tier: Tier,
    /// Unix time of the most recent successful mint.
    pub minted_at: i64,
}

impl Reservation {
    pub const LEN: usize = 32 + 32 + 1 + 8;

    /// A reservation is held iff a pass mint is recorded.
    pub fn is_held(&self) -> bool {
        self.nft_mint != Pubkey::default()
    }

    pub fn set_held(&mut self, owner: Pubkey, nft_mint: Pubkey, tier: Tier, now: i64) {
        self.owner = owner;
        self.nft_mint = nft_mint;
        self.tier = tier;
        self.minted_at = now;
    }

    pub fn clear(&mut self) {
        self.nft_mint = Pubkey::default();
        self.minted_at = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wallet(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn registry() -> Registry {
        Registry {
            super_admin: wallet(1),
            vice_admins: [wallet(2), wallet(3), wallet(4), wallet(5)],
            withdraw_wallet: wallet(20),
            payment_mint: wallet(30),
            price_holder: 10_000_000,
            price_standard: 50_000_000,
            ..Default::default()
        }
    }

    fn tier_invariants_hold(registry: &Registry) -> bool {
        registry.tiers.iter().all(|t| {
            (t.supply_cap == 0 || t.reserved_count <= t.supply_cap)
                && t.admin_mint_count <= t.admin_mint_cap
        })
    }

    #[test]
    fn member_index_covers_all_committee_slots() {
        let registry = registry();
        assert_eq!(registry.member_index(&wallet(1)), Some(0));
        assert_eq!(registry.member_index(&wallet(3)), Some(2));
        assert_eq!(registry.member_index(&wallet(5)), Some(4));
        assert_eq!(registry.member_index(&wallet(9)), None);
    }

    #[test]
    fn empty_vice_slot_is_not_a_member() {
        let mut registry = registry();
        registry.vice_admins[1] = Pubkey::default();
        // The default pubkey must not be treated as a committee member.
        assert_eq!(registry.member_index(&Pubkey::default()), None);
    }

    #[test]
    fn committee_proposal_rejects_empty_super_admin() {
        let registry = registry();
        let proposed = [Pubkey::default(), wallet(2), wallet(3), wallet(4), wallet(5)];
        assert_eq!(
            registry.validate_committee_proposal(&proposed).unwrap_err(),
            PassError::InvalidSuperAdmin.into()
        );
    }

    #[test]
    fn committee_proposal_rejects_vice_equal_to_super() {
        let registry = registry();
        let proposed = [wallet(7), wallet(7), wallet(3), wallet(4), wallet(5)];
        assert_eq!(
            registry.validate_committee_proposal(&proposed).unwrap_err(),
            PassError::InvalidViceAdmin.into()
        );
    }

    #[test]
    fn committee_proposal_rejects_duplicate_vices() {
        let registry = registry();
        let proposed = [wallet(7), wallet(3), wallet(3), wallet(4), wallet(5)];
        assert_eq!(
            registry.validate_committee_proposal(&proposed).unwrap_err(),
            PassError::DuplicateViceAdmin.into()
        );
    }

    #[test]
    fn committee_proposal_allows_empty_vices_above_threshold() {
        let registry = registry();
        let proposed = [
            wallet(7),
            Pubkey::default(),
            wallet(3),
            wallet(4),
            Pubkey::default(),
        ];
        assert!(registry.validate_committee_proposal(&proposed).is_ok());
    }

    #[test]
    fn committee_proposal_rejects_too_few_seated_members() {
        // Two members cannot collect three distinct approvals, so such a
        // committee would be unable to govern itself.
        let registry = registry();
        let proposed = [
            wallet(7),
            Pubkey::default(),
            Pubkey::default(),
            wallet(4),
            Pubkey::default(),
        ];
        assert_eq!(
            registry.validate_committee_proposal(&proposed).unwrap_err(),
            PassError::CommitteeBelowThreshold.into()
        );
    }

    #[test]
    fn initial_committee_follows_membership_rules() {
        // The same rules gate the committee seated at initialization.
        let seated = [wallet(1), wallet(2), wallet(3), Pubkey::default(), Pubkey::default()];
        assert!(Registry::validate_committee_members(&seated).is_ok());

        let lone_admin = [wallet(1), Pubkey::default(), Pubkey::default(), Pubkey::default(), Pubkey::default()];
        assert_eq!(
            Registry::validate_committee_members(&lone_admin).unwrap_err(),
            PassError::CommitteeBelowThreshold.into()
        );

        let duplicated = [wallet(1), wallet(2), wallet(2), Pubkey::default(), Pubkey::default()];
        assert_eq!(
            Registry::validate_committee_members(&duplicated).unwrap_err(),
            PassError::DuplicateViceAdmin.into()
        );
    }

    #[test]
    fn committee_proposal_rejects_unchanged_committee() {
        let registry = registry();
        let proposed = registry.committee();
        assert_eq!(
            registry.validate_committee_proposal(&proposed).unwrap_err(),
            PassError::SameSuperAdmin.into()
        );
    }

    #[test]
    fn apply_committee_proposal_swaps_and_clears() {
        let mut registry = registry();
        registry.pending_committee =
            [wallet(7), wallet(8), Pubkey::default(), Pubkey::default(), Pubkey::default()];
        registry.committee_approvals.approve(0);
        registry.committee_approvals.approve(1);
        registry.committee_approvals.approve(2);

        registry.apply_committee_proposal();

        assert_eq!(registry.super_admin, wallet(7));
        assert_eq!(
            registry.vice_admins,
            [wallet(8), Pubkey::default(), Pubkey::default(), Pubkey::default()]
        );
        assert_eq!(registry.pending_committee, [Pubkey::default(); COMMITTEE_SIZE]);
        assert!(registry.committee_approvals.is_empty());
    }

    #[test]
    fn apply_withdraw_wallet_proposal_swaps_and_clears() {
        let mut registry = registry();
        registry.pending_withdraw_wallet = wallet(21);
        registry.withdraw_approvals.approve(0);
        registry.withdraw_approvals.approve(3);
        registry.withdraw_approvals.approve(4);

        registry.apply_withdraw_wallet_proposal();

        assert_eq!(registry.withdraw_wallet, wallet(21));
        assert_eq!(registry.pending_withdraw_wallet, Pubkey::default());
        assert!(registry.withdraw_approvals.is_empty());
    }

    #[test]
    fn reserve_fails_at_supply_cap() {
        let mut registry = registry();
        registry.tier_mut(Tier::Og).supply_cap = 100;
        registry.tier_mut(Tier::Og).reserved_count = 100;

        let err = registry.reserve(Tier::Og, ReserveKind::Public).unwrap_err();
        assert_eq!(err, PassError::MaxSupplyReached.into());
        assert_eq!(registry.tier(Tier::Og).reserved_count, 100);
    }

    #[test]
    fn zero_supply_cap_means_unlimited() {
        let mut registry = registry();
        for _ in 0..1000 {
            registry.reserve(Tier::Basic, ReserveKind::Public).unwrap();
        }
        assert_eq!(registry.tier(Tier::Basic).reserved_count, 1000);
    }

    #[test]
    fn admin_reserve_respects_admin_cap() {
        let mut registry = registry();
        registry.tier_mut(Tier::Regular).admin_mint_cap = 2;

        registry.reserve(Tier::Regular, ReserveKind::Admin).unwrap();
        registry.reserve(Tier::Regular, ReserveKind::Admin).unwrap();
        let err = registry.reserve(Tier::Regular, ReserveKind::Admin).unwrap_err();
        assert_eq!(err, PassError::AdminMintLimitReached.into());

        let config = registry.tier(Tier::Regular);
        assert_eq!(config.reserved_count, 2);
        assert_eq!(config.admin_mint_count, 2);
    }

    #[test]
    fn zero_admin_mint_cap_blocks_admin_mints_entirely() {
        let mut registry = registry();
        let err = registry.reserve(Tier::Og, ReserveKind::Admin).unwrap_err();
        assert_eq!(err, PassError::AdminMintLimitReached.into());
    }

    #[test]
    fn release_keeps_admin_mint_count() {
        let mut registry = registry();
        registry.tier_mut(Tier::Og).admin_mint_cap = 1;
        registry.reserve(Tier::Og, ReserveKind::Admin).unwrap();
        registry.release(Tier::Og).unwrap();

        let config = registry.tier(Tier::Og);
        assert_eq!(config.reserved_count, 0);
        // Burn must not refund the consumed admin slot.
        assert_eq!(config.admin_mint_count, 1);
        let err = registry.reserve(Tier::Og, ReserveKind::Admin).unwrap_err();
        assert_eq!(err, PassError::AdminMintLimitReached.into());
    }

    #[test]
    fn release_on_empty_tier_underflows() {
        let mut registry = registry();
        let err = registry.release(Tier::Basic).unwrap_err();
        assert_eq!(err, PassError::ReservedCountUnderflow.into());
    }

    #[test]
    fn withdrawal_validation_tracks_remaining_balance() {
        assert_eq!(validate_withdrawal(100, 60).unwrap(), 40);
        assert_eq!(validate_withdrawal(40, 40).unwrap(), 0);
        assert_eq!(
            validate_withdrawal(100, 0).unwrap_err(),
            PassError::InvalidWithdrawAmount.into()
        );
        assert_eq!(
            validate_withdrawal(40, 41).unwrap_err(),
            PassError::InsufficientVaultBalance.into()
        );
    }

    #[test]
    fn dongle_price_depends_on_reservation_status() {
        let registry = registry();
        assert_eq!(registry.dongle_price(true), 10_000_000);
        assert_eq!(registry.dongle_price(false), 50_000_000);
    }

    #[test]
    fn mint_window_gate() {
        let mut registry = registry();
        assert!(registry.mint_window_open(0));
        registry.mint_window_start = 1_700_000_000;
        assert!(!registry.mint_window_open(1_699_999_999));
        assert!(registry.mint_window_open(1_700_000_000));
    }

    #[test]
    fn reservation_held_iff_mint_recorded() {
        let mut reservation = Reservation::default();
        assert!(!reservation.is_held());

        reservation.set_held(wallet(9), wallet(40), Tier::Og, 1_700_000_000);
        assert!(reservation.is_held());
        assert_eq!(reservation.tier, Tier::Og);

        reservation.clear();
        assert!(!reservation.is_held());
        assert_eq!(reservation.owner, wallet(9));
    }

    proptest! {
        /// Random reserve/release sequences never break the tier invariants.
        #[test]
        fn tier_counters_never_violate_caps(
            supply_cap in 0u64..20,
            admin_cap in 0u64..10,
            ops in proptest::collection::vec((0usize..3, 0u8..3), 1..200)
        ) {
            let mut registry = registry();
            for tier in Tier::ALL {
                registry.tier_mut(tier).supply_cap = supply_cap;
                registry.tier_mut(tier).admin_mint_cap = admin_cap;
            }

            for (tier_index, action) in ops {
                let tier = Tier::ALL[tier_index];
                let _ = match action {
                    0 => registry.reserve(tier, ReserveKind::Public),
                    1 => registry.reserve(tier, ReserveKind::Admin),
                    _ => registry.release(tier),
                };
                prop_assert!(tier_invariants_hold(&registry));
            }
        }
    }
}
