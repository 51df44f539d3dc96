//! # Reservation Pass Program
//!
//! Solana program for an admin-governed reservation, custody, and issuance
//! ledger. Principals mint unique, non-transferable (soulbound) reservation
//! passes from tiered pools, paying a per-tier fee into an escrow vault; a
//! 3-of-5 admin committee jointly governs the committee itself and the
//! withdrawal destination, so no single key controls collected funds.
//!
//! ## Security
//! - Anchor account validation and constraints
//! - Role-based access (super admin, committee multisig)
//! - Supply caps and separately metered admin mint caps per tier
//! - Soulbound enforcement via freeze on the holder's token account
//! - No re-entrancy (plain CPIs, no callback pattern)

#![allow(unexpected_cfgs)]

pub mod errors;
pub mod events;
pub mod multisig;
pub mod state;

use anchor_lang::prelude::*;
use anchor_spl::associated_token::{get_associated_token_address, AssociatedToken};
use anchor_spl::token::{self, Mint, Token, TokenAccount};
use anchor_spl::token_interface;
use anchor_spl::token_interface::{transfer_checked, TokenInterface, TransferChecked};

use errors::PassError;
use events::*;
use multisig::{ApprovalOutcome, APPROVAL_THRESHOLD, COMMITTEE_SIZE};
use state::{InitializeRegistryArgs, Registry, Reservation, ReserveKind, Tier};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod reserve_pass {
    use super::*;

    /// Initialize the governance registry. Must be called exactly once; the
    /// signer becomes super admin, the vice admins are seated from the
    /// arguments (same membership rules as a rotation, so the multisig can
    /// reach its threshold from day one), and the vault for the initial
    /// payment mint is created.
    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        args: InitializeRegistryArgs,
    ) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let committee = [
            admin,
            args.vice_admins[0],
            args.vice_admins[1],
            args.vice_admins[2],
            args.vice_admins[3],
        ];
        Registry::validate_committee_members(&committee)?;
        require!(
            args.withdraw_wallet != Pubkey::default(),
            PassError::InvalidWithdrawWallet
        );
        require!(args.price_holder > 0, PassError::InvalidDonglePrice);
        require!(args.price_standard > 0, PassError::InvalidDonglePrice);
        for params in [&args.og, &args.regular, &args.basic] {
            require!(params.fee > 0, PassError::InvalidMintFee);
        }

        let registry = &mut ctx.accounts.registry;
        registry.super_admin = admin;
        registry.vice_admins = args.vice_admins;
        registry.withdraw_wallet = args.withdraw_wallet;
        registry.payment_mint = ctx.accounts.payment_mint.key();
        registry.purchase_enabled = false;
        registry.price_holder = args.price_holder;
        registry.price_standard = args.price_standard;
        registry.mint_window_start = args.mint_window_start;
        for (tier, params) in Tier::ALL.into_iter().zip([args.og, args.regular, args.basic]) {
            let config = registry.tier_mut(tier);
            config.fee = params.fee;
            config.supply_cap = params.supply_cap;
            config.admin_mint_cap = params.admin_mint_cap;
        }
        registry.bump = ctx.bumps.registry;

        msg!(
            "Registry initialized: super admin {}, payment mint {}",
            registry.super_admin,
            registry.payment_mint
        );
        Ok(())
    }

    /// Propose or approve a committee rotation (3-of-5 multisig).
    /// `committee[0]` is the new super admin, `committee[1..5]` the vices.
    /// The approval reaching the threshold applies the rotation in-call.
    pub fn set_admin_committee(
        ctx: Context<CommitteeAction>,
        committee: [Pubkey; COMMITTEE_SIZE],
    ) -> Result<()> {
        let signer = ctx.accounts.signer.key();
        let registry: &mut Registry = &mut ctx.accounts.registry;

        let member_index = registry
            .member_index(&signer)
            .ok_or(PassError::NotMultisigMember)?;
        registry.validate_committee_proposal(&committee)?;

        let outcome = multisig::propose_or_approve(
            &mut registry.pending_committee,
            &mut registry.committee_approvals,
            member_index,
            committee,
        )?;

        match outcome {
            ApprovalOutcome::Pending(approvals) => {
                msg!(
                    "Committee proposal by member {}: approvals {}/{}",
                    member_index,
                    approvals,
                    APPROVAL_THRESHOLD
                );
            }
            ApprovalOutcome::ThresholdReached => {
                let old_super_admin = registry.super_admin;
                registry.apply_committee_proposal();
                msg!(
                    "Committee rotated: super admin {} -> {}",
                    old_super_admin,
                    registry.super_admin
                );
                emit!(CommitteeRotated {
                    old_super_admin,
                    new_super_admin: registry.super_admin,
                    approvals: APPROVAL_THRESHOLD,
                    timestamp: Clock::get()?.unix_timestamp,
                });
            }
        }
        Ok(())
    }

    /// Cancel a pending committee rotation (any committee member).
    pub fn cancel_admin_committee_proposal(ctx: Context<CommitteeAction>) -> Result<()> {
        let signer = ctx.accounts.signer.key();
        let registry: &mut Registry = &mut ctx.accounts.registry;

        registry
            .member_index(&signer)
            .ok_or(PassError::NotMultisigMember)?;

        let proposed_super_admin = registry.pending_committee[0];
        multisig::cancel(
            &mut registry.pending_committee,
            &mut registry.committee_approvals,
        )?;

        msg!("Committee proposal cancelled by {}", signer);
        emit!(ProposalCancelled {
            cancelled_by: signer,
            proposed_value: proposed_super_admin,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    /// Propose or approve a withdraw wallet rotation (3-of-5 multisig).
    pub fn set_withdraw_wallet(
        ctx: Context<CommitteeAction>,
        new_withdraw_wallet: Pubkey,
    ) -> Result<()> {
        let signer = ctx.accounts.signer.key();
        let registry: &mut Registry = &mut ctx.accounts.registry;

        let member_index = registry
            .member_index(&signer)
            .ok_or(PassError::NotMultisigMember)?;
        require!(
            new_withdraw_wallet != Pubkey::default(),
            PassError::InvalidWithdrawWallet
        );
        require!(
            new_withdraw_wallet != registry.withdraw_wallet,
            PassError::SameWithdrawWallet
        );

        let outcome = multisig::propose_or_approve(
            &mut registry.pending_withdraw_wallet,
            &mut registry.withdraw_approvals,
            member_index,
            new_withdraw_wallet,
        )?;

        match outcome {
            ApprovalOutcome::Pending(approvals) => {
                msg!(
                    "Withdraw wallet proposal by member {}: approvals {}/{}",
                    member_index,
                    approvals,
                    APPROVAL_THRESHOLD
                );
            }
            ApprovalOutcome::ThresholdReached => {
                let old_wallet = registry.withdraw_wallet;
                registry.apply_withdraw_wallet_proposal();
                msg!(
                    "Withdraw wallet rotated: {} -> {}",
                    old_wallet,
                    registry.withdraw_wallet
                );
                emit!(WithdrawWalletRotated {
                    old_wallet,
                    new_wallet: registry.withdraw_wallet,
                    approvals: APPROVAL_THRESHOLD,
                    timestamp: Clock::get()?.unix_timestamp,
                });
            }
        }
        Ok(())
    }

    /// Cancel a pending withdraw wallet rotation (any committee member).
    pub fn cancel_withdraw_wallet_proposal(ctx: Context<CommitteeAction>) -> Result<()> {
        let signer = ctx.accounts.signer.key();
        let registry: &mut Registry = &mut ctx.accounts.registry;

        registry
            .member_index(&signer)
            .ok_or(PassError::NotMultisigMember)?;

        let proposed_wallet = registry.pending_withdraw_wallet;
        multisig::cancel(
            &mut registry.pending_withdraw_wallet,
            &mut registry.withdraw_approvals,
        )?;

        msg!("Withdraw wallet proposal cancelled by {}", signer);
        emit!(ProposalCancelled {
            cancelled_by: signer,
            proposed_value: proposed_wallet,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    /// Withdraw `amount` payment tokens from the vault to the registered
    /// withdraw wallet. Super admin only.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        let remaining = state::validate_withdrawal(ctx.accounts.vault.amount, amount)?;
        transfer_from_vault(&ctx, amount)?;

        emit!(VaultWithdrawal {
            super_admin: ctx.accounts.super_admin.key(),
            destination_wallet: ctx.accounts.registry.withdraw_wallet,
            amount,
            remaining_balance: remaining,
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!(
            "Withdrew {} to {}",
            amount,
            ctx.accounts.registry.withdraw_wallet
        );
        Ok(())
    }

    /// Withdraw the entire vault balance to the registered withdraw wallet.
    /// Super admin only.
    pub fn withdraw_all(ctx: Context<Withdraw>) -> Result<()> {
        let amount = ctx.accounts.vault.amount;
        require!(amount > 0, PassError::InsufficientVaultBalance);
        state::validate_withdrawal(amount, amount)?;
        transfer_from_vault(&ctx, amount)?;

        emit!(VaultWithdrawal {
            super_admin: ctx.accounts.super_admin.key(),
            destination_wallet: ctx.accounts.registry.withdraw_wallet,
            amount,
            remaining_balance: 0,
            timestamp: Clock::get()?.unix_timestamp,
        });
        msg!(
            "Withdrew all {} to {}",
            amount,
            ctx.accounts.registry.withdraw_wallet
        );
        Ok(())
    }

    /// Switch the accepted payment mint. The old vault must be empty; a
    /// fresh vault is associated with the new mint. Super admin only.
    pub fn update_payment_mint(ctx: Context<UpdatePaymentMint>) -> Result<()> {
        let old_mint = ctx.accounts.old_payment_mint.key();
        let new_mint = ctx.accounts.new_payment_mint.key();
        require!(old_mint != new_mint, PassError::SamePaymentMint);

        ctx.accounts.registry.payment_mint = new_mint;

        msg!("Payment mint updated: {} -> {}", old_mint, new_mint);
        emit!(PaymentMintUpdated {
            old_mint,
            new_mint,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    /// Self-service mint: pay the tier fee into the vault and receive a
    /// soulbound pass. One live pass per principal.
    pub fn mint_pass(ctx: Context<MintPass>, tier: Tier) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        require!(
            ctx.accounts.registry.mint_window_open(now),
            PassError::MintNotStarted
        );
        require!(
            !ctx.accounts.reservation.is_held(),
            PassError::UserAlreadyMinted
        );

        // Deposit the fee before claiming the tier slot. Both land in the
        // same transaction, so a failure at either point unwinds the other.
        let fee = ctx.accounts.registry.tier(tier).fee;
        transfer_checked(
            CpiContext::new(
                ctx.accounts.payment_token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.payer_token_account.to_account_info(),
                    mint: ctx.accounts.payment_mint.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                    authority: ctx.accounts.signer.to_account_info(),
                },
            ),
            fee,
            ctx.accounts.payment_mint.decimals,
        )?;
        ctx.accounts.registry.reserve(tier, ReserveKind::Public)?;

        issue_pass(
            &ctx.accounts.token_program,
            &ctx.accounts.mint,
            &ctx.accounts.token_account,
            &ctx.accounts.registry,
        )?;

        let mint_key = ctx.accounts.mint.key();
        let owner = ctx.accounts.signer.key();
        ctx.accounts.reservation.set_held(owner, mint_key, tier, now);

        msg!("Pass minted: {:?} tier, mint {}, fee {}", tier, mint_key, fee);
        emit!(PassMinted {
            owner,
            mint: mint_key,
            tier,
            fee_paid: fee,
            admin_initiated: false,
            timestamp: now,
        });
        Ok(())
    }

    /// Mint a pass to `recipient` on the super admin's authority. Consumes
    /// one admin mint slot of the tier; no fee is charged.
    pub fn admin_mint_pass(ctx: Context<AdminMintPass>, tier: Tier) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        require!(
            !ctx.accounts.reservation.is_held(),
            PassError::UserAlreadyMinted
        );

        ctx.accounts.registry.reserve(tier, ReserveKind::Admin)?;

        issue_pass(
            &ctx.accounts.token_program,
            &ctx.accounts.mint,
            &ctx.accounts.token_account,
            &ctx.accounts.registry,
        )?;

        let mint_key = ctx.accounts.mint.key();
        let owner = ctx.accounts.recipient.key();
        ctx.accounts.reservation.set_held(owner, mint_key, tier, now);

        msg!("Admin minted {:?} tier pass {} for {}", tier, mint_key, owner);
        emit!(PassMinted {
            owner,
            mint: mint_key,
            tier,
            fee_paid: 0,
            admin_initiated: true,
            timestamp: now,
        });
        Ok(())
    }

    /// Burn the caller's pass: thaw the frozen token account, burn the
    /// token, close the account, and release the tier slot. The reservation
    /// record is cleared so a later re-mint is permitted.
    pub fn burn_pass(ctx: Context<BurnPass>) -> Result<()> {
        let mint_key = ctx.accounts.mint.key();
        let owner = ctx.accounts.signer.key();
        require!(
            ctx.accounts.reservation.is_held()
                && ctx.accounts.reservation.nft_mint == mint_key,
            PassError::UserDoesNotOwnNft
        );
        let expected_ata = get_associated_token_address(&owner, &mint_key);
        require!(
            ctx.accounts.token_account.key() == expected_ata,
            PassError::InvalidTokenAccount
        );

        // The holding account is frozen (soulbound); thaw with the registry
        // PDA as freeze authority before burning.
        let bump = ctx.accounts.registry.bump;
        let signer_seeds: &[&[&[u8]]] = &[&[b"registry", &[bump]]];
        token::thaw_account(CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::ThawAccount {
                account: ctx.accounts.token_account.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                authority: ctx.accounts.registry.to_account_info(),
            },
            signer_seeds,
        ))?;

        token::burn(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                token::Burn {
                    mint: ctx.accounts.mint.to_account_info(),
                    from: ctx.accounts.token_account.to_account_info(),
                    authority: ctx.accounts.signer.to_account_info(),
                },
            ),
            1,
        )?;

        token::close_account(CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::CloseAccount {
                account: ctx.accounts.token_account.to_account_info(),
                destination: ctx.accounts.signer.to_account_info(),
                authority: ctx.accounts.signer.to_account_info(),
            },
        ))?;

        let tier = ctx.accounts.reservation.tier;
        ctx.accounts.registry.release(tier)?;
        ctx.accounts.reservation.clear();

        msg!("Pass {} burned, {:?} tier slot released", mint_key, tier);
        emit!(PassBurned {
            owner,
            mint: mint_key,
            tier,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    /// Purchase a dongle. Pass holders pay the discounted price; everyone
    /// else pays the standard price. A reservation record must already
    /// exist (even an empty one from a past mint/burn cycle). Pure payment
    /// event: no counters or record fields change.
    pub fn purchase_dongle(ctx: Context<PurchaseDongle>) -> Result<()> {
        require!(
            ctx.accounts.registry.purchase_enabled,
            PassError::PurchaseNotStarted
        );

        let holds_pass = ctx.accounts.reservation.is_held();
        let price = ctx.accounts.registry.dongle_price(holds_pass);

        transfer_checked(
            CpiContext::new(
                ctx.accounts.payment_token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.buyer_token_account.to_account_info(),
                    mint: ctx.accounts.payment_mint.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                    authority: ctx.accounts.buyer.to_account_info(),
                },
            ),
            price,
            ctx.accounts.payment_mint.decimals,
        )?;

        msg!("Dongle purchased for {} (holder: {})", price, holds_pass);
        emit!(DonglePurchased {
            buyer: ctx.accounts.buyer.key(),
            price,
            holder_discount: holds_pass,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    /// Update a tier's mint fee. Super admin only.
    pub fn update_tier_fee(ctx: Context<UpdateRegistry>, tier: Tier, fee: u64) -> Result<()> {
        require!(fee > 0, PassError::InvalidMintFee);
        ctx.accounts.registry.tier_mut(tier).fee = fee;
        Ok(())
    }

    /// Update a tier's supply cap (0 = unlimited). Super admin only.
    pub fn update_tier_supply_cap(
        ctx: Context<UpdateRegistry>,
        tier: Tier,
        supply_cap: u64,
    ) -> Result<()> {
        let config = ctx.accounts.registry.tier_mut(tier);
        require!(
            supply_cap == 0 || supply_cap >= config.reserved_count,
            PassError::InvalidMaxSupply
        );
        config.supply_cap = supply_cap;
        Ok(())
    }

    /// Update a tier's admin mint cap. Super admin only. Cannot go below
    /// the admin mints already consumed.
    pub fn update_tier_admin_mint_cap(
        ctx: Context<UpdateRegistry>,
        tier: Tier,
        admin_mint_cap: u64,
    ) -> Result<()> {
        let config = ctx.accounts.registry.tier_mut(tier);
        require!(
            admin_mint_cap >= config.admin_mint_count,
            PassError::InvalidMaxSupply
        );
        config.admin_mint_cap = admin_mint_cap;
        Ok(())
    }

    /// Update a tier's collection mint. Super admin only.
    pub fn update_tier_collection(
        ctx: Context<UpdateRegistry>,
        tier: Tier,
        collection_mint: Pubkey,
    ) -> Result<()> {
        require!(
            collection_mint != Pubkey::default(),
            PassError::InvalidCollection
        );
        ctx.accounts.registry.tier_mut(tier).collection_mint = collection_mint;
        Ok(())
    }

    /// Update both dongle prices. Super admin only.
    pub fn update_dongle_prices(
        ctx: Context<UpdateRegistry>,
        price_holder: u64,
        price_standard: u64,
    ) -> Result<()> {
        require!(price_holder > 0, PassError::InvalidDonglePrice);
        require!(price_standard > 0, PassError::InvalidDonglePrice);
        let registry = &mut ctx.accounts.registry;
        registry.price_holder = price_holder;
        registry.price_standard = price_standard;
        Ok(())
    }

    /// Open or close the dongle purchase flow. Super admin only.
    pub fn update_purchase_enabled(
        ctx: Context<UpdateRegistry>,
        purchase_enabled: bool,
    ) -> Result<()> {
        ctx.accounts.registry.purchase_enabled = purchase_enabled;
        Ok(())
    }

    /// Update the mint window start (0 = unrestricted). Super admin only.
    pub fn update_mint_window_start(
        ctx: Context<UpdateRegistry>,
        mint_window_start: i64,
    ) -> Result<()> {
        ctx.accounts.registry.mint_window_start = mint_window_start;
        Ok(())
    }
}

/// Move `amount` from the vault to the withdraw wallet's token account,
/// signed by the registry PDA.
fn transfer_from_vault(ctx: &Context<Withdraw>, amount: u64) -> Result<()> {
    let bump = ctx.accounts.registry.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[b"registry", &[bump]]];
    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                mint: ctx.accounts.payment_mint.to_account_info(),
                to: ctx.accounts.withdraw_token_account.to_account_info(),
                authority: ctx.accounts.registry.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.payment_mint.decimals,
    )
}

/// Issue one soulbound pass: mint a single token to the holder's account,
/// then freeze it so it can never be transferred. The freeze is a directive
/// to the token program; this core never re-verifies freeze state.
fn issue_pass<'info>(
    token_program: &Program<'info, Token>,
    mint: &Account<'info, Mint>,
    token_account: &Account<'info, TokenAccount>,
    registry: &Account<'info, Registry>,
) -> Result<()> {
    let bump = registry.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[b"registry", &[bump]]];

    token::mint_to(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            token::MintTo {
                mint: mint.to_account_info(),
                to: token_account.to_account_info(),
                authority: registry.to_account_info(),
            },
            signer_seeds,
        ),
        1,
    )?;

    token::freeze_account(CpiContext::new_with_signer(
        token_program.to_account_info(),
        token::FreezeAccount {
            account: token_account.to_account_info(),
            mint: mint.to_account_info(),
            authority: registry.to_account_info(),
        },
        signer_seeds,
    ))?;

    Ok(())
}

// --- Account structs and validation ---

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + Registry::LEN,
        seeds = [b"registry"],
        bump
    )]
    pub registry: Box<Account<'info, Registry>>,

    /// The SPL mint accepted for fees and purchases (Token or Token-2022).
    pub payment_mint: InterfaceAccount<'info, token_interface::Mint>,

    /// Escrow vault for the payment mint, owned by the registry PDA.
    #[account(
        init,
        payer = admin,
        seeds = [b"vault", payment_mint.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = registry,
        token::token_program = payment_token_program,
    )]
    pub vault: InterfaceAccount<'info, token_interface::TokenAccount>,

    pub payment_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Shared accounts for multisig proposals, approvals, and cancellations.
/// Membership is checked in the handler against the committee slots.
#[derive(Accounts)]
pub struct CommitteeAction<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump,
    )]
    pub registry: Box<Account<'info, Registry>>,
}

/// Super-admin-only registry field updates.
#[derive(Accounts)]
pub struct UpdateRegistry<'info> {
    pub super_admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump,
        constraint = registry.super_admin == super_admin.key() @ PassError::Unauthorized
    )]
    pub registry: Box<Account<'info, Registry>>,
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub super_admin: Signer<'info>,

    #[account(
        seeds = [b"registry"],
        bump = registry.bump,
        constraint = registry.super_admin == super_admin.key() @ PassError::Unauthorized
    )]
    pub registry: Box<Account<'info, Registry>>,

    #[account(
        constraint = payment_mint.key() == registry.payment_mint @ PassError::InvalidPaymentMint
    )]
    pub payment_mint: InterfaceAccount<'info, token_interface::Mint>,

    #[account(
        mut,
        seeds = [b"vault", payment_mint.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = registry,
        token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, token_interface::TokenAccount>,

    /// Destination token account; must belong to the registered withdraw
    /// wallet, never an arbitrary destination.
    #[account(
        mut,
        constraint = withdraw_token_account.mint == payment_mint.key()
            @ PassError::InvalidPaymentTokenAccount,
        constraint = withdraw_token_account.owner == registry.withdraw_wallet
            @ PassError::InvalidWithdrawWallet
    )]
    pub withdraw_token_account: InterfaceAccount<'info, token_interface::TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct UpdatePaymentMint<'info> {
    #[account(mut)]
    pub super_admin: Signer<'info>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump,
        constraint = registry.super_admin == super_admin.key() @ PassError::Unauthorized
    )]
    pub registry: Box<Account<'info, Registry>>,

    #[account(
        constraint = old_payment_mint.key() == registry.payment_mint
            @ PassError::InvalidPaymentMint,
        mint::token_program = old_payment_token_program
    )]
    pub old_payment_mint: InterfaceAccount<'info, token_interface::Mint>,

    /// Old vault; must be drained before the payment mint can change.
    #[account(
        seeds = [b"vault", old_payment_mint.key().as_ref()],
        bump,
        token::mint = old_payment_mint,
        token::authority = registry,
        token::token_program = old_payment_token_program,
        constraint = old_vault.amount == 0 @ PassError::VaultNotEmpty
    )]
    pub old_vault: InterfaceAccount<'info, token_interface::TokenAccount>,

    pub old_payment_token_program: Interface<'info, TokenInterface>,

    #[account(mint::token_program = new_payment_token_program)]
    pub new_payment_mint: InterfaceAccount<'info, token_interface::Mint>,

    /// Fresh vault for the new mint. init_if_needed allows switching back
    /// to a previously used payment mint.
    #[account(
        init_if_needed,
        payer = super_admin,
        seeds = [b"vault", new_payment_mint.key().as_ref()],
        bump,
        token::mint = new_payment_mint,
        token::authority = registry,
        token::token_program = new_payment_token_program,
    )]
    pub new_vault: InterfaceAccount<'info, token_interface::TokenAccount>,

    pub new_payment_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct MintPass<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump,
    )]
    pub registry: Box<Account<'info, Registry>>,

    /// Per-principal reservation record, created on first mint.
    #[account(
        init_if_needed,
        payer = signer,
        space = 8 + Reservation::LEN,
        seeds = [b"reservation", signer.key().as_ref()],
        bump
    )]
    pub reservation: Box<Account<'info, Reservation>>,

    /// New pass mint; the registry PDA is mint and freeze authority.
    #[account(
        init,
        payer = signer,
        mint::decimals = 0,
        mint::authority = registry,
        mint::freeze_authority = registry,
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// Holder's associated token account for the pass.
    #[account(
        init,
        payer = signer,
        associated_token::mint = mint,
        associated_token::authority = signer,
    )]
    pub token_account: Box<Account<'info, TokenAccount>>,

    // === Payment accounts ===
    #[account(
        constraint = payment_mint.key() == registry.payment_mint @ PassError::InvalidPaymentMint
    )]
    pub payment_mint: InterfaceAccount<'info, token_interface::Mint>,

    #[account(
        mut,
        constraint = payer_token_account.mint == payment_mint.key()
            @ PassError::InvalidPaymentTokenAccount,
        constraint = payer_token_account.owner == signer.key()
            @ PassError::InvalidPaymentTokenAccount
    )]
    pub payer_token_account: InterfaceAccount<'info, token_interface::TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault", payment_mint.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = registry,
        token::token_program = payment_token_program,
    )]
    pub vault: InterfaceAccount<'info, token_interface::TokenAccount>,

    pub payment_token_program: Interface<'info, TokenInterface>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AdminMintPass<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    /// CHECK: pass recipient; only its key is used (reservation PDA seed
    /// and token account authority).
    pub recipient: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump,
        constraint = registry.super_admin == admin.key() @ PassError::Unauthorized
    )]
    pub registry: Box<Account<'info, Registry>>,

    /// Recipient's reservation record, created on first mint.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + Reservation::LEN,
        seeds = [b"reservation", recipient.key().as_ref()],
        bump
    )]
    pub reservation: Box<Account<'info, Reservation>>,

    #[account(
        init,
        payer = admin,
        mint::decimals = 0,
        mint::authority = registry,
        mint::freeze_authority = registry,
    )]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = admin,
        associated_token::mint = mint,
        associated_token::authority = recipient,
    )]
    pub token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct BurnPass<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump,
    )]
    pub registry: Box<Account<'info, Registry>>,

    #[account(
        mut,
        seeds = [b"reservation", signer.key().as_ref()],
        bump
    )]
    pub reservation: Box<Account<'info, Reservation>>,

    #[account(mut)]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = token_account.mint == mint.key() @ PassError::InvalidTokenAccount,
        constraint = token_account.owner == signer.key() @ PassError::InvalidTokenAccount
    )]
    pub token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct PurchaseDongle<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        seeds = [b"registry"],
        bump = registry.bump,
    )]
    pub registry: Box<Account<'info, Registry>>,

    /// Buyer's reservation record. Must already exist (absence is a
    /// precondition failure); holding status selects the price.
    #[account(
        seeds = [b"reservation", buyer.key().as_ref()],
        bump
    )]
    pub reservation: Box<Account<'info, Reservation>>,

    #[account(
        constraint = payment_mint.key() == registry.payment_mint @ PassError::InvalidPaymentMint
    )]
    pub payment_mint: InterfaceAccount<'info, token_interface::Mint>,

    #[account(
        mut,
        constraint = buyer_token_account.mint == payment_mint.key()
            @ PassError::InvalidPaymentTokenAccount,
        constraint = buyer_token_account.owner == buyer.key()
            @ PassError::InvalidPaymentTokenAccount
    )]
    pub buyer_token_account: InterfaceAccount<'info, token_interface::TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault", payment_mint.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = registry,
        token::token_program = payment_token_program,
    )]
    pub vault: InterfaceAccount<'info, token_interface::TokenAccount>,

    pub payment_token_program: Interface<'info, TokenInterface>,
}
