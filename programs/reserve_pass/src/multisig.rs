//! Generic M-of-N approval protocol for committee-governed parameters.
//!
//! The registry embeds two proposal slots (committee rotation, withdraw
//! wallet rotation); both run the same protocol: any committee member may
//! propose a value, further members approve the identical value, and the
//! approval that reaches the threshold applies it in the same call.
//! Approval order does not matter; only the set of distinct approvers does.

use anchor_lang::prelude::*;

use crate::errors::PassError;

/// Committee slots: one super admin plus four vice admins.
pub const COMMITTEE_SIZE: usize = 5;

/// Distinct approvals required before a proposal takes effect.
pub const APPROVAL_THRESHOLD: u8 = 3;

/// Set of committee member indices that approved the pending proposal.
/// The representation is private; callers only see set semantics.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ApprovalSet {
    bits: u8,
}

impl ApprovalSet {
    pub const LEN: usize = 1;

    pub fn is_approved(&self, index: usize) -> bool {
        debug_assert!(index < COMMITTEE_SIZE);
        self.bits & (1 << index) != 0
    }

    pub fn approve(&mut self, index: usize) {
        debug_assert!(index < COMMITTEE_SIZE);
        self.bits |= 1 << index;
    }

    pub fn count(&self) -> u8 {
        self.bits.count_ones() as u8
    }

    pub fn reset(&mut self) {
        self.bits = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// A value that can occupy a proposal slot. Emptiness is encoded with a
/// sentinel (default pubkeys), matching how the slot is stored on chain.
pub trait ProposalValue: Copy + PartialEq {
    fn is_empty(&self) -> bool;
    fn clear(&mut self);
}

impl ProposalValue for Pubkey {
    fn is_empty(&self) -> bool {
        *self == Pubkey::default()
    }

    fn clear(&mut self) {
        *self = Pubkey::default();
    }
}

impl ProposalValue for [Pubkey; COMMITTEE_SIZE] {
    // A valid committee proposal always has a non-empty super admin slot,
    // so the all-default array is unambiguous as "no proposal".
    fn is_empty(&self) -> bool {
        *self == [Pubkey::default(); COMMITTEE_SIZE]
    }

    fn clear(&mut self) {
        *self = [Pubkey::default(); COMMITTEE_SIZE];
    }
}

/// Outcome of a propose-or-approve call that did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Proposal recorded or approval added; carries the approval count so far.
    Pending(u8),
    /// Threshold reached. The caller must apply the pending value and clear
    /// the slot and approval set within the same call.
    ThresholdReached,
}

/// Record a proposal or an approval from committee member `member_index`.
/// Membership and value validation are the caller's responsibility.
pub fn propose_or_approve<T: ProposalValue>(
    slot: &mut T,
    approvals: &mut ApprovalSet,
    member_index: usize,
    value: T,
) -> Result<ApprovalOutcome> {
    if slot.is_empty() {
        *slot = value;
        approvals.reset();
        approvals.approve(member_index);
        return Ok(ApprovalOutcome::Pending(1));
    }

    if *slot != value {
        // A competing value requires explicit cancellation first.
        return err!(PassError::DifferentProposalPending);
    }

    require!(
        !approvals.is_approved(member_index),
        PassError::AlreadyApproved
    );
    approvals.approve(member_index);

    if approvals.count() >= APPROVAL_THRESHOLD {
        Ok(ApprovalOutcome::ThresholdReached)
    } else {
        Ok(ApprovalOutcome::Pending(approvals.count()))
    }
}

/// Cancel a pending proposal. Membership is the caller's responsibility.
pub fn cancel<T: ProposalValue>(slot: &mut T, approvals: &mut ApprovalSet) -> Result<()> {
    require!(!slot.is_empty(), PassError::NoProposalPending);
    slot.clear();
    approvals.reset();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wallet(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    #[test]
    fn first_call_creates_proposal_with_one_approval() {
        let mut slot = Pubkey::default();
        let mut approvals = ApprovalSet::default();

        let outcome = propose_or_approve(&mut slot, &mut approvals, 2, wallet(9)).unwrap();
        assert_eq!(outcome, ApprovalOutcome::Pending(1));
        assert_eq!(slot, wallet(9));
        assert!(approvals.is_approved(2));
        assert_eq!(approvals.count(), 1);
    }

    #[test]
    fn third_distinct_approver_reaches_threshold() {
        let mut slot = Pubkey::default();
        let mut approvals = ApprovalSet::default();

        assert_eq!(
            propose_or_approve(&mut slot, &mut approvals, 1, wallet(9)).unwrap(),
            ApprovalOutcome::Pending(1)
        );
        assert_eq!(
            propose_or_approve(&mut slot, &mut approvals, 0, wallet(9)).unwrap(),
            ApprovalOutcome::Pending(2)
        );
        assert_eq!(
            propose_or_approve(&mut slot, &mut approvals, 3, wallet(9)).unwrap(),
            ApprovalOutcome::ThresholdReached
        );
    }

    #[test]
    fn approval_bits_accumulate_by_member_index() {
        // Proposer at index 1 sets bit 1, second approver at index 0 adds bit 0.
        let mut slot = Pubkey::default();
        let mut approvals = ApprovalSet::default();

        propose_or_approve(&mut slot, &mut approvals, 1, wallet(9)).unwrap();
        assert_eq!(approvals.bits, 0b0000_0010);

        propose_or_approve(&mut slot, &mut approvals, 0, wallet(9)).unwrap();
        assert_eq!(approvals.bits, 0b0000_0011);

        propose_or_approve(&mut slot, &mut approvals, 3, wallet(9)).unwrap();
        // Threshold reached; the caller clears both. Simulate that here.
        cancel(&mut slot, &mut approvals).unwrap();
        assert_eq!(approvals.bits, 0);
        assert!(slot.is_empty());
    }

    #[test]
    fn re_approval_by_same_member_fails() {
        let mut slot = Pubkey::default();
        let mut approvals = ApprovalSet::default();

        propose_or_approve(&mut slot, &mut approvals, 4, wallet(9)).unwrap();
        let err = propose_or_approve(&mut slot, &mut approvals, 4, wallet(9)).unwrap_err();
        assert_eq!(err, PassError::AlreadyApproved.into());
        // Failed approval leaves the slot untouched.
        assert_eq!(approvals.count(), 1);
    }

    #[test]
    fn different_value_is_rejected_without_mutation() {
        let mut slot = Pubkey::default();
        let mut approvals = ApprovalSet::default();

        propose_or_approve(&mut slot, &mut approvals, 0, wallet(9)).unwrap();
        let err = propose_or_approve(&mut slot, &mut approvals, 1, wallet(7)).unwrap_err();
        assert_eq!(err, PassError::DifferentProposalPending.into());
        assert_eq!(slot, wallet(9));
        assert_eq!(approvals.count(), 1);
        assert!(!approvals.is_approved(1));
    }

    #[test]
    fn cancel_clears_slot_and_approvals() {
        let mut slot = Pubkey::default();
        let mut approvals = ApprovalSet::default();

        propose_or_approve(&mut slot, &mut approvals, 0, wallet(9)).unwrap();
        propose_or_approve(&mut slot, &mut approvals, 2, wallet(9)).unwrap();
        cancel(&mut slot, &mut approvals).unwrap();
        assert!(slot.is_empty());
        assert!(approvals.is_empty());
    }

    #[test]
    fn cancel_without_pending_proposal_fails() {
        let mut slot = Pubkey::default();
        let mut approvals = ApprovalSet::default();

        let err = cancel(&mut slot, &mut approvals).unwrap_err();
        assert_eq!(err, PassError::NoProposalPending.into());
    }

    #[test]
    fn committee_array_slot_uses_all_default_sentinel() {
        let mut slot = [Pubkey::default(); COMMITTEE_SIZE];
        let mut approvals = ApprovalSet::default();

        let committee = [wallet(1), wallet(2), wallet(3), Pubkey::default(), Pubkey::default()];
        propose_or_approve(&mut slot, &mut approvals, 0, committee).unwrap();
        assert!(!slot.is_empty());
        assert_eq!(slot, committee);
    }

    proptest! {
        /// No interleaving of approvals and cancellations applies a value
        /// before three distinct members approved the same pending value.
        #[test]
        fn threshold_requires_three_distinct_approvers(
            ops in proptest::collection::vec((0usize..COMMITTEE_SIZE, 0u8..3), 1..40)
        ) {
            let mut slot = Pubkey::default();
            let mut approvals = ApprovalSet::default();
            let mut distinct: std::collections::HashSet<usize> = Default::default();

            for (member, action) in ops {
                if action == 0 {
                    // Cancel path.
                    if cancel(&mut slot, &mut approvals).is_ok() {
                        distinct.clear();
                    }
                    continue;
                }
                let was_fresh_proposal = slot.is_empty();
                match propose_or_approve(&mut slot, &mut approvals, member, wallet(9)) {
                    Ok(ApprovalOutcome::ThresholdReached) => {
                        distinct.insert(member);
                        prop_assert_eq!(distinct.len(), APPROVAL_THRESHOLD as usize);
                        // Caller applies and clears.
                        cancel(&mut slot, &mut approvals).unwrap();
                        distinct.clear();
                    }
                    Ok(ApprovalOutcome::Pending(n)) => {
                        if was_fresh_proposal {
                            distinct.clear();
                        }
                        distinct.insert(member);
                        prop_assert_eq!(n as usize, distinct.len());
                        prop_assert!(n < APPROVAL_THRESHOLD);
                    }
                    Err(_) => {}
                }
                // Approval set is empty exactly when no proposal is pending.
                prop_assert_eq!(slot.is_empty(), approvals.is_empty());
            }
        }
    }
}
