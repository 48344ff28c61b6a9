//! Block reward schedule.
//!
//! The schedule is an ordered list of tranches laid end to end from
//! `start_block`. Tranche `k` covers blocks `[start_k, start_k + blocks_k)`
//! and emits `amount` reward units per block. Past the last tranche, and
//! before `start_block`, the rate is zero.

use soroban_sdk::{contracttype, Vec};

use crate::ContractError;

/// A contiguous run of blocks with a constant reward rate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTranche {
    /// Reward units emitted per block.
    pub amount: i128,
    /// Number of blocks the tranche lasts.
    pub blocks: u64,
}

/// Process-wide emission state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleState {
    pub start_block: u64,
    pub tranches: Vec<RewardTranche>,
    /// `1` while emitting, `0` once the kill-switch has been thrown.
    pub multiplier: u32,
    /// Block at which the kill-switch was thrown. Reward up to and including
    /// this block is still owed to pools that settle later.
    pub halted_at: Option<u64>,
}

impl ScheduleState {
    pub fn new(start_block: u64, tranches: Vec<RewardTranche>) -> Result<Self, ContractError> {
        if tranches.is_empty() {
            return Err(ContractError::InvalidInput);
        }
        let schedule = ScheduleState {
            start_block,
            tranches,
            multiplier: 1,
            halted_at: None,
        };
        for tranche in schedule.tranches.iter() {
            validate_tranche(&tranche)?;
        }
        // Reject schedules whose end does not fit in a block number.
        schedule.end_block()?;
        Ok(schedule)
    }

    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    /// First block after the final tranche.
    pub fn end_block(&self) -> Result<u64, ContractError> {
        self.tranches
            .iter()
            .try_fold(self.start_block, |end, tranche| end.checked_add(tranche.blocks))
            .ok_or(ContractError::MathOverflow)
    }

    /// Instantaneous reward rate at `block`.
    pub fn rate_at(&self, block: u64) -> i128 {
        if self.multiplier == 0 || block < self.start_block {
            return 0;
        }
        let mut tranche_start = self.start_block;
        for tranche in self.tranches.iter() {
            let tranche_end = tranche_start.saturating_add(tranche.blocks);
            if block < tranche_end {
                return tranche.amount;
            }
            tranche_start = tranche_end;
        }
        0
    }

    /// Total reward scheduled over the blocks `(from, to]`.
    ///
    /// Sums `overlap × amount` for every tranche that intersects the range,
    /// so the cost is bounded by the number of tranches, not the number of
    /// blocks. A halted schedule stops counting at `halted_at`.
    pub fn integrate(&self, from: u64, to: u64) -> Result<i128, ContractError> {
        let to = match self.halted_at {
            Some(halted_at) => to.min(halted_at),
            None => to,
        };
        if to <= from {
            return Ok(0);
        }

        // Half-open block range [lo, hi).
        let lo = from.saturating_add(1);
        let hi = to.saturating_add(1);

        let mut total: i128 = 0;
        let mut tranche_start = self.start_block;
        for tranche in self.tranches.iter() {
            if tranche_start >= hi {
                break;
            }
            let tranche_end = tranche_start.saturating_add(tranche.blocks);
            let overlap_lo = lo.max(tranche_start);
            let overlap_hi = hi.min(tranche_end);
            if overlap_hi > overlap_lo {
                let part = i128::from(overlap_hi - overlap_lo)
                    .checked_mul(tranche.amount)
                    .ok_or(ContractError::MathOverflow)?;
                total = total
                    .checked_add(part)
                    .ok_or(ContractError::MathOverflow)?;
            }
            tranche_start = tranche_end;
        }
        Ok(total)
    }

    /// Throw the kill-switch at `block`. Calling it again keeps the first
    /// halt block.
    pub fn halt(&mut self, block: u64) {
        if self.halted_at.is_none() {
            self.halted_at = Some(block);
        }
        self.multiplier = 0;
    }

    /// Append `tranche` to the schedule.
    ///
    /// If the schedule ended at or before `current_block`, a zero-rate gap is
    /// inserted first so the new tranche starts at `current_block + 1` and
    /// the rate history of past blocks is unchanged. Callers must have
    /// settled every pool at `current_block` beforehand.
    pub fn push_tranche(
        &mut self,
        tranche: RewardTranche,
        current_block: u64,
    ) -> Result<(), ContractError> {
        if self.is_halted() {
            return Err(ContractError::EmissionsHalted);
        }
        validate_tranche(&tranche)?;

        let end = self.end_block()?;
        if end <= current_block {
            let gap = current_block - end + 1;
            self.tranches.push_back(RewardTranche {
                amount: 0,
                blocks: gap,
            });
        }
        self.tranches.push_back(tranche);
        self.end_block()?;
        Ok(())
    }
}

fn validate_tranche(tranche: &RewardTranche) -> Result<(), ContractError> {
    if tranche.amount < 0 || tranche.blocks == 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
