//! Reward accrual ledger.
//!
//! Each pool keeps a running `acc_reward_per_share`, the reward owed to one
//! unit of stake since the pool was created, scaled by [`ACC_PRECISION`].
//! Each position keeps a `reward_debt`: the part of `amount × acc` that has
//! already been paid out or was never owed. Pending reward is
//!
//! ```text
//! pending = amount × acc / ACC_PRECISION − reward_debt
//! ```
//!
//! so a claim never needs to look at any other participant.

use soroban_sdk::{contracttype, Env};

use crate::{registry::Pool, schedule::ScheduleState, storage, ContractError};

/// Fixed-point scaling factor for `acc_reward_per_share`.
pub const ACC_PRECISION: i128 = 1_000_000_000_000;

pub const BPS_DENOMINATOR: u32 = 10_000;

/// A user's stake in one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    pub reward_debt: i128,
}

/// Split of one pool's scheduled reward between its stakers and the dev.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Emission {
    pub stakers: i128,
    pub dev_cut: i128,
}

/// Everything a settlement reads besides the pool itself, loaded once per
/// operation.
pub struct Accrual {
    pub schedule: ScheduleState,
    pub total_allocation_points: u64,
    pub dev_cut_bps: u32,
    pub block: u64,
}

impl Accrual {
    pub fn load(env: &Env) -> Result<Self, ContractError> {
        Ok(Accrual {
            schedule: storage::schedule(env)?,
            total_allocation_points: storage::total_allocation_points(env),
            dev_cut_bps: storage::config(env)?.dev_cut_bps,
            block: storage::current_block(env),
        })
    }

    /// Bring `pool` up to the current block. Returns the dev cut produced.
    pub fn settle(&self, pool: &mut Pool) -> Result<i128, ContractError> {
        settle(
            pool,
            &self.schedule,
            self.total_allocation_points,
            self.dev_cut_bps,
            self.block,
        )
    }
}

fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, ContractError> {
    a.checked_mul(b)
        .and_then(|product| product.checked_div(denominator))
        .ok_or(ContractError::MathOverflow)
}

/// `amount × bps / 10_000`, rounded down.
pub fn bps_of(amount: i128, bps: u32) -> Result<i128, ContractError> {
    mul_div(amount, i128::from(bps), i128::from(BPS_DENOMINATOR))
}

/// Weight `scheduled` by the pool's share of allocation points and carve out
/// the dev cut.
pub fn split_emission(
    scheduled: i128,
    allocation_points: u64,
    total_allocation_points: u64,
    dev_cut_bps: u32,
) -> Result<Emission, ContractError> {
    if scheduled == 0 || allocation_points == 0 || total_allocation_points == 0 {
        return Ok(Emission::default());
    }
    let emitted = mul_div(
        scheduled,
        i128::from(allocation_points),
        i128::from(total_allocation_points),
    )?;
    let dev_cut = bps_of(emitted, dev_cut_bps)?;
    Ok(Emission {
        stakers: emitted - dev_cut,
        dev_cut,
    })
}

/// Raise an accumulator by `reward` spread over `total_staked`.
pub fn accrue(acc: i128, reward: i128, total_staked: i128) -> Result<i128, ContractError> {
    if total_staked <= 0 || reward == 0 {
        return Ok(acc);
    }
    acc.checked_add(mul_div(reward, ACC_PRECISION, total_staked)?)
        .ok_or(ContractError::MathOverflow)
}

/// Settle `pool` at `block`.
///
/// An empty pool only advances `last_reward_block`: reward scheduled for it
/// while nobody is staked is forfeited.
pub fn settle(
    pool: &mut Pool,
    schedule: &ScheduleState,
    total_allocation_points: u64,
    dev_cut_bps: u32,
    block: u64,
) -> Result<i128, ContractError> {
    if block <= pool.last_reward_block {
        return Ok(0);
    }
    if pool.total_staked == 0 {
        pool.last_reward_block = block;
        return Ok(0);
    }

    let scheduled = schedule.integrate(pool.last_reward_block, block)?;
    let emission = split_emission(
        scheduled,
        pool.allocation_points,
        total_allocation_points,
        dev_cut_bps,
    )?;
    pool.acc_reward_per_share = accrue(
        pool.acc_reward_per_share,
        emission.stakers,
        pool.total_staked,
    )?;
    pool.last_reward_block = block;
    Ok(emission.dev_cut)
}

/// `amount × acc / ACC_PRECISION`.
pub fn accumulated(amount: i128, acc: i128) -> Result<i128, ContractError> {
    mul_div(amount, acc, ACC_PRECISION)
}

/// Reward owed to `position` at the pool's current accumulator.
pub fn pending(position: &Position, pool: &Pool) -> Result<i128, ContractError> {
    let owed = accumulated(position.amount, pool.acc_reward_per_share)?;
    owed.checked_sub(position.reward_debt)
        .map(|pending| pending.max(0))
        .ok_or(ContractError::MathOverflow)
}

/// Mark everything owed to `position` so far as paid.
pub fn rebase_debt(position: &mut Position, pool: &Pool) -> Result<(), ContractError> {
    position.reward_debt = accumulated(position.amount, pool.acc_reward_per_share)?;
    Ok(())
}

/// What settling `pool` now and claiming would pay `position`, without
/// touching storage.
pub fn project(env: &Env, pool: &Pool, position: &Position) -> Result<i128, ContractError> {
    let mut pool = pool.clone();
    Accrual::load(env)?.settle(&mut pool)?;
    pending(position, &pool)
}
