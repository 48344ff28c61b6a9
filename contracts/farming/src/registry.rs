//! Append-only arena of pools.
//!
//! Pool ids are assigned sequentially and never reused. Id `0` is the
//! staking vault, created at initialization.

use soroban_sdk::{contracttype, Address, Env};

use crate::{
    ledger::{Accrual, BPS_DENOMINATOR},
    storage, ContractError,
};

pub const STAKING_POOL_ID: u32 = 0;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub allocation_points: u64,
    pub deposit_token: Address,
    pub deposit_fee_bps: u32,
    pub withdraw_fee_bps: u32,
    pub last_reward_block: u64,
    /// Scaled by `ledger::ACC_PRECISION`.
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
}

pub fn validate_fees(deposit_fee_bps: u32, withdraw_fee_bps: u32) -> Result<(), ContractError> {
    if deposit_fee_bps > BPS_DENOMINATOR || withdraw_fee_bps > BPS_DENOMINATOR {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn load_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    if pool_id >= storage::pool_count(env) {
        return Err(ContractError::InvalidPool);
    }
    storage::pool(env, pool_id).ok_or(ContractError::InvalidPool)
}

/// Load an LP pool. The staking vault is reachable only through the
/// stake/unstake entry points.
pub fn load_lp_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    if pool_id == STAKING_POOL_ID {
        return Err(ContractError::InvalidPool);
    }
    load_pool(env, pool_id)
}

/// The only write path for `allocation_points`: moves the global total by
/// the same delta and persists the pool.
pub fn set_allocation(env: &Env, pool: &mut Pool, points: u64) -> Result<(), ContractError> {
    let total = storage::total_allocation_points(env);
    let total = total
        .checked_sub(pool.allocation_points)
        .and_then(|rest| rest.checked_add(points))
        .ok_or(ContractError::MathOverflow)?;

    pool.allocation_points = points;
    storage::set_pool(env, pool);
    storage::set_total_allocation_points(env, total);
    Ok(())
}

/// Append a pool and return it.
pub fn create_pool(
    env: &Env,
    allocation_points: u64,
    deposit_fee_bps: u32,
    withdraw_fee_bps: u32,
    deposit_token: Address,
) -> Result<Pool, ContractError> {
    validate_fees(deposit_fee_bps, withdraw_fee_bps)?;

    let id = storage::pool_count(env);
    let next = id.checked_add(1).ok_or(ContractError::MathOverflow)?;
    let start_block = storage::schedule(env)?.start_block;

    let mut pool = Pool {
        id,
        allocation_points: 0,
        deposit_token,
        deposit_fee_bps,
        withdraw_fee_bps,
        last_reward_block: storage::current_block(env).max(start_block),
        acc_reward_per_share: 0,
        total_staked: 0,
    };
    storage::set_pool_count(env, next);
    set_allocation(env, &mut pool, allocation_points)?;
    Ok(pool)
}

/// Settle a single pool at the current block. Returns the dev cut produced.
pub fn update_pool(env: &Env, pool_id: u32) -> Result<i128, ContractError> {
    let mut pool = load_pool(env, pool_id)?;
    let dev_cut = Accrual::load(env)?.settle(&mut pool)?;
    storage::set_pool(env, &pool);
    Ok(dev_cut)
}

/// Settle every pool at the current block. Returns the summed dev cut.
pub fn mass_update_pools(env: &Env) -> Result<i128, ContractError> {
    let accrual = Accrual::load(env)?;
    let mut dev_cut: i128 = 0;
    for pool_id in 0..storage::pool_count(env) {
        let mut pool = load_pool(env, pool_id)?;
        let cut = accrual.settle(&mut pool)?;
        storage::set_pool(env, &pool);
        dev_cut = dev_cut
            .checked_add(cut)
            .ok_or(ContractError::MathOverflow)?;
    }
    Ok(dev_cut)
}
