//! Privileged mutations. Callers authenticate in the entry point; these
//! functions check the role.

use soroban_sdk::{Address, Env};

use crate::{
    events,
    interactions::Interactions,
    registry::{self, STAKING_POOL_ID},
    schedule::RewardTranche,
    storage, ContractError,
};

/// Guard: revert if `caller` is not the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != storage::owner(env)? {
        return Err(ContractError::AccessDenied);
    }
    Ok(())
}

/// Pay the dev cut produced by settlements in an admin operation.
fn pay_dev_cut(env: &Env, dev_cut: i128) -> Result<(), ContractError> {
    let mut calls = Interactions::new(env);
    calls.dev_cut(&storage::dev(env)?, dev_cut);
    calls.execute(&storage::config(env)?.cashbox)
}

pub fn add_pool(
    env: &Env,
    caller: &Address,
    allocation_points: u64,
    deposit_fee_bps: u32,
    withdraw_fee_bps: u32,
    token: Address,
    with_update: bool,
) -> Result<u32, ContractError> {
    require_owner(env, caller)?;
    registry::validate_fees(deposit_fee_bps, withdraw_fee_bps)?;

    let dev_cut = if with_update {
        registry::mass_update_pools(env)?
    } else {
        0
    };

    let pool = registry::create_pool(
        env,
        allocation_points,
        deposit_fee_bps,
        withdraw_fee_bps,
        token,
    )?;

    events::publish_pool_added(
        env,
        pool.id,
        pool.deposit_token,
        allocation_points,
        deposit_fee_bps,
        withdraw_fee_bps,
        storage::total_allocation_points(env),
    );

    pay_dev_cut(env, dev_cut)?;
    Ok(pool.id)
}

pub fn set_pool(
    env: &Env,
    caller: &Address,
    pool_id: u32,
    allocation_points: u64,
    deposit_fee_bps: u32,
    withdraw_fee_bps: u32,
    with_update: bool,
) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    registry::validate_fees(deposit_fee_bps, withdraw_fee_bps)?;
    if pool_id == STAKING_POOL_ID && (deposit_fee_bps != 0 || withdraw_fee_bps != 0) {
        return Err(ContractError::InvalidInput);
    }
    // Fail on a bad id before paying for a mass update.
    registry::load_pool(env, pool_id)?;

    let dev_cut = if with_update {
        registry::mass_update_pools(env)?
    } else {
        0
    };

    let mut pool = registry::load_pool(env, pool_id)?;
    pool.deposit_fee_bps = deposit_fee_bps;
    pool.withdraw_fee_bps = withdraw_fee_bps;
    registry::set_allocation(env, &mut pool, allocation_points)?;

    events::publish_pool_set(
        env,
        pool_id,
        allocation_points,
        deposit_fee_bps,
        withdraw_fee_bps,
        storage::total_allocation_points(env),
    );

    pay_dev_cut(env, dev_cut)
}

/// Set the emission multiplier. `0` throws the kill-switch; it is one-way.
///
/// No pool is settled here: reward scheduled up to this block stays owed and
/// is paid when each pool is next touched.
pub fn update_multiplier(env: &Env, caller: &Address, multiplier: u32) -> Result<(), ContractError> {
    require_owner(env, caller)?;

    let mut schedule = storage::schedule(env)?;
    match multiplier {
        0 => schedule.halt(storage::current_block(env)),
        1 if schedule.is_halted() => return Err(ContractError::EmissionsHalted),
        1 => {}
        _ => return Err(ContractError::InvalidInput),
    }
    storage::set_schedule(env, &schedule);

    events::publish_multiplier_set(env, schedule.multiplier, schedule.halted_at);
    Ok(())
}

/// Append a tranche after settling every pool at the current block.
pub fn push_tranche(
    env: &Env,
    caller: &Address,
    amount: i128,
    blocks: u64,
) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    if storage::schedule(env)?.is_halted() {
        return Err(ContractError::EmissionsHalted);
    }

    let dev_cut = registry::mass_update_pools(env)?;

    let mut schedule = storage::schedule(env)?;
    schedule.push_tranche(RewardTranche { amount, blocks }, storage::current_block(env))?;
    storage::set_schedule(env, &schedule);

    events::publish_tranche_appended(env, amount, blocks, schedule.end_block()?);

    pay_dev_cut(env, dev_cut)
}

pub fn set_shp_status(env: &Env, caller: &Address, enabled: bool) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    storage::set_shp_enabled(env, enabled);
    events::publish_shp_status_set(env, enabled);
    Ok(())
}

/// Public settlement of one pool.
pub fn update_pool(env: &Env, pool_id: u32) -> Result<(), ContractError> {
    let dev_cut = registry::update_pool(env, pool_id)?;
    pay_dev_cut(env, dev_cut)
}

/// Public settlement of every pool.
pub fn mass_update_pools(env: &Env) -> Result<(), ContractError> {
    let dev_cut = registry::mass_update_pools(env)?;
    pay_dev_cut(env, dev_cut)
}

// ── Dev rotation ─────────────────────────────────────────────────────────────

/// Hand the dev-cut recipient role to `new_dev`. Only the current dev may
/// do this.
pub fn rotate_dev(env: &Env, caller: &Address, new_dev: &Address) -> Result<(), ContractError> {
    let old_dev = storage::dev(env)?;
    if *caller != old_dev {
        return Err(ContractError::Unauthorized);
    }
    storage::set_dev(env, new_dev);
    events::publish_dev_rotated(env, old_dev, new_dev.clone());
    Ok(())
}

// ── Ownership transfer (two-step) ────────────────────────────────────────────

pub fn propose_owner(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    storage::set_pending_owner(env, new_owner);
    events::publish_owner_transfer_proposed(env, caller.clone(), new_owner.clone());
    Ok(())
}

pub fn accept_owner(env: &Env, new_owner: &Address) -> Result<(), ContractError> {
    let pending = storage::pending_owner(env).ok_or(ContractError::InvalidInput)?;
    if *new_owner != pending {
        return Err(ContractError::AccessDenied);
    }
    let old_owner = storage::owner(env)?;
    storage::set_owner(env, new_owner);
    storage::clear_pending_owner(env);
    events::publish_owner_transfer_accepted(env, old_owner, new_owner.clone());
    Ok(())
}

pub fn cancel_owner_transfer(env: &Env, caller: &Address) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    let pending = storage::pending_owner(env).ok_or(ContractError::InvalidInput)?;
    storage::clear_pending_owner(env);
    events::publish_owner_transfer_cancelled(env, caller.clone(), pending);
    Ok(())
}
