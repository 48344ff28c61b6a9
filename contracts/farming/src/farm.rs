//! LP pool positions: deposit, withdraw and emergency exit.
//!
//! Every operation follows the same order:
//! 1. validate and settle the pool;
//! 2. compute the reward owed at the settled accumulator;
//! 3. update position, pool totals and reward debt in storage;
//! 4. execute token movements and payouts.

use soroban_sdk::{Address, Env};

use crate::{
    events, gate,
    interactions::Interactions,
    ledger::{self, Accrual},
    registry, storage, ContractError,
};

/// Recipient of deposit and withdraw fees: the strong holders pool while it
/// is switched on, the dev address otherwise.
fn fee_recipient(env: &Env) -> Result<Address, ContractError> {
    if storage::shp_enabled(env) {
        Ok(storage::config(env)?.shp)
    } else {
        storage::dev(env)
    }
}

/// Deposit `amount` LP tokens into `pool_id`, paying any pending reward
/// first. A zero amount only claims.
pub fn deposit(env: &Env, user: &Address, pool_id: u32, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidInput);
    }
    let mut pool = registry::load_lp_pool(env, pool_id)?;
    let config = storage::config(env)?;
    gate::require_ticket(env, &config.ticket_window, user)?;

    let dev_cut = Accrual::load(env)?.settle(&mut pool)?;
    let mut position = storage::position(env, pool_id, user);
    let reward = ledger::pending(&position, &pool)?;

    let mut calls = Interactions::new(env);
    let mut credited = 0;
    if amount > 0 {
        let fee = ledger::bps_of(amount, pool.deposit_fee_bps)?;
        credited = amount - fee;
        position.amount = position
            .amount
            .checked_add(credited)
            .ok_or(ContractError::MathOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(credited)
            .ok_or(ContractError::MathOverflow)?;

        calls.pull(&pool.deposit_token, user, amount);
        calls.push(&pool.deposit_token, &fee_recipient(env)?, fee);
    }
    ledger::rebase_debt(&mut position, &pool)?;

    storage::set_pool(env, &pool);
    storage::set_position(env, pool_id, user, &position);

    events::publish_deposit(
        env,
        user.clone(),
        pool_id,
        amount,
        credited,
        pool.total_staked,
    );

    calls.reward(user, pool_id, reward);
    calls.dev_cut(&storage::dev(env)?, dev_cut);
    calls.execute(&config.cashbox)
}

/// Withdraw `amount` LP tokens from `pool_id`, paying pending reward. The
/// position is debited the full amount; the withdraw fee is taken from what
/// is returned.
pub fn withdraw(env: &Env, user: &Address, pool_id: u32, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidInput);
    }
    let mut pool = registry::load_lp_pool(env, pool_id)?;
    let config = storage::config(env)?;
    let mut position = storage::position(env, pool_id, user);
    if amount > position.amount {
        return Err(ContractError::InsufficientBalance);
    }

    let dev_cut = Accrual::load(env)?.settle(&mut pool)?;
    let reward = ledger::pending(&position, &pool)?;

    let mut calls = Interactions::new(env);
    let mut returned = 0;
    if amount > 0 {
        let fee = ledger::bps_of(amount, pool.withdraw_fee_bps)?;
        returned = amount - fee;
        position.amount -= amount;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::MathOverflow)?;

        calls.push(&pool.deposit_token, user, returned);
        calls.push(&pool.deposit_token, &fee_recipient(env)?, fee);
    }
    ledger::rebase_debt(&mut position, &pool)?;

    storage::set_pool(env, &pool);
    storage::set_position(env, pool_id, user, &position);

    events::publish_withdraw(
        env,
        user.clone(),
        pool_id,
        amount,
        returned,
        pool.total_staked,
    );

    calls.reward(user, pool_id, reward);
    calls.dev_cut(&storage::dev(env)?, dev_cut);
    calls.execute(&config.cashbox)
}

/// Return the whole position without settling. Pending reward is forfeited
/// and no fee is charged.
pub fn emergency_withdraw(env: &Env, user: &Address, pool_id: u32) -> Result<i128, ContractError> {
    let mut pool = registry::load_lp_pool(env, pool_id)?;
    let config = storage::config(env)?;
    let position = storage::position(env, pool_id, user);
    let amount = position.amount;

    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ContractError::MathOverflow)?;
    storage::set_pool(env, &pool);
    storage::set_position(env, pool_id, user, &ledger::Position::default());

    events::publish_emergency_withdraw(env, user.clone(), pool_id, amount);

    let mut calls = Interactions::new(env);
    calls.push(&pool.deposit_token, user, amount);
    calls.execute(&config.cashbox)?;
    Ok(amount)
}
