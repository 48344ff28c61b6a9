//! Staking vault: pool `0`, over the reward token itself.
//!
//! The vault shares its accumulator mechanics with LP pools but keeps its
//! positions keyed by user alone and charges no fees.

use soroban_sdk::{Address, Env};

use crate::{
    events, gate,
    interactions::Interactions,
    ledger::{self, Accrual, Position},
    registry::{self, STAKING_POOL_ID},
    storage, ContractError,
};

/// Stake `amount` reward tokens. A zero amount only claims.
pub fn stake(env: &Env, staker: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidInput);
    }
    let config = storage::config(env)?;
    gate::require_ticket(env, &config.ticket_window, staker)?;

    let mut pool = registry::load_pool(env, STAKING_POOL_ID)?;
    let dev_cut = Accrual::load(env)?.settle(&mut pool)?;
    let mut position = storage::stake_position(env, staker);
    let reward = ledger::pending(&position, &pool)?;

    position.amount = position
        .amount
        .checked_add(amount)
        .ok_or(ContractError::MathOverflow)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::MathOverflow)?;
    ledger::rebase_debt(&mut position, &pool)?;

    storage::set_pool(env, &pool);
    storage::set_stake_position(env, staker, &position);

    events::publish_staked(env, staker.clone(), amount, pool.total_staked);

    let mut calls = Interactions::new(env);
    calls.pull(&config.reward_token, staker, amount);
    calls.reward(staker, STAKING_POOL_ID, reward);
    calls.dev_cut(&storage::dev(env)?, dev_cut);
    calls.execute(&config.cashbox)
}

/// Unstake `amount` reward tokens, paying pending reward. A zero amount
/// only claims.
pub fn unstake(env: &Env, staker: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidInput);
    }
    let config = storage::config(env)?;
    let mut position = storage::stake_position(env, staker);
    if amount > position.amount {
        return Err(ContractError::InsufficientBalance);
    }

    let mut pool = registry::load_pool(env, STAKING_POOL_ID)?;
    let dev_cut = Accrual::load(env)?.settle(&mut pool)?;
    let reward = ledger::pending(&position, &pool)?;

    position.amount -= amount;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ContractError::MathOverflow)?;
    ledger::rebase_debt(&mut position, &pool)?;

    storage::set_pool(env, &pool);
    storage::set_stake_position(env, staker, &position);

    events::publish_unstaked(env, staker.clone(), amount, pool.total_staked);

    let mut calls = Interactions::new(env);
    calls.push(&config.reward_token, staker, amount);
    calls.reward(staker, STAKING_POOL_ID, reward);
    calls.dev_cut(&storage::dev(env)?, dev_cut);
    calls.execute(&config.cashbox)
}

/// Return the whole stake without settling, forfeiting pending reward.
pub fn emergency_unstake(env: &Env, staker: &Address) -> Result<i128, ContractError> {
    let config = storage::config(env)?;
    let mut pool = registry::load_pool(env, STAKING_POOL_ID)?;
    let amount = storage::stake_position(env, staker).amount;

    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ContractError::MathOverflow)?;
    storage::set_pool(env, &pool);
    storage::set_stake_position(env, staker, &Position::default());

    events::publish_emergency_unstake(env, staker.clone(), amount);

    let mut calls = Interactions::new(env);
    calls.push(&config.reward_token, staker, amount);
    calls.execute(&config.cashbox)?;
    Ok(amount)
}
