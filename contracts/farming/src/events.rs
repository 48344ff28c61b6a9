#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::storage;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub dev: Address,
    pub reward_token: Address,
    pub cashbox: Address,
    pub ticket_window: Address,
    pub start_block: u64,
    pub block: u64,
}

/// Fired when the owner registers a new pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub deposit_token: Address,
    pub allocation_points: u64,
    pub deposit_fee_bps: u32,
    pub withdraw_fee_bps: u32,
    pub total_allocation_points: u64,
    pub block: u64,
}

/// Fired when the owner reweights a pool or changes its fees.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSetEvent {
    pub pool_id: u32,
    pub allocation_points: u64,
    pub deposit_fee_bps: u32,
    pub withdraw_fee_bps: u32,
    pub total_allocation_points: u64,
    pub block: u64,
}

/// Fired when a user deposits LP tokens (including zero-amount claims).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub credited: i128,
    pub new_total_staked: i128,
    pub block: u64,
}

/// Fired when a user withdraws LP tokens (including zero-amount claims).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub returned: i128,
    pub new_total_staked: i128,
    pub block: u64,
}

/// Fired when a user leaves a pool without settling.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub block: u64,
}

/// Fired when a user stakes or unstakes reward tokens in the vault.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeChangedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub block: u64,
}

/// Fired when a staker leaves the vault without settling.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyUnstakeEvent {
    pub staker: Address,
    pub amount: i128,
    pub block: u64,
}

/// Fired for every reward payout to a user.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub block: u64,
}

/// Fired when settlements in one operation produced a dev cut.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DevCutPaidEvent {
    pub dev: Address,
    pub amount: i128,
    pub block: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiplierSetEvent {
    pub multiplier: u32,
    pub halted_at: Option<u64>,
    pub block: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DevRotatedEvent {
    pub old_dev: Address,
    pub new_dev: Address,
    pub block: u64,
}

/// Fired when the owner appends a tranche to the schedule.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrancheAppendedEvent {
    pub amount: i128,
    pub blocks: u64,
    pub end_block: u64,
    pub block: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShpStatusSetEvent {
    pub enabled: bool,
    pub block: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub block: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub block: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub block: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    dev: Address,
    reward_token: Address,
    cashbox: Address,
    ticket_window: Address,
    start_block: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            dev,
            reward_token,
            cashbox,
            ticket_window,
            start_block,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    deposit_token: Address,
    allocation_points: u64,
    deposit_fee_bps: u32,
    withdraw_fee_bps: u32,
    total_allocation_points: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            deposit_token,
            allocation_points,
            deposit_fee_bps,
            withdraw_fee_bps,
            total_allocation_points,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_pool_set(
    env: &Env,
    pool_id: u32,
    allocation_points: u64,
    deposit_fee_bps: u32,
    withdraw_fee_bps: u32,
    total_allocation_points: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool_id),
        PoolSetEvent {
            pool_id,
            allocation_points,
            deposit_fee_bps,
            withdraw_fee_bps,
            total_allocation_points,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    user: Address,
    pool_id: u32,
    amount: i128,
    credited: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone(), pool_id),
        DepositEvent {
            user,
            pool_id,
            amount,
            credited,
            new_total_staked,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    user: Address,
    pool_id: u32,
    amount: i128,
    returned: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone(), pool_id),
        WithdrawEvent {
            user,
            pool_id,
            amount,
            returned,
            new_total_staked,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_emergency_withdraw(env: &Env, user: Address, pool_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("EMERG_WD"), user.clone(), pool_id),
        EmergencyWithdrawEvent {
            user,
            pool_id,
            amount,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakeChangedEvent {
            staker,
            amount,
            new_total_staked,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        StakeChangedEvent {
            staker,
            amount,
            new_total_staked,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_emergency_unstake(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMERG_US"), staker.clone()),
        EmergencyUnstakeEvent {
            staker,
            amount,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_reward_paid(env: &Env, user: Address, pool_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), user.clone(), pool_id),
        RewardPaidEvent {
            user,
            pool_id,
            amount,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_dev_cut_paid(env: &Env, dev: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("DEV_CUT"), dev.clone()),
        DevCutPaidEvent {
            dev,
            amount,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_multiplier_set(env: &Env, multiplier: u32, halted_at: Option<u64>) {
    env.events().publish(
        (symbol_short!("MULT_SET"),),
        MultiplierSetEvent {
            multiplier,
            halted_at,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_dev_rotated(env: &Env, old_dev: Address, new_dev: Address) {
    env.events().publish(
        (symbol_short!("DEV_SET"), new_dev.clone()),
        DevRotatedEvent {
            old_dev,
            new_dev,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_tranche_appended(env: &Env, amount: i128, blocks: u64, end_block: u64) {
    env.events().publish(
        (symbol_short!("TRANCHE"),),
        TrancheAppendedEvent {
            amount,
            blocks,
            end_block,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_shp_status_set(env: &Env, enabled: bool) {
    env.events().publish(
        (symbol_short!("SHP_SET"),),
        ShpStatusSetEvent {
            enabled,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            block: storage::current_block(env),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            block: storage::current_block(env),
        },
    );
}
