#![no_std]

pub mod admin;
pub mod events;
pub mod farm;
pub mod gate;
pub mod interactions;
pub mod ledger;
pub mod registry;
pub mod schedule;
pub mod storage;
pub mod vault;

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

pub use ledger::{Position, ACC_PRECISION};
pub use registry::{Pool, STAKING_POOL_ID};
pub use schedule::{RewardTranche, ScheduleState};

/// Dev cut taken from every pool emission unless configured otherwise: 10%.
pub const DEFAULT_DEV_CUT_BPS: u32 = 1_000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    AccessDenied = 4,
    InvalidInput = 5,
    InvalidPool = 6,
    InsufficientBalance = 7,
    ExternalCallFailed = 8,
    MathOverflow = 9,
    EmissionsHalted = 10,
}

// ── Deployment configuration ─────────────────────────────────────────────────

/// Addresses and constants fixed at deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmConfig {
    /// Token paid out as reward and staked in the vault.
    pub reward_token: Address,
    /// Holds the reward supply; pays out on the ledger's behalf.
    pub cashbox: Address,
    /// Answers whether an account may deposit or stake.
    pub ticket_window: Address,
    /// Strong holders pool, the fee recipient while switched on.
    pub shp: Address,
    pub dev_cut_bps: u32,
    /// Weight of the staking vault (pool `0`).
    pub staking_allocation_points: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmingContract;

#[contractimpl]
impl FarmingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `owner`       – account allowed to run admin operations.
    /// * `dev`         – recipient of the dev cut.
    /// * `config`      – collaborator addresses and emission constants.
    /// * `start_block` – first block that emits reward.
    /// * `tranches`    – the block reward schedule, laid end to end.
    ///
    /// Creates the staking vault as pool `0`.
    pub fn initialize(
        env: Env,
        owner: Address,
        dev: Address,
        config: FarmConfig,
        start_block: u64,
        tranches: Vec<RewardTranche>,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        if config.dev_cut_bps > ledger::BPS_DENOMINATOR {
            return Err(ContractError::InvalidInput);
        }
        let schedule = ScheduleState::new(start_block, tranches)?;

        storage::set_owner(&env, &owner);
        storage::set_dev(&env, &dev);
        storage::set_config(&env, &config);
        storage::set_schedule(&env, &schedule);
        storage::set_initialized(&env);

        registry::create_pool(
            &env,
            config.staking_allocation_points,
            0,
            0,
            config.reward_token.clone(),
        )?;

        events::publish_initialized(
            &env,
            owner,
            dev,
            config.reward_token,
            config.cashbox,
            config.ticket_window,
            start_block,
        );

        Ok(())
    }

    // ── LP pools ────────────────────────────────────────────────────────────

    /// Deposit `amount` LP tokens into `pool_id`. Pending reward is paid
    /// first; `amount == 0` only claims.
    pub fn deposit(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        farm::deposit(&env, &user, pool_id, amount)
    }

    /// Withdraw `amount` LP tokens from `pool_id`, net of the withdraw fee.
    pub fn withdraw(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        farm::withdraw(&env, &user, pool_id, amount)
    }

    /// Leave `pool_id` without settling. Returns the amount sent back.
    pub fn emergency_withdraw(env: Env, user: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        farm::emergency_withdraw(&env, &user, pool_id)
    }

    // ── Staking vault ───────────────────────────────────────────────────────

    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        vault::stake(&env, &staker, amount)
    }

    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        vault::unstake(&env, &staker, amount)
    }

    /// Leave the vault without settling. Returns the amount sent back.
    pub fn emergency_unstake(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        vault::emergency_unstake(&env, &staker)
    }

    // ── Settlement ──────────────────────────────────────────────────────────

    /// Settle one pool at the current block. Anyone may call this.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin::update_pool(&env, pool_id)
    }

    /// Settle every pool at the current block. Anyone may call this.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin::mass_update_pools(&env)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Register a pool for `token`. Returns its id.
    ///
    /// With `with_update` every existing pool is settled first, so the new
    /// weight only dilutes emission from this block on.
    pub fn add_pool(
        env: Env,
        caller: Address,
        allocation_points: u64,
        deposit_fee_bps: u32,
        withdraw_fee_bps: u32,
        token: Address,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::add_pool(
            &env,
            &caller,
            allocation_points,
            deposit_fee_bps,
            withdraw_fee_bps,
            token,
            with_update,
        )
    }

    /// Change a pool's weight and fees.
    pub fn set_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        allocation_points: u64,
        deposit_fee_bps: u32,
        withdraw_fee_bps: u32,
        with_update: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::set_pool(
            &env,
            &caller,
            pool_id,
            allocation_points,
            deposit_fee_bps,
            withdraw_fee_bps,
            with_update,
        )
    }

    /// `0` stops emission for good; `1` is accepted only while emitting.
    pub fn update_multiplier(env: Env, caller: Address, multiplier: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::update_multiplier(&env, &caller, multiplier)
    }

    /// Append a tranche of `blocks` blocks at `amount` per block.
    pub fn push_tranche(
        env: Env,
        caller: Address,
        amount: i128,
        blocks: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::push_tranche(&env, &caller, amount, blocks)
    }

    /// Route deposit and withdraw fees to the strong holders pool (`true`)
    /// or to the dev (`false`).
    pub fn set_shp_status(env: Env, caller: Address, enabled: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::set_shp_status(&env, &caller, enabled)
    }

    /// Hand the dev role to `new_dev`. Only the current dev can call this.
    pub fn dev(env: Env, caller: Address, new_dev: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::rotate_dev(&env, &caller, &new_dev)
    }

    // ── Owner transfer (two-step) ───────────────────────────────────────────

    /// Propose a new owner. The proposed account completes the transfer with
    /// `accept_owner`.
    pub fn propose_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::propose_owner(&env, &caller, &new_owner)
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();
        admin::accept_owner(&env, &new_owner)
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::cancel_owner_transfer(&env, &caller)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Number of pools, the staking vault included.
    pub fn pool_length(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        registry::load_pool(&env, pool_id)
    }

    pub fn get_user_info(env: Env, pool_id: u32, user: Address) -> Result<Position, ContractError> {
        registry::load_lp_pool(&env, pool_id)?;
        Ok(storage::position(&env, pool_id, &user))
    }

    pub fn get_stake_info(env: Env, staker: Address) -> Position {
        storage::stake_position(&env, &staker)
    }

    /// Reward `user` would receive from `pool_id` if they claimed now.
    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let pool = registry::load_lp_pool(&env, pool_id)?;
        let position = storage::position(&env, pool_id, &user);
        ledger::project(&env, &pool, &position)
    }

    /// Reward `staker` would receive from the vault if they claimed now.
    pub fn pending_stake_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        let pool = registry::load_pool(&env, STAKING_POOL_ID)?;
        let position = storage::stake_position(&env, &staker);
        ledger::project(&env, &pool, &position)
    }

    /// Schedule rate at the current block.
    pub fn current_block_reward(env: Env) -> Result<i128, ContractError> {
        Ok(storage::schedule(&env)?.rate_at(storage::current_block(&env)))
    }

    pub fn rate_at(env: Env, block: u64) -> Result<i128, ContractError> {
        Ok(storage::schedule(&env)?.rate_at(block))
    }

    /// Total reward scheduled over the blocks `(from, to]`.
    pub fn scheduled_reward(env: Env, from: u64, to: u64) -> Result<i128, ContractError> {
        storage::schedule(&env)?.integrate(from, to)
    }

    pub fn total_allocation_points(env: Env) -> u64 {
        storage::total_allocation_points(&env)
    }

    pub fn get_dev(env: Env) -> Result<Address, ContractError> {
        storage::dev(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        storage::owner(&env)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        storage::pending_owner(&env)
    }

    pub fn get_multiplier(env: Env) -> Result<u32, ContractError> {
        Ok(storage::schedule(&env)?.multiplier)
    }

    pub fn get_schedule(env: Env) -> Result<ScheduleState, ContractError> {
        storage::schedule(&env)
    }

    pub fn get_config(env: Env) -> Result<FarmConfig, ContractError> {
        storage::config(&env)
    }

    pub fn is_shp_enabled(env: Env) -> bool {
        storage::shp_enabled(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
