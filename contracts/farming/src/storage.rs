use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{
    ledger::Position, registry::Pool, schedule::ScheduleState, ContractError, FarmConfig,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const DEV: Symbol = symbol_short!("DEV");
const CONFIG: Symbol = symbol_short!("CONFIG");
const SCHEDULE: Symbol = symbol_short!("SCHEDULE");
const SHP_ENABLED: Symbol = symbol_short!("SHP_ON");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_ALLOC: Symbol = symbol_short!("TOT_ALLOC");

// Persistent entries use tuple keys: (prefix, pool_id[, user]).
const POOL: Symbol = symbol_short!("POOL");
const POSITION: Symbol = symbol_short!("POS");
const STAKE: Symbol = symbol_short!("STK");

// ~30 and ~60 days of ledgers at 5s each.
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Current block height. Ledger sequence numbers play the role of blocks.
pub fn current_block(env: &Env) -> u64 {
    u64::from(env.ledger().sequence())
}

// ── Instance storage ─────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
    extend_instance(env);
}

pub fn owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
    extend_instance(env);
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&PENDING_OWNER, owner);
    extend_instance(env);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

pub fn dev(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DEV)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_dev(env: &Env, dev: &Address) {
    env.storage().instance().set(&DEV, dev);
    extend_instance(env);
}

pub fn config(env: &Env) -> Result<FarmConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &FarmConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance(env);
}

pub fn schedule(env: &Env) -> Result<ScheduleState, ContractError> {
    env.storage()
        .instance()
        .get(&SCHEDULE)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_schedule(env: &Env, schedule: &ScheduleState) {
    env.storage().instance().set(&SCHEDULE, schedule);
    extend_instance(env);
}

pub fn shp_enabled(env: &Env) -> bool {
    env.storage().instance().get(&SHP_ENABLED).unwrap_or(false)
}

pub fn set_shp_enabled(env: &Env, enabled: bool) {
    env.storage().instance().set(&SHP_ENABLED, &enabled);
    extend_instance(env);
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&POOL_COUNT, &count);
    extend_instance(env);
}

pub fn total_allocation_points(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0)
}

/// Only `registry::set_allocation` may call this.
pub fn set_total_allocation_points(env: &Env, total: u64) {
    env.storage().instance().set(&TOTAL_ALLOC, &total);
    extend_instance(env);
}

// ── Persistent storage ───────────────────────────────────────────────────────

pub fn pool(env: &Env, pool_id: u32) -> Option<Pool> {
    env.storage().persistent().get(&(POOL, pool_id))
}

pub fn set_pool(env: &Env, pool: &Pool) {
    let key = (POOL, pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn position(env: &Env, pool_id: u32, user: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&(POSITION, pool_id, user.clone()))
        .unwrap_or_default()
}

pub fn set_position(env: &Env, pool_id: u32, user: &Address, position: &Position) {
    let key = (POSITION, pool_id, user.clone());
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn stake_position(env: &Env, user: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&(STAKE, user.clone()))
        .unwrap_or_default()
}

pub fn set_stake_position(env: &Env, user: &Address, position: &Position) {
    let key = (STAKE, user.clone());
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
