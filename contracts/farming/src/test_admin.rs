extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{balance, set_block, setup, POOL_POINTS, START_BLOCK};
use crate::{ContractError, STAKING_POOL_ID};

fn new_lp_token(env: &soroban_sdk::Env) -> Address {
    env.register_stellar_asset_contract_v2(Address::generate(env))
        .address()
}

fn sum_of_points(client: &crate::FarmingContractClient<'static>) -> u64 {
    (0..client.pool_length())
        .map(|id| client.get_pool(&id).allocation_points)
        .sum()
}

// ── Pool registry ─────────────────────────────────────────────────────────────

#[test]
fn test_add_pool_before_start_uses_start_block() {
    let s = setup();
    let token = new_lp_token(&s.env);

    let id = s.client.add_pool(&s.owner, &2_000, &0, &0, &token, &false);

    assert_eq!(id, 4);
    assert_eq!(s.client.pool_length(), 5);
    assert_eq!(s.client.total_allocation_points(), 6_000);
    let pool = s.client.get_pool(&id);
    assert_eq!(pool.deposit_token, token);
    assert_eq!(pool.last_reward_block, START_BLOCK);
    assert_eq!(pool.acc_reward_per_share, 0);
}

#[test]
fn test_add_pool_after_start_uses_current_block() {
    let s = setup();
    set_block(&s.env, 150);

    let id = s
        .client
        .add_pool(&s.owner, &POOL_POINTS, &0, &0, &new_lp_token(&s.env), &true);
    assert_eq!(s.client.get_pool(&id).last_reward_block, 150);
}

#[test]
fn test_add_pool_tolerates_duplicate_token() {
    let s = setup();
    let id = s
        .client
        .add_pool(&s.owner, &POOL_POINTS, &0, &0, &s.lp_tokens[0], &false);
    assert_eq!(s.client.get_pool(&id).deposit_token, s.lp_tokens[0]);
}

#[test]
fn test_add_pool_rejects_excess_fee() {
    let s = setup();
    let token = new_lp_token(&s.env);

    match s.client.try_add_pool(&s.owner, &POOL_POINTS, &10_001, &0, &token, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    match s.client.try_add_pool(&s.owner, &POOL_POINTS, &0, &10_001, &token, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(s.client.pool_length(), 4);
}

#[test]
fn test_non_owner_cannot_add_pool() {
    let s = setup();
    let stranger = Address::generate(&s.env);

    match s
        .client
        .try_add_pool(&stranger, &POOL_POINTS, &0, &0, &new_lp_token(&s.env), &false)
    {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }
}

#[test]
fn test_set_pool_keeps_total_in_sync() {
    let s = setup();

    s.client.set_pool(&s.owner, &1, &3_000, &0, &0, &false);
    assert_eq!(s.client.total_allocation_points(), 6_000);

    s.client.set_pool(&s.owner, &2, &0, &0, &0, &true);
    assert_eq!(s.client.total_allocation_points(), 5_000);

    // The vault can be reweighted too.
    s.client.set_pool(&s.owner, &STAKING_POOL_ID, &500, &0, &0, &false);
    assert_eq!(s.client.total_allocation_points(), 4_500);
    assert_eq!(sum_of_points(&s.client), s.client.total_allocation_points());
}

#[test]
fn test_set_pool_updates_fees() {
    let s = setup();
    s.client.set_pool(&s.owner, &3, &POOL_POINTS, &250, &50, &false);

    let pool = s.client.get_pool(&3);
    assert_eq!(pool.deposit_fee_bps, 250);
    assert_eq!(pool.withdraw_fee_bps, 50);
}

#[test]
fn test_set_pool_rejects_unknown_pool() {
    let s = setup();

    match s.client.try_set_pool(&s.owner, &4, &POOL_POINTS, &0, &0, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidPool),
        _ => unreachable!("Expected InvalidPool error"),
    }
}

#[test]
fn test_set_pool_rejects_fees_on_staking_pool() {
    let s = setup();

    match s.client.try_set_pool(&s.owner, &STAKING_POOL_ID, &POOL_POINTS, &100, &0, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_non_owner_cannot_set_pool() {
    let s = setup();

    match s.client.try_set_pool(&s.alice, &1, &0, &0, &0, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }
}

#[test]
fn test_with_update_settles_before_reweighting() {
    let s = setup();

    set_block(&s.env, 100);
    s.client.deposit(&s.alice, &1, &100);

    set_block(&s.env, 110);
    s.client
        .add_pool(&s.owner, &POOL_POINTS, &0, &0, &new_lp_token(&s.env), &true);

    // Blocks 101..=110 were settled at a 1/4 share.
    assert_eq!(s.client.pending_reward(&1, &s.alice), 2_250);
    assert_eq!(balance(&s.env, &s.reward_token, &s.dev), 250);
}

#[test]
fn test_without_update_dilutes_backlog() {
    let s = setup();

    set_block(&s.env, 100);
    s.client.deposit(&s.alice, &1, &100);

    set_block(&s.env, 110);
    s.client
        .add_pool(&s.owner, &POOL_POINTS, &0, &0, &new_lp_token(&s.env), &false);

    // The unsettled backlog is now weighted at 1/5.
    assert_eq!(s.client.pending_reward(&1, &s.alice), 1_800);
    assert_eq!(balance(&s.env, &s.reward_token, &s.dev), 0);
}

// ── Settlement ────────────────────────────────────────────────────────────────

#[test]
fn test_anyone_can_settle() {
    let s = setup();

    set_block(&s.env, 100);
    s.client.deposit(&s.alice, &1, &100);

    set_block(&s.env, 110);
    s.client.update_pool(&1);
    assert_eq!(balance(&s.env, &s.reward_token, &s.dev), 250);

    set_block(&s.env, 120);
    s.client.mass_update_pools();
    assert_eq!(balance(&s.env, &s.reward_token, &s.dev), 500);
    for id in 0..s.client.pool_length() {
        assert_eq!(s.client.get_pool(&id).last_reward_block, 120);
    }

    // Settling does not pay users.
    assert_eq!(balance(&s.env, &s.reward_token, &s.alice), 0);
    assert_eq!(s.client.pending_reward(&1, &s.alice), 4_500);
}

#[test]
fn test_update_unknown_pool_fails() {
    let s = setup();

    match s.client.try_update_pool(&7) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidPool),
        _ => unreachable!("Expected InvalidPool error"),
    }
}

// ── Multiplier ────────────────────────────────────────────────────────────────

#[test]
fn test_update_multiplier() {
    let s = setup();

    match s.client.try_update_multiplier(&s.owner, &2) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    // Setting 1 while emitting is a no-op.
    s.client.update_multiplier(&s.owner, &1);
    assert_eq!(s.client.get_multiplier(), 1);

    set_block(&s.env, 120);
    s.client.update_multiplier(&s.owner, &0);
    assert_eq!(s.client.get_multiplier(), 0);
    assert_eq!(s.client.get_schedule().halted_at, Some(120));

    match s.client.try_update_multiplier(&s.owner, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::EmissionsHalted),
        _ => unreachable!("Expected EmissionsHalted error"),
    }

    // Halting again keeps the first halt block.
    set_block(&s.env, 130);
    s.client.update_multiplier(&s.owner, &0);
    assert_eq!(s.client.get_schedule().halted_at, Some(120));
}

#[test]
fn test_non_owner_cannot_update_multiplier() {
    let s = setup();

    match s.client.try_update_multiplier(&s.dev, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }
}

// ── Schedule extension ────────────────────────────────────────────────────────

#[test]
fn test_schedule_views() {
    let s = setup();

    assert_eq!(s.client.rate_at(&99), 0);
    assert_eq!(s.client.rate_at(&199), 1_000);
    assert_eq!(s.client.rate_at(&200), 500);
    assert_eq!(s.client.rate_at(&300), 100);
    assert_eq!(s.client.rate_at(&400), 0);
    assert_eq!(s.client.current_block_reward(), 0);
    assert_eq!(s.client.scheduled_reward(&0, &1_000), 160_000);

    set_block(&s.env, 250);
    assert_eq!(s.client.current_block_reward(), 500);
}

#[test]
fn test_push_tranche_extends_running_schedule() {
    let s = setup();
    set_block(&s.env, 150);

    s.client.push_tranche(&s.owner, &50, &10);

    let schedule = s.client.get_schedule();
    assert_eq!(schedule.tranches.len(), 4);
    assert_eq!(s.client.rate_at(&399), 100);
    assert_eq!(s.client.rate_at(&400), 50);
    assert_eq!(s.client.rate_at(&409), 50);
    assert_eq!(s.client.rate_at(&410), 0);
}

#[test]
fn test_push_tranche_after_end_inserts_gap() {
    let s = setup();

    set_block(&s.env, 100);
    s.client.deposit(&s.alice, &1, &100);

    set_block(&s.env, 450);
    s.client.push_tranche(&s.owner, &50, &10);

    assert_eq!(s.client.get_schedule().tranches.len(), 5);
    assert_eq!(s.client.rate_at(&449), 0);
    assert_eq!(s.client.rate_at(&450), 0);
    assert_eq!(s.client.rate_at(&451), 50);
    assert_eq!(s.client.rate_at(&460), 50);
    assert_eq!(s.client.rate_at(&461), 0);

    // Pools were settled before the append.
    for id in 0..s.client.pool_length() {
        assert_eq!(s.client.get_pool(&id).last_reward_block, 450);
    }
    // Blocks 101..=399 schedule 159_000, a quarter of it to pool 1.
    assert_eq!(s.client.pending_reward(&1, &s.alice), 35_775);
    assert_eq!(balance(&s.env, &s.reward_token, &s.dev), 3_975);
}

#[test]
fn test_push_tranche_rejected() {
    let s = setup();

    match s.client.try_push_tranche(&s.alice, &50, &10) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }
    match s.client.try_push_tranche(&s.owner, &50, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    match s.client.try_push_tranche(&s.owner, &-5, &10) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    s.client.update_multiplier(&s.owner, &0);
    match s.client.try_push_tranche(&s.owner, &50, &10) {
        Err(Ok(e)) => assert_eq!(e, ContractError::EmissionsHalted),
        _ => unreachable!("Expected EmissionsHalted error"),
    }
}

// ── Fee recipient ─────────────────────────────────────────────────────────────

#[test]
fn test_set_shp_status() {
    let s = setup();
    assert!(!s.client.is_shp_enabled());

    s.client.set_shp_status(&s.owner, &true);
    assert!(s.client.is_shp_enabled());

    match s.client.try_set_shp_status(&s.alice, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }
    assert!(s.client.is_shp_enabled());
}

// ── Dev rotation ──────────────────────────────────────────────────────────────

#[test]
fn test_dev_rotation() {
    let s = setup();
    let new_dev = Address::generate(&s.env);

    match s.client.try_dev(&s.owner, &new_dev) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    s.client.dev(&s.dev, &new_dev);
    assert_eq!(s.client.get_dev(), new_dev);

    // The previous dev has no say any more.
    match s.client.try_dev(&s.dev, &s.dev) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    // The cut follows the role.
    set_block(&s.env, 100);
    s.client.deposit(&s.alice, &1, &100);
    set_block(&s.env, 110);
    s.client.update_pool(&1);
    assert_eq!(balance(&s.env, &s.reward_token, &new_dev), 250);
    assert_eq!(balance(&s.env, &s.reward_token, &s.dev), 0);
}

// ── Owner transfer (two-step) ─────────────────────────────────────────────────

#[test]
fn test_owner_transfer() {
    let s = setup();
    let new_owner = Address::generate(&s.env);

    s.client.propose_owner(&s.owner, &new_owner);
    assert_eq!(s.client.get_pending_owner(), Some(new_owner.clone()));
    // Nothing changes until the transfer is accepted.
    assert_eq!(s.client.get_owner(), s.owner);

    s.client.accept_owner(&new_owner);
    assert_eq!(s.client.get_owner(), new_owner);
    assert_eq!(s.client.get_pending_owner(), None);

    match s.client.try_set_shp_status(&s.owner, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }
    s.client.set_shp_status(&new_owner, &true);
}

#[test]
fn test_owner_transfer_wrong_acceptor() {
    let s = setup();
    let new_owner = Address::generate(&s.env);

    match s.client.try_accept_owner(&new_owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    s.client.propose_owner(&s.owner, &new_owner);
    match s.client.try_accept_owner(&s.alice) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }
    assert_eq!(s.client.get_owner(), s.owner);
}

#[test]
fn test_owner_transfer_cancel() {
    let s = setup();
    let new_owner = Address::generate(&s.env);

    match s.client.try_propose_owner(&s.alice, &new_owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AccessDenied),
        _ => unreachable!("Expected AccessDenied error"),
    }

    s.client.propose_owner(&s.owner, &new_owner);
    s.client.cancel_owner_transfer(&s.owner);
    assert_eq!(s.client.get_pending_owner(), None);

    match s.client.try_accept_owner(&new_owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    match s.client.try_cancel_owner_transfer(&s.owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}
