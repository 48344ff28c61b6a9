#![no_main]

use arbitrary::Arbitrary;
use common::testutils::{MockCashbox, MockCashboxClient, MockTicketWindow, MockTicketWindowClient};
use farming::{FarmConfig, FarmingContract, FarmingContractClient, RewardTranche, STAKING_POOL_ID};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { pool_id: u8, amount: i64 },
    Withdraw { pool_id: u8, amount: i64 },
    EmergencyWithdraw { pool_id: u8 },
    Stake { amount: i64 },
    Unstake { amount: i64 },
    EmergencyUnstake,
    SetPool { pool_id: u8, points: u16, with_update: bool },
    Halt,
    PushTranche { amount: u32, blocks: u16 },
    Advance { blocks: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    // Long action lists advance far; keep every entry live throughout.
    env.ledger().with_mut(|li| {
        li.sequence_number = 90;
        li.min_persistent_entry_ttl = 5_000_000;
        li.min_temp_entry_ttl = 5_000_000;
    });

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let cashbox = env.register(MockCashbox, ());
    let cashbox_client = MockCashboxClient::new(&env, &cashbox);
    cashbox_client.initialize(&reward_token);
    StellarAssetClient::new(&env, &reward_token).mint(&cashbox, &i128::from(i64::MAX));

    let tickets = env.register(MockTicketWindow, ());
    let tickets_client = MockTicketWindowClient::new(&env, &tickets);

    let contract_id = env.register(FarmingContract, ());
    let client = FarmingContractClient::new(&env, &contract_id);
    cashbox_client.set_wallet_limit(&contract_id, &i128::MAX);

    let owner = Address::generate(&env);
    let config = FarmConfig {
        reward_token: reward_token.clone(),
        cashbox,
        ticket_window: tickets,
        shp: Address::generate(&env),
        dev_cut_bps: farming::DEFAULT_DEV_CUT_BPS,
        staking_allocation_points: 1_000,
    };
    let tranches = vec![
        &env,
        RewardTranche { amount: 1_000, blocks: 100 },
        RewardTranche { amount: 10, blocks: 1_000 },
    ];
    client.initialize(&owner, &Address::generate(&env), &config, &100, &tranches);

    let lp_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    client.add_pool(&owner, &1_000, &100, &200, &lp_token, &false);

    let mut users = Vec::new();
    for _ in 0..3 {
        let user = Address::generate(&env);
        tickets_client.issue_ticket(&user);
        StellarAssetClient::new(&env, &lp_token).mint(&user, &1_000_000);
        StellarAssetClient::new(&env, &reward_token).mint(&user, &1_000_000);
        users.push(user);
    }

    // Errors are expected; the target looks for panics and broken invariants.
    for (i, action) in actions.into_iter().enumerate() {
        let user = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { pool_id, amount } => {
                let _ = client.try_deposit(user, &u32::from(pool_id), &i128::from(amount));
            }
            FuzzAction::Withdraw { pool_id, amount } => {
                let _ = client.try_withdraw(user, &u32::from(pool_id), &i128::from(amount));
            }
            FuzzAction::EmergencyWithdraw { pool_id } => {
                let _ = client.try_emergency_withdraw(user, &u32::from(pool_id));
            }
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(user, &i128::from(amount));
            }
            FuzzAction::Unstake { amount } => {
                let _ = client.try_unstake(user, &i128::from(amount));
            }
            FuzzAction::EmergencyUnstake => {
                let _ = client.try_emergency_unstake(user);
            }
            FuzzAction::SetPool { pool_id, points, with_update } => {
                let _ = client.try_set_pool(
                    &owner,
                    &u32::from(pool_id),
                    &u64::from(points),
                    &0,
                    &0,
                    &with_update,
                );
            }
            FuzzAction::Halt => {
                let _ = client.try_update_multiplier(&owner, &0);
            }
            FuzzAction::PushTranche { amount, blocks } => {
                let _ = client.try_push_tranche(&owner, &i128::from(amount), &u64::from(blocks));
            }
            FuzzAction::Advance { blocks } => {
                let next = env.ledger().sequence().saturating_add(u32::from(blocks));
                env.ledger().set_sequence_number(next);
            }
        }

        let points: u64 = (0..client.pool_length())
            .map(|id| client.get_pool(&id).allocation_points)
            .sum();
        assert_eq!(points, client.total_allocation_points());

        let staked: i128 = users.iter().map(|u| client.get_stake_info(u).amount).sum();
        assert_eq!(staked, client.get_pool(&STAKING_POOL_ID).total_staked);

        let deposited: i128 = users.iter().map(|u| client.get_user_info(&1, u).amount).sum();
        assert_eq!(deposited, client.get_pool(&1).total_staked);
    }
});
