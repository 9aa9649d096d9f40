#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reward_token::{RewardToken, RewardTokenClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, String,
};
use staker::{ContractError, StakerContract, StakerContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    // Small stakes keep the per-share accumulator truncating.
    Deposit { user: u8, pool: u8, amount: u8 },
    Withdraw { user: u8, pool: u8, amount: u8 },
    DepositLarge { user: u8, pool: u8, amount: u64 },
    EmergencyWithdraw { user: u8, pool: u8 },
    AddPool { weight: u32 },
    SetWeight { pool: u8, weight: u32, with_update: bool },
    MassUpdate,
    Advance { blocks: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let staker_id = env.register(StakerContract, ());
    let client = StakerContractClient::new(&env, &staker_id);
    let reward_id = env.register(RewardToken, ());
    let reward = RewardTokenClient::new(&env, &reward_id);

    reward.initialize(
        &Address::generate(&env),
        &staker_id,
        &1_000_000_000_000_000_000,
        &String::from_str(&env, "Reward"),
        &String::from_str(&env, "RWD"),
        &18,
        &vec![&env],
    );
    let operator = Address::generate(&env);
    client.initialize(&operator, &reward_id, &10, &5_000, &1_000_000_000_007);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &(u64::MAX as i128));
        users.push(user);
    }
    client.add_pool(&operator, &1, &stake_token, &false);

    // Looking for panics (overflow, missing bounds checks) and for errors the
    // bookkeeping should never produce.
    for action in actions {
        let result = match action {
            FuzzAction::Deposit { user, pool, amount } => client
                .try_deposit(&users[user as usize % users.len()], &(pool as u32 % 4), &(amount as i128))
                .map(|_| ()),
            FuzzAction::DepositLarge { user, pool, amount } => client
                .try_deposit(&users[user as usize % users.len()], &(pool as u32 % 4), &(amount as i128))
                .map(|_| ()),
            FuzzAction::Withdraw { user, pool, amount } => client
                .try_withdraw(&users[user as usize % users.len()], &(pool as u32 % 4), &(amount as i128))
                .map(|_| ()),
            FuzzAction::EmergencyWithdraw { user, pool } => client
                .try_emergency_withdraw(&users[user as usize % users.len()], &(pool as u32 % 4))
                .map(|_| ()),
            FuzzAction::AddPool { weight } => client
                .try_add_pool(&operator, &(weight as u64), &stake_token, &true)
                .map(|_| ()),
            FuzzAction::SetWeight { pool, weight, with_update } => client
                .try_set_weight(&operator, &(pool as u32 % 4), &(weight as u64), &with_update)
                .map(|_| ()),
            FuzzAction::MassUpdate => client.try_mass_update_pools().map(|_| ()),
            FuzzAction::Advance { blocks } => {
                let now = env.ledger().sequence();
                env.ledger().set_sequence_number(now.saturating_add(blocks as u32));
                Ok(())
            }
        };

        if let Err(Ok(e)) = result {
            assert_ne!(e, ContractError::InvariantViolation);
        }
    }
});
