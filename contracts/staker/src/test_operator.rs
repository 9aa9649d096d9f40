extern crate std;

use reward_token::{RewardToken, RewardTokenClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, String,
};

use crate::{ContractError, StakerContract, StakerContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Registers a staker and a reward token. When `authorize` is false the
/// token names some other address as its staker.
fn deploy(env: &Env, authorize: bool) -> (StakerContractClient<'static>, RewardTokenClient<'static>) {
    let staker_id = env.register(StakerContract, ());
    let reward_id = env.register(RewardToken, ());
    let reward = RewardTokenClient::new(env, &reward_id);

    let registered = if authorize {
        staker_id.clone()
    } else {
        Address::generate(env)
    };
    reward.initialize(
        &Address::generate(env),
        &registered,
        &1_000_000_000,
        &String::from_str(env, "Reward"),
        &String::from_str(env, "RWD"),
        &7,
        &vec![env],
    );

    (StakerContractClient::new(env, &staker_id), reward)
}

fn setup() -> (
    Env,
    StakerContractClient<'static>,
    RewardTokenClient<'static>,
    Address,
    Address,
) {
    let env = Env::default();
    env.mock_all_auths();

    let (client, reward) = deploy(&env, true);
    let operator = Address::generate(&env);
    client.initialize(&operator, &reward.address, &100, &200, &10_000);

    let lp = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    (env, client, reward, operator, lp)
}

// ── Initialisation ───────────────────────────────────────────────────────────

#[test]
fn test_double_initialize_fails() {
    let (env, client, reward, operator, _lp) = setup();

    match client.try_initialize(&operator, &reward.address, &100, &200, &10_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
    let other = Address::generate(&env);
    match client.try_initialize(&other, &reward.address, &300, &400, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
    assert_eq!(client.get_operator(), operator);
}

#[test]
fn test_initialize_rejects_bad_window() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, reward) = deploy(&env, true);
    let operator = Address::generate(&env);

    for (start, end) in [(200, 100), (150, 150)] {
        match client.try_initialize(&operator, &reward.address, &start, &end, &10_000) {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
            _ => unreachable!("Expected InvalidInput error"),
        }
    }
    match client.try_initialize(&operator, &reward.address, &100, &200, &-1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert!(!client.is_initialized());

    client.initialize(&operator, &reward.address, &100, &101, &0);
    assert!(client.is_initialized());
    assert_eq!(client.get_config().reward_per_block, 0);
}

#[test]
fn test_calls_before_initialize_fail() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _reward) = deploy(&env, true);
    let someone = Address::generate(&env);
    let lp = Address::generate(&env);

    match client.try_add_pool(&someone, &1, &lp, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotInitialized),
        _ => unreachable!("Expected NotInitialized error"),
    }
    match client.try_deposit(&someone, &0, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotInitialized),
        _ => unreachable!("Expected NotInitialized error"),
    }
    match client.try_get_operator() {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotInitialized),
        _ => unreachable!("Expected NotInitialized error"),
    }
    match client.try_get_multiplier(&0, &10) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotInitialized),
        _ => unreachable!("Expected NotInitialized error"),
    }
    assert_eq!(client.pool_length(), 0);
}

// ── Operator-only entry points ───────────────────────────────────────────────

#[test]
fn test_non_operator_cannot_add_pool() {
    let (env, client, _reward, _operator, lp) = setup();
    let intruder = Address::generate(&env);

    match client.try_add_pool(&intruder, &10, &lp, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::CallerNotOperator),
        _ => unreachable!("Expected CallerNotOperator error"),
    }
    assert_eq!(client.pool_length(), 0);
}

#[test]
fn test_non_operator_cannot_set_weight() {
    let (env, client, _reward, operator, lp) = setup();
    let intruder = Address::generate(&env);
    client.add_pool(&operator, &10, &lp, &true);

    match client.try_set_weight(&intruder, &0, &50, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::CallerNotOperator),
        _ => unreachable!("Expected CallerNotOperator error"),
    }
    assert_eq!(client.get_pool(&0).weight, 10);

    match client.try_set_weight(&operator, &4, &50, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PoolNotFound),
        _ => unreachable!("Expected PoolNotFound error"),
    }
}

#[test]
fn test_change_operator() {
    let (env, client, _reward, operator, lp) = setup();
    let intruder = Address::generate(&env);
    let successor = Address::generate(&env);

    match client.try_change_operator(&intruder, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::CallerNotOperator),
        _ => unreachable!("Expected CallerNotOperator error"),
    }
    assert_eq!(client.get_operator(), operator);

    client.change_operator(&operator, &successor);
    assert_eq!(client.get_operator(), successor);

    // The previous operator lost every privilege.
    match client.try_add_pool(&operator, &10, &lp, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::CallerNotOperator),
        _ => unreachable!("Expected CallerNotOperator error"),
    }
    match client.try_change_operator(&operator, &operator) {
        Err(Ok(e)) => assert_eq!(e, ContractError::CallerNotOperator),
        _ => unreachable!("Expected CallerNotOperator error"),
    }
    client.add_pool(&successor, &10, &lp, &false);
    assert_eq!(client.pool_length(), 1);
}

#[test]
fn test_operator_cut_follows_operator() {
    let (env, client, reward, operator, lp) = setup();
    let successor = Address::generate(&env);
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &lp).mint(&user, &100);

    client.add_pool(&operator, &1, &lp, &true);
    env.ledger().set_sequence_number(110);
    client.deposit(&user, &0, &100);

    // 10 blocks at 100 per block, 3% on top for the operator.
    env.ledger().set_sequence_number(120);
    client.update_pool(&0);
    assert_eq!(reward.balance(&operator), 30);

    client.change_operator(&operator, &successor);
    env.ledger().set_sequence_number(130);
    client.deposit(&user, &0, &0);
    assert_eq!(reward.balance(&operator), 30);
    assert_eq!(reward.balance(&successor), 30);
    assert_eq!(reward.balance(&user), 2_000);
}

// ── Reward token authorization ───────────────────────────────────────────────

#[test]
fn test_unregistered_staker_cannot_mint() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, reward) = deploy(&env, false);
    let operator = Address::generate(&env);
    client.initialize(&operator, &reward.address, &100, &200, &10_000);

    let lp = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &lp).mint(&user, &100);

    client.add_pool(&operator, &1, &lp, &true);
    env.ledger().set_sequence_number(110);
    client.deposit(&user, &0, &100);

    env.ledger().set_sequence_number(120);
    match client.try_deposit(&user, &0, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::CallerNotAuthorizedStaker),
        _ => unreachable!("Expected CallerNotAuthorizedStaker error"),
    }
    assert_eq!(reward.total_supply(), 0);

    // The stake can still be recovered.
    assert_eq!(client.emergency_withdraw(&user, &0), 100);
}
