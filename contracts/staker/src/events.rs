#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the program is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub operator: Address,
    pub reward_token: Address,
    pub start_block: u32,
    pub end_block: u32,
    pub reward_per_block: i128,
    pub block: u32,
}

/// Fired when the operator registers a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool: u32,
    pub stake_token: Address,
    pub weight: u64,
    pub total_weight: u64,
    pub block: u32,
}

/// Fired when the operator changes a pool's weight.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pool: u32,
    pub previous_weight: u64,
    pub new_weight: u64,
    pub total_weight: u64,
    pub block: u32,
}

/// Fired whenever accrual mints rewards for a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAccruedEvent {
    pub pool: u32,
    pub reward: i128,
    pub operator_cut: i128,
    pub acc_reward_per_share: i128,
    pub block: u32,
}

/// Fired on every deposit, including zero-amount harvests.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub pool: u32,
    pub amount: i128,
    pub harvested: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub pool: u32,
    pub amount: i128,
    pub harvested: i128,
    pub block: u32,
}

/// Fired when a user pulls their stake and forfeits pending rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub user: Address,
    pub pool: u32,
    pub amount: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorChangedEvent {
    pub previous_operator: Address,
    pub new_operator: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    operator: Address,
    reward_token: Address,
    start_block: u32,
    end_block: u32,
    reward_per_block: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            operator,
            reward_token,
            start_block,
            end_block,
            reward_per_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool: u32,
    stake_token: Address,
    weight: u64,
    total_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool),
        PoolAddedEvent {
            pool,
            stake_token,
            weight,
            total_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_weight_set(
    env: &Env,
    pool: u32,
    previous_weight: u64,
    new_weight: u64,
    total_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool),
        PoolWeightSetEvent {
            pool,
            previous_weight,
            new_weight,
            total_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_accrued(
    env: &Env,
    pool: u32,
    reward: i128,
    operator_cut: i128,
    acc_reward_per_share: i128,
) {
    env.events().publish(
        (symbol_short!("ACCRUED"), pool),
        PoolAccruedEvent {
            pool,
            reward,
            operator_cut,
            acc_reward_per_share,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposit(env: &Env, user: Address, pool: u32, amount: i128, harvested: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone(), pool),
        DepositEvent {
            user,
            pool,
            amount,
            harvested,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(env: &Env, user: Address, pool: u32, amount: i128, harvested: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone(), pool),
        WithdrawEvent {
            user,
            pool,
            amount,
            harvested,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(env: &Env, user: Address, pool: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), user.clone(), pool),
        EmergencyWithdrawEvent {
            user,
            pool,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_operator_changed(env: &Env, previous_operator: Address, new_operator: Address) {
    env.events().publish(
        (symbol_short!("OP_CHG"), new_operator.clone()),
        OperatorChangedEvent {
            previous_operator,
            new_operator,
            block: env.ledger().sequence(),
        },
    );
}
