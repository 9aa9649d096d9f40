//! Pool registry and reward accrual.
//!
//! Pools form an append-only arena: a pool's index is its identity and is
//! never reused. `acc_reward_per_share` is only ever advanced by [`accrue`].

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::config::{self, ProgramConfig, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::{custody, events, math, multiplier, ContractError};

const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGHT");

// Per-pool persistent storage uses tuple keys: (prefix, pool_index)
const POOL: Symbol = symbol_short!("POOL");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub stake_token: Address,
    /// Allocation points; the pool earns `weight / total_weight` of emissions.
    pub weight: u64,
    /// Block up to which rewards have been minted into this pool. Keeps
    /// following the current block after `end_block`; intervals starting at
    /// or past `end_block` earn 0.
    pub last_reward_block: u32,
    /// Accumulated reward per staked token, scaled by `ACC_REWARD_SCALE`.
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

fn set_total_weight(env: &Env, total_weight: u64) {
    env.storage().instance().set(&TOTAL_WEIGHT, &total_weight);
}

pub fn load(env: &Env, index: u32) -> Result<PoolInfo, ContractError> {
    if index >= count(env) {
        return Err(ContractError::PoolNotFound);
    }
    env.storage()
        .persistent()
        .get(&(POOL, index))
        .ok_or(ContractError::PoolNotFound)
}

pub fn save(env: &Env, index: u32, pool: &PoolInfo) {
    let key = (POOL, index);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Append a pool and return its index.
///
/// The new pool starts earning at `max(now, start_block)`. Existing pools are
/// left untouched; callers wanting them settled at the old total weight must
/// run [`mass_update`] first.
pub fn add(
    env: &Env,
    config: &ProgramConfig,
    weight: u64,
    stake_token: Address,
) -> Result<u32, ContractError> {
    let now = env.ledger().sequence();
    let index = count(env);

    let new_total = total_weight(env)
        .checked_add(weight)
        .ok_or(ContractError::MathOverflow)?;

    save(
        env,
        index,
        &PoolInfo {
            stake_token,
            weight,
            last_reward_block: now.max(config.start_block),
            acc_reward_per_share: 0,
            total_staked: 0,
        },
    );
    env.storage().instance().set(&POOL_COUNT, &(index + 1));
    set_total_weight(env, new_total);

    Ok(index)
}

/// Change a pool's weight and return the previous one. Does not accrue.
pub fn set_weight(env: &Env, index: u32, weight: u64) -> Result<u64, ContractError> {
    let mut pool = load(env, index)?;
    let previous = pool.weight;

    let new_total = total_weight(env)
        .checked_sub(previous)
        .and_then(|t| t.checked_add(weight))
        .ok_or(ContractError::InvariantViolation)?;

    pool.weight = weight;
    save(env, index, &pool);
    set_total_weight(env, new_total);

    Ok(previous)
}

// ── Accrual ──────────────────────────────────────────────────────────────────

/// Reward the pool has earned between its checkpoint and `now`, or zero when
/// nothing is staked or no block has passed.
fn reward_since_checkpoint(
    env: &Env,
    config: &ProgramConfig,
    pool: &PoolInfo,
    now: u32,
) -> Result<i128, ContractError> {
    if now <= pool.last_reward_block || pool.total_staked == 0 {
        return Ok(0);
    }
    let units = multiplier::multiplier(
        pool.last_reward_block,
        now,
        config.start_block,
        config.end_block,
    );
    math::pool_reward(units, config.reward_per_block, pool.weight, total_weight(env))
}

/// Accumulator value the pool would hold if it were accrued at `now`.
pub fn simulated_acc_reward_per_share(
    env: &Env,
    config: &ProgramConfig,
    pool: &PoolInfo,
    now: u32,
) -> Result<i128, ContractError> {
    let reward = reward_since_checkpoint(env, config, pool, now)?;
    if reward == 0 {
        return Ok(pool.acc_reward_per_share);
    }
    pool.acc_reward_per_share
        .checked_add(math::reward_per_share(reward, pool.total_staked)?)
        .ok_or(ContractError::MathOverflow)
}

/// Bring pool `index` up to the current block.
///
/// Mints the operator cut and the pool reward (into the staker's custody) and
/// advances the accumulator. Idle pools move their checkpoint without minting,
/// so their share of emissions is forfeited. Calling twice in the same block
/// is a no-op.
pub fn accrue(env: &Env, config: &ProgramConfig, index: u32) -> Result<PoolInfo, ContractError> {
    let mut pool = load(env, index)?;
    let now = env.ledger().sequence();

    if now <= pool.last_reward_block {
        return Ok(pool);
    }

    let reward = reward_since_checkpoint(env, config, &pool, now)?;
    if reward > 0 {
        let operator = config::operator(env)?;
        let cut = math::operator_cut(reward)?;

        custody::mint_reward(env, &config.reward_token, &operator, cut)?;
        custody::mint_reward(
            env,
            &config.reward_token,
            &env.current_contract_address(),
            reward,
        )?;

        pool.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(math::reward_per_share(reward, pool.total_staked)?)
            .ok_or(ContractError::MathOverflow)?;

        events::publish_pool_accrued(env, index, reward, cut, pool.acc_reward_per_share);
    }

    pool.last_reward_block = now;
    save(env, index, &pool);

    Ok(pool)
}

/// Accrue every registered pool.
pub fn mass_update(env: &Env, config: &ProgramConfig) -> Result<(), ContractError> {
    for index in 0..count(env) {
        accrue(env, config, index)?;
    }
    Ok(())
}
