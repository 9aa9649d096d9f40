//! Per-user positions and reward settlement.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::config::{ProgramConfig, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::pool::PoolInfo;
use crate::{custody, math, ContractError};

// Per-user persistent storage uses tuple keys: (prefix, pool_index, user_address)
const USER: Symbol = symbol_short!("USER");

/// A user's position in one pool. A zeroed position is indistinguishable
/// from one that never existed.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: i128,
    /// `amount * acc_reward_per_share / ACC_REWARD_SCALE` at the last settlement.
    pub reward_debt: i128,
}

pub fn load(env: &Env, index: u32, user: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&(USER, index, user.clone()))
        .unwrap_or_default()
}

pub fn save(env: &Env, index: u32, user: &Address, position: &UserInfo) {
    let key = (USER, index, user.clone());
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Reward owed to `position` at accumulator `acc_reward_per_share`.
///
/// A negative figure means the reward debt ran ahead of the accumulator,
/// which the bookkeeping never allows; it is reported, not clamped.
pub fn pending(position: &UserInfo, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    let accumulated = math::accumulated(position.amount, acc_reward_per_share)?;
    let owed = accumulated
        .checked_sub(position.reward_debt)
        .ok_or(ContractError::MathOverflow)?;
    if owed < 0 {
        return Err(ContractError::InvariantViolation);
    }
    Ok(owed)
}

/// Pay out what `position` is owed against the pool's accrued checkpoint.
/// Returns the amount paid. The caller re-anchors the debt with
/// [`reanchor`] once the staked amount has been updated.
///
/// Truncation in the per-share accumulator can leave custody a unit or two
/// below the sum of what positions are owed, so the payout is capped at the
/// staker's reward balance and the remainder is dropped with the re-anchor.
pub fn settle(
    env: &Env,
    config: &ProgramConfig,
    pool: &PoolInfo,
    user: &Address,
    position: &UserInfo,
) -> Result<i128, ContractError> {
    let owed = pending(position, pool.acc_reward_per_share)?;
    if owed == 0 {
        return Ok(0);
    }
    let paid = owed.min(custody::reward_balance(env, &config.reward_token));
    custody::pay_reward(env, &config.reward_token, user, paid)?;
    Ok(paid)
}

pub fn reanchor(position: &mut UserInfo, pool: &PoolInfo) -> Result<(), ContractError> {
    position.reward_debt = math::accumulated(position.amount, pool.acc_reward_per_share)?;
    Ok(())
}
