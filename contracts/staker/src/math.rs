//! Fixed-point reward arithmetic.
//!
//! All values are non-negative `i128` token units. Every division truncates
//! toward zero and the lost fraction is never recovered; reward figures
//! observed on chain depend on that.

use crate::ContractError;

/// Scale applied to `acc_reward_per_share`.
pub const ACC_REWARD_SCALE: i128 = 1_000_000_000_000;

/// Share of each pool reward minted to the operator, in percent.
pub const OPERATOR_CUT_PERCENT: i128 = 3;

/// `floor(a * b / denom)` with overflow checks.
pub fn mul_div_floor(a: i128, b: i128, denom: i128) -> Result<i128, ContractError> {
    if denom <= 0 {
        return Err(ContractError::MathOverflow);
    }
    let num = a.checked_mul(b).ok_or(ContractError::MathOverflow)?;
    Ok(num / denom)
}

/// Reward minted for one pool over `units` eligible blocks:
/// `units * reward_per_block * weight / total_weight`.
pub fn pool_reward(
    units: u32,
    reward_per_block: i128,
    weight: u64,
    total_weight: u64,
) -> Result<i128, ContractError> {
    if total_weight == 0 {
        return Ok(0);
    }
    let emitted = (units as i128)
        .checked_mul(reward_per_block)
        .ok_or(ContractError::MathOverflow)?;
    mul_div_floor(emitted, weight as i128, total_weight as i128)
}

pub fn operator_cut(pool_reward: i128) -> Result<i128, ContractError> {
    mul_div_floor(pool_reward, OPERATOR_CUT_PERCENT, 100)
}

/// Increment to `acc_reward_per_share` when `reward` is spread over `total_staked`.
pub fn reward_per_share(reward: i128, total_staked: i128) -> Result<i128, ContractError> {
    mul_div_floor(reward, ACC_REWARD_SCALE, total_staked)
}

/// Reward owed to `amount` staked tokens at accumulator `acc_reward_per_share`.
pub fn accumulated(amount: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    mul_div_floor(amount, acc_reward_per_share, ACC_REWARD_SCALE)
}
