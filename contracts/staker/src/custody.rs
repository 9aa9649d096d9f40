//! Token movements in and out of the staker.
//!
//! Reward-token failures come back as typed errors so the calling operation
//! can abort with them. Stake tokens are plain Soroban tokens; a failed
//! transfer aborts the invocation inside the token itself.

use reward_token::{ContractError as TokenError, RewardTokenClient};
use soroban_sdk::{token, Address, Env};

use crate::ContractError;

fn map_token_error(err: TokenError) -> ContractError {
    match err {
        TokenError::MaxSupplyExceeded => ContractError::MaxSupplyExceeded,
        TokenError::CallerNotAuthorizedStaker => ContractError::CallerNotAuthorizedStaker,
        // The staker only pays out what it minted to itself; any other
        // refusal means the books no longer match the token.
        _ => ContractError::InvariantViolation,
    }
}

/// Mint `amount` reward tokens to `to` through the staker-only mint path.
pub fn mint_reward(
    env: &Env,
    reward_token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let client = RewardTokenClient::new(env, reward_token);
    match client.try_staker_mint(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(map_token_error(err)),
        _ => Err(ContractError::InvariantViolation),
    }
}

/// Reward tokens currently held by the staker.
pub fn reward_balance(env: &Env, reward_token: &Address) -> i128 {
    RewardTokenClient::new(env, reward_token).balance(&env.current_contract_address())
}

/// Pay `amount` reward tokens out of the staker's own balance.
pub fn pay_reward(
    env: &Env,
    reward_token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let client = RewardTokenClient::new(env, reward_token);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(map_token_error(err)),
        _ => Err(ContractError::InvariantViolation),
    }
}

pub fn pull_stake(env: &Env, stake_token: &Address, from: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    token::Client::new(env, stake_token).transfer(from, &env.current_contract_address(), &amount);
}

pub fn return_stake(env: &Env, stake_token: &Address, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    token::Client::new(env, stake_token).transfer(&env.current_contract_address(), to, &amount);
}
