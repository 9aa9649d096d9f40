#![no_std]

pub mod config;
mod custody;
pub mod events;
pub mod ledger;
pub mod math;
pub mod multiplier;
pub mod pool;

pub use config::ProgramConfig;
pub use ledger::UserInfo;
pub use pool::PoolInfo;

use soroban_sdk::{contract, contractimpl, Address, Env};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    CallerNotOperator = 4,
    PoolNotFound = 5,
    InsufficientStake = 6,
    /// The reward token refused a mint because it would reach its cap.
    MaxSupplyExceeded = 7,
    /// The reward token does not recognise this contract as its staker.
    CallerNotAuthorizedStaker = 8,
    /// Reward bookkeeping is inconsistent; the operation is aborted.
    InvariantViolation = 9,
    MathOverflow = 10,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakerContract;

#[contractimpl]
impl StakerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Configure the reward program.
    ///
    /// * `operator`     – manages pools and receives the operator cut.
    /// * `reward_token` – capped token that registered this contract as its staker.
    /// * `start_block`  – first block that earns rewards.
    /// * `end_block`    – first block that no longer earns rewards.
    /// * `total_reward` – reward emitted across the whole window, spread evenly
    ///                    per block (the remainder of the division is never paid).
    pub fn initialize(
        env: Env,
        operator: Address,
        reward_token: Address,
        start_block: u32,
        end_block: u32,
        total_reward: i128,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if start_block >= end_block || total_reward < 0 {
            return Err(ContractError::InvalidInput);
        }

        let reward_per_block = total_reward / (end_block - start_block) as i128;
        let program = ProgramConfig {
            reward_token: reward_token.clone(),
            start_block,
            end_block,
            total_reward,
            reward_per_block,
        };
        config::store(&env, &program, &operator);

        events::publish_initialized(
            &env,
            operator,
            reward_token,
            start_block,
            end_block,
            reward_per_block,
        );

        Ok(())
    }

    // ── Pool administration ─────────────────────────────────────────────────

    /// Register a new pool and return its index.
    ///
    /// With `with_update`, every existing pool is settled at the old total
    /// weight first. Without it, rewards not yet accrued by existing pools
    /// are later split using the new total weight.
    pub fn add_pool(
        env: Env,
        operator: Address,
        weight: u64,
        stake_token: Address,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        let program = config::load(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        if with_update {
            pool::mass_update(&env, &program)?;
        }

        let index = pool::add(&env, &program, weight, stake_token.clone())?;
        config::extend_instance_ttl(&env);

        events::publish_pool_added(&env, index, stake_token, weight, pool::total_weight(&env));

        Ok(index)
    }

    /// Change a pool's weight.
    ///
    /// Without `with_update` no accrual happens here; the caller is expected
    /// to have brought the pools up to date (`mass_update_pools`) beforehand.
    pub fn set_weight(
        env: Env,
        operator: Address,
        pool_index: u32,
        weight: u64,
        with_update: bool,
    ) -> Result<(), ContractError> {
        let program = config::load(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        if with_update {
            pool::mass_update(&env, &program)?;
        }

        let previous = pool::set_weight(&env, pool_index, weight)?;

        events::publish_pool_weight_set(
            &env,
            pool_index,
            previous,
            weight,
            pool::total_weight(&env),
        );

        Ok(())
    }

    /// Hand the operator role (and the operator cut) to `new_operator`.
    pub fn change_operator(
        env: Env,
        operator: Address,
        new_operator: Address,
    ) -> Result<(), ContractError> {
        config::load(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        config::set_operator(&env, &new_operator);

        events::publish_operator_changed(&env, operator, new_operator);

        Ok(())
    }

    // ── Accrual ─────────────────────────────────────────────────────────────

    /// Bring one pool's reward checkpoint up to the current block.
    pub fn update_pool(env: Env, pool_index: u32) -> Result<(), ContractError> {
        let program = config::load(&env)?;
        pool::accrue(&env, &program, pool_index)?;
        Ok(())
    }

    /// Bring every pool's reward checkpoint up to the current block.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        let program = config::load(&env)?;
        pool::mass_update(&env, &program)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` tokens in `pool_index`, paying out pending rewards first.
    ///
    /// A zero `amount` only harvests.
    pub fn deposit(
        env: Env,
        user: Address,
        pool_index: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        let program = config::load(&env)?;
        user.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        // 1. Accrue so the payout below sees every block up to now.
        let mut pool = pool::accrue(&env, &program, pool_index)?;

        // 2. Pay out what the existing stake earned.
        let mut position = ledger::load(&env, pool_index, &user);
        let harvested = ledger::settle(&env, &program, &pool, &user, &position)?;

        // 3. Take custody of the new stake.
        custody::pull_stake(&env, &pool.stake_token, &user, amount);

        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;

        // 4. Re-anchor so the new stake earns only from this block on.
        ledger::reanchor(&mut position, &pool)?;
        ledger::save(&env, pool_index, &user, &position);
        pool::save(&env, pool_index, &pool);

        events::publish_deposit(&env, user, pool_index, amount, harvested);

        Ok(())
    }

    /// Unstake `amount` tokens from `pool_index`, paying out pending rewards.
    pub fn withdraw(
        env: Env,
        user: Address,
        pool_index: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        let program = config::load(&env)?;
        user.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut pool = pool::accrue(&env, &program, pool_index)?;
        let mut position = ledger::load(&env, pool_index, &user);
        if amount > position.amount {
            return Err(ContractError::InsufficientStake);
        }

        let harvested = ledger::settle(&env, &program, &pool, &user, &position)?;

        position.amount -= amount;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .filter(|total| *total >= 0)
            .ok_or(ContractError::InvariantViolation)?;

        ledger::reanchor(&mut position, &pool)?;
        ledger::save(&env, pool_index, &user, &position);
        pool::save(&env, pool_index, &pool);

        // Effects are recorded before the stake leaves custody.
        custody::return_stake(&env, &pool.stake_token, &user, amount);

        events::publish_withdraw(&env, user, pool_index, amount, harvested);

        Ok(())
    }

    /// Return the user's whole stake without touching rewards.
    ///
    /// Pending rewards are forfeited. No accrual runs, so this keeps working
    /// when the reward path is failing (for example, the reward token has
    /// reached its cap). Returns the amount sent back.
    pub fn emergency_withdraw(
        env: Env,
        user: Address,
        pool_index: u32,
    ) -> Result<i128, ContractError> {
        config::load(&env)?;
        user.require_auth();

        let mut pool = pool::load(&env, pool_index)?;
        let position = ledger::load(&env, pool_index, &user);
        let amount = position.amount;

        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .filter(|total| *total >= 0)
            .ok_or(ContractError::InvariantViolation)?;

        ledger::save(&env, pool_index, &user, &UserInfo::default());
        pool::save(&env, pool_index, &pool);

        custody::return_stake(&env, &pool.stake_token, &user, amount);

        events::publish_emergency_withdraw(&env, user, pool_index, amount);

        Ok(amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward `user` would receive from `pool_index` if settled at the
    /// current block. Does not mutate state.
    pub fn pending_reward(env: Env, pool_index: u32, user: Address) -> Result<i128, ContractError> {
        let program = config::load(&env)?;
        let pool = pool::load(&env, pool_index)?;
        let position = ledger::load(&env, pool_index, &user);

        let acc = pool::simulated_acc_reward_per_share(
            &env,
            &program,
            &pool,
            env.ledger().sequence(),
        )?;
        ledger::pending(&position, acc)
    }

    /// Reward-eligible blocks in `[from, to)` for this program.
    pub fn get_multiplier(env: Env, from: u32, to: u32) -> Result<u32, ContractError> {
        let program = config::load(&env)?;
        Ok(multiplier::multiplier(
            from,
            to,
            program.start_block,
            program.end_block,
        ))
    }

    pub fn pool_length(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn get_pool(env: Env, pool_index: u32) -> Result<PoolInfo, ContractError> {
        pool::load(&env, pool_index)
    }

    pub fn get_user_info(env: Env, pool_index: u32, user: Address) -> UserInfo {
        ledger::load(&env, pool_index, &user)
    }

    pub fn total_weight(env: Env) -> u64 {
        pool::total_weight(&env)
    }

    pub fn get_config(env: Env) -> Result<ProgramConfig, ContractError> {
        config::load(&env)
    }

    pub fn get_operator(env: Env) -> Result<Address, ContractError> {
        config::operator(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if `caller` is not the stored operator.
    fn require_operator(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if *caller != config::operator(env)? {
            return Err(ContractError::CallerNotOperator);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_operator;
