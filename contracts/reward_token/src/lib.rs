#![no_std]

pub mod events;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const STAKER: Symbol = symbol_short!("STAKER");
const METADATA: Symbol = symbol_short!("META");
const MAX_SUPPLY: Symbol = symbol_short!("MAX_SUP");
const TOTAL_SUPPLY: Symbol = symbol_short!("TOT_SUP");

// Per-holder persistent storage uses tuple keys: (prefix, holder_address)
const BALANCE: Symbol = symbol_short!("BAL");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    CallerNotOwner = 4,
    CallerNotAuthorizedStaker = 5,
    MaxSupplyExceeded = 6,
    InsufficientBalance = 7,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Display metadata fixed at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// A premint performed by `initialize` (bounty, cashback and similar programs).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocation {
    pub to: Address,
    pub amount: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Reward token with a hard supply cap and a dedicated mint path for the staker.
#[contract]
pub struct RewardToken;

#[contractimpl]
impl RewardToken {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the token.
    ///
    /// * `owner`       – may call `mint` and `transfer_ownership`.
    /// * `staker`      – the only identity accepted by `staker_mint`.
    /// * `max_supply`  – exclusive upper bound on `total_supply`.
    /// * `allocations` – preminted balances, counted against the cap.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        staker: Address,
        max_supply: i128,
        name: String,
        symbol: String,
        decimals: u32,
        allocations: Vec<Allocation>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if max_supply <= 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&STAKER, &staker);
        env.storage().instance().set(&MAX_SUPPLY, &max_supply);
        env.storage().instance().set(
            &METADATA,
            &TokenMetadata {
                name,
                symbol,
                decimals,
            },
        );
        extend_instance_ttl(&env);

        for allocation in allocations.iter() {
            mint_capped(&env, &allocation.to, allocation.amount)?;
        }

        events::publish_initialized(&env, owner, staker, max_supply);

        Ok(())
    }

    // ── Minting ─────────────────────────────────────────────────────────────

    /// Owner-only mint, bounded by the supply cap.
    pub fn mint(env: Env, owner: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        require_initialized(&env)?;
        owner.require_auth();

        let stored: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if owner != stored {
            return Err(ContractError::CallerNotOwner);
        }

        mint_capped(&env, &to, amount)
    }

    /// Mint path reserved for the staker contract, bounded by the supply cap.
    pub fn staker_mint(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        require_initialized(&env)?;
        caller.require_auth();

        let staker: Address = env
            .storage()
            .instance()
            .get(&STAKER)
            .ok_or(ContractError::NotInitialized)?;
        if caller != staker {
            return Err(ContractError::CallerNotAuthorizedStaker);
        }

        mint_capped(&env, &to, amount)
    }

    // ── Transfers ───────────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        require_initialized(&env)?;
        from.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let from_balance = read_balance(&env, &from);
        if from_balance < amount {
            return Err(ContractError::InsufficientBalance);
        }
        write_balance(&env, &from, from_balance - amount);

        let to_balance = read_balance(&env, &to);
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or(ContractError::InvalidInput)?;
        write_balance(&env, &to, new_to_balance);

        events::publish_transfer(&env, from, to, amount);

        Ok(())
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn transfer_ownership(
        env: Env,
        owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        require_initialized(&env)?;
        owner.require_auth();

        let stored: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if owner != stored {
            return Err(ContractError::CallerNotOwner);
        }

        env.storage().instance().set(&OWNER, &new_owner);

        events::publish_ownership_transferred(&env, owner, new_owner);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
    }

    pub fn max_supply(env: Env) -> i128 {
        env.storage().instance().get(&MAX_SUPPLY).unwrap_or(0)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        Ok(read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        Ok(read_metadata(&env)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, ContractError> {
        Ok(read_metadata(&env)?.decimals)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn staker(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKER)
            .ok_or(ContractError::NotInitialized)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !env.storage().instance().has(&INITIALIZED) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn read_metadata(env: &Env) -> Result<TokenMetadata, ContractError> {
    env.storage()
        .instance()
        .get(&METADATA)
        .ok_or(ContractError::NotInitialized)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(BALANCE, id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = (BALANCE, id.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Credit `amount` to `to`. The cap is exclusive: a mint that would bring
/// the supply to `max_supply` or beyond fails with `MaxSupplyExceeded`.
fn mint_capped(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidInput);
    }

    let max_supply: i128 = env
        .storage()
        .instance()
        .get(&MAX_SUPPLY)
        .ok_or(ContractError::NotInitialized)?;
    let supply: i128 = env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0);

    let new_supply = supply
        .checked_add(amount)
        .ok_or(ContractError::MaxSupplyExceeded)?;
    if new_supply >= max_supply {
        return Err(ContractError::MaxSupplyExceeded);
    }

    env.storage().instance().set(&TOTAL_SUPPLY, &new_supply);
    write_balance(env, to, read_balance(env, to) + amount);

    events::publish_minted(env, to.clone(), amount, new_supply);

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
