use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const OPERATOR: Symbol = symbol_short!("OPERATOR");

pub(crate) const TTL_THRESHOLD: u32 = 5184000;
pub(crate) const TTL_EXTEND_TO: u32 = 10368000;

/// Program parameters, fixed by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgramConfig {
    pub reward_token: Address,
    pub start_block: u32,
    pub end_block: u32,
    pub total_reward: i128,
    /// `total_reward / (end_block - start_block)`, truncated.
    pub reward_per_block: i128,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn store(env: &Env, config: &ProgramConfig, operator: &Address) {
    env.storage().instance().set(&INITIALIZED, &true);
    env.storage().instance().set(&CONFIG, config);
    env.storage().instance().set(&OPERATOR, operator);
    extend_instance_ttl(env);
}

pub fn load(env: &Env) -> Result<ProgramConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn operator(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OPERATOR)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_operator(env: &Env, operator: &Address) {
    env.storage().instance().set(&OPERATOR, operator);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
