#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub staker: Address,
    pub max_supply: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub to: Address,
    pub amount: i128,
    pub total_supply: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, staker: Address, max_supply: i128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            staker,
            max_supply,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_minted(env: &Env, to: Address, amount: i128, total_supply: i128) {
    env.events().publish(
        (symbol_short!("MINT"), to.clone()),
        MintedEvent {
            to,
            amount,
            total_supply,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone(), to.clone()),
        TransferEvent {
            from,
            to,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_CHG"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            block: env.ledger().sequence(),
        },
    );
}
