//! # Protocol State Management Module
//!
//! Entry point and facade for the engine's mutable state. `mod.rs`
//! holds the `ProtocolState` struct, the constructor, and read-only
//! queries; the mutation primitives live in focused `internal_*`
//! modules, each an `impl ProtocolState` block:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `internal_account` | Account CRUD, balance credit/debit |
//! | `internal_miner` | Miner records, hash-power aggregates |
//! | `internal_supply` | Supply-capped mint, burn |
//! | `internal_funds` | Pending fees and the reserve funds |
//!
//! The handler modules (`mining`, `stable_pool`, `collateral`,
//! `rewards`, `fees`, `price`, `token`, `gate`) compose these
//! primitives; nothing outside the crate mutates state directly.
//!
//! ## Invariants (hold before and after every call)
//!
//! - `total_supply <= config.max_supply`
//! - `total_stable_pool == Σ accounts.stable_pool_deposit`
//! - `total_collateral == Σ accounts.collateral_deposit`
//! - `difficulty ∈ [DIFFICULTY_MIN, DIFFICULTY_MAX]`
//!
//! No method here reads a clock; time enters exclusively as handler
//! parameters.

mod internal_account;
mod internal_funds;
mod internal_miner;
mod internal_supply;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use democoin_common::{Address, ProtocolConfig, Role};

use crate::events::ProtocolEvent;

/// Per-address holdings. Created implicitly on first interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Free token balance, smallest units.
    pub token_balance: u128,
    /// Amount locked in the stable pool (net of deposit fees).
    pub stable_pool_deposit: u128,
    /// Amount locked as collateral.
    pub collateral_deposit: u128,
}

/// Per-miner mining record. Created on first accepted submission,
/// never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinerRecord {
    /// Cumulative accepted hash power.
    pub total_hash_power: u128,
    /// Unix seconds of the last accepted submission.
    pub last_submission_time: u64,
    /// Unix seconds of the last reward claim (initialized at first
    /// accepted submission).
    pub last_reward_time: u64,
}

/// The engine's entire mutable state. Single instance per engine;
/// all mutations flow through the handler modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolState {
    pub(crate) config: ProtocolConfig,

    // Token ledger
    pub(crate) total_supply: u128,

    // Price controller
    pub(crate) current_price: u128,
    pub(crate) supply_at_checkpoint: u128,
    pub(crate) last_price_update: u64,

    // Stable pool
    pub(crate) total_stable_pool: u128,
    pub(crate) stable_pool_shares: u128,

    // Collateral vault
    pub(crate) total_collateral: u128,

    // Mining
    pub(crate) difficulty: u8,
    pub(crate) proof_cooldown_secs: u64,
    pub(crate) network_hash_power: u128,

    // Circuit breakers
    pub(crate) paused: bool,
    pub(crate) emergency_mode: bool,

    // Fee routing
    pub(crate) pending_fees: u128,
    pub(crate) insurance_fund: u128,
    pub(crate) development_fund: u128,
    pub(crate) marketing_fund: u128,

    // Tables
    pub(crate) accounts: HashMap<Address, Account>,
    pub(crate) miners: HashMap<Address, MinerRecord>,
    pub(crate) roles: HashMap<Address, BTreeSet<Role>>,

    // Event log, drained by the embedding client.
    pub(crate) events: Vec<ProtocolEvent>,
}

impl ProtocolState {
    /// Genesis state: zero supply, price at the peg, one admin.
    ///
    /// The config is assumed valid (`ProtocolConfig::validate` runs in
    /// the engine constructor).
    pub fn new(config: ProtocolConfig, admin: Address) -> Self {
        let mut roles: HashMap<Address, BTreeSet<Role>> = HashMap::new();
        roles.entry(admin).or_default().insert(Role::Admin);

        ProtocolState {
            total_supply: 0,
            current_price: config.target_price,
            supply_at_checkpoint: 0,
            last_price_update: 0,
            total_stable_pool: 0,
            stable_pool_shares: 0,
            total_collateral: 0,
            difficulty: config.initial_difficulty,
            proof_cooldown_secs: config.proof_cooldown_secs,
            network_hash_power: 0,
            paused: false,
            emergency_mode: false,
            pending_fees: 0,
            insurance_fund: 0,
            development_fund: 0,
            marketing_fund: 0,
            accounts: HashMap::new(),
            miners: HashMap::new(),
            roles,
            events: Vec::new(),
            config,
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // Queries
    // ──────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn max_supply(&self) -> u128 {
        self.config.max_supply
    }

    pub fn current_price(&self) -> u128 {
        self.current_price
    }

    pub fn total_stable_pool(&self) -> u128 {
        self.total_stable_pool
    }

    pub fn stable_pool_shares_outstanding(&self) -> u128 {
        self.stable_pool_shares
    }

    pub fn total_collateral(&self) -> u128 {
        self.total_collateral
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn proof_cooldown_secs(&self) -> u64 {
        self.proof_cooldown_secs
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_emergency_mode(&self) -> bool {
        self.emergency_mode
    }

    // ──────────────────────────────────────────────────────────────────
    // Event log
    // ──────────────────────────────────────────────────────────────────

    pub(crate) fn emit(&mut self, event: ProtocolEvent) {
        self.events.push(event);
    }

    /// Drains and returns all events accumulated since the last drain.
    pub fn take_events(&mut self) -> Vec<ProtocolEvent> {
        std::mem::take(&mut self.events)
    }
}
