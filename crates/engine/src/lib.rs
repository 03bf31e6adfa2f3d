//! # DEMOCOIN Protocol Engine
//!
//! The deterministic state-transition core of the DEMOCOIN token
//! protocol: a capped-supply ledger steered toward a price peg, fed by
//! proof-of-work-gated mining, a fee-bearing stable pool, and a
//! collateral vault.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ProtocolEngine (facade)                     │
//! │        parking_lot::RwLock — serialized mutations,          │
//! │        snapshot-consistent queries                          │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//!      ┌──────────┬──────────┼──────────┬──────────┐
//!      ▼          ▼          ▼          ▼          ▼
//!  mining     stable_pool  collateral  rewards   fees/price/token
//!  (handlers, one capability check each, then state primitives)
//!      │          │          │          │          │
//!      └──────────┴──────────┼──────────┴──────────┘
//!                            ▼
//!                  state::ProtocolState
//!             (accounts, miners, supply, funds)
//! ```
//!
//! Every mutating call runs exactly one gate check
//! ([`democoin_common::gate::authorize`]), then touches state through
//! the primitives in `state::internal_*`. Failures are
//! [`ProtocolError`] values and leave no partial mutation; successes
//! append one [`ProtocolEvent`] to the drainable log.
//!
//! The engine owns no clock: every time-dependent operation takes the
//! caller's `now` in unix seconds. The embedding client decides what
//! time it is; tests drive time explicitly.

pub mod collateral;
pub mod events;
pub mod fees;
pub mod gate;
pub mod mining;
pub mod price;
pub mod rewards;
pub mod stable_pool;
pub mod state;
pub mod token;


use anyhow::Result;
use parking_lot::RwLock;

pub use democoin_common::{
    Address, Capability, Digest, Proof, ProtocolConfig, ProtocolError, Role,
};

pub use events::ProtocolEvent;
pub use fees::FundSplit;
pub use state::{Account, MinerRecord, ProtocolState};

/// Caller-facing engine facade.
///
/// Wraps [`ProtocolState`] in a `parking_lot::RwLock`: mutations take
/// the write lock (single writer, atomic per call), queries take the
/// read lock (fully consistent snapshot, never blocked by other
/// readers). Calls from one caller issued sequentially are applied in
/// issue order; calls from different callers serialize in lock order
/// with no fairness guarantee.
pub struct ProtocolEngine {
    state: RwLock<ProtocolState>,
}

impl ProtocolEngine {
    /// Builds an engine at genesis: zero supply, price at the peg,
    /// `admin` holding the admin role. Rejects inconsistent configs.
    pub fn new(config: ProtocolConfig, admin: Address) -> Result<Self> {
        if let Err(reason) = config.validate() {
            anyhow::bail!("invalid protocol config: {}", reason);
        }
        Ok(ProtocolEngine { state: RwLock::new(ProtocolState::new(config, admin)) })
    }

    // ──────────────────────────────────────────────────────────────────
    // Queries (read lock, consistent snapshot)
    // ──────────────────────────────────────────────────────────────────

    pub fn get_current_price(&self) -> u128 {
        self.state.read().current_price()
    }

    pub fn get_total_supply(&self) -> u128 {
        self.state.read().total_supply()
    }

    pub fn max_supply(&self) -> u128 {
        self.state.read().max_supply()
    }

    pub fn balance_of(&self, addr: &Address) -> u128 {
        self.state.read().balance_of(addr)
    }

    pub fn get_collateral_ratio(&self) -> u128 {
        collateral::collateral_ratio(&self.state.read())
    }

    pub fn is_emergency_mode(&self) -> bool {
        self.state.read().is_emergency_mode()
    }

    pub fn is_paused(&self) -> bool {
        self.state.read().is_paused()
    }

    pub fn calculate_mining_reward(&self, miner: &Address, now: u64) -> u128 {
        rewards::calculate_mining_reward(&self.state.read(), miner, now)
    }

    pub fn calculate_max_borrowable(&self, addr: &Address) -> u128 {
        collateral::calculate_max_borrowable(&self.state.read(), addr)
    }

    pub fn calculate_stable_pool_shares(&self, amount: u128) -> u128 {
        stable_pool::calculate_stable_pool_shares(&self.state.read(), amount)
    }

    pub fn get_stable_pool_balance(&self, addr: &Address) -> u128 {
        self.state.read().stable_pool_balance_of(addr)
    }

    pub fn stable_pool_apy(&self) -> u64 {
        stable_pool::stable_pool_apy(&self.state.read())
    }

    pub fn total_stable_pool(&self) -> u128 {
        self.state.read().total_stable_pool()
    }

    pub fn get_collateral_deposit(&self, addr: &Address) -> u128 {
        self.state.read().collateral_of(addr)
    }

    pub fn total_collateral(&self) -> u128 {
        self.state.read().total_collateral()
    }

    pub fn total_hash_power(&self, addr: &Address) -> u128 {
        self.state.read().total_hash_power(addr)
    }

    pub fn network_hash_power(&self) -> u128 {
        self.state.read().network_hash_power()
    }

    pub fn last_reward_time(&self, addr: &Address) -> Option<u64> {
        self.state.read().last_reward_time(addr)
    }

    pub fn difficulty(&self) -> u8 {
        self.state.read().difficulty()
    }

    pub fn proof_cooldown_secs(&self) -> u64 {
        self.state.read().proof_cooldown_secs()
    }

    pub fn pending_fees(&self) -> u128 {
        self.state.read().pending_fees()
    }

    pub fn fund_balances(&self) -> (u128, u128, u128) {
        self.state.read().fund_balances()
    }

    pub fn has_role(&self, addr: &Address, role: Role) -> bool {
        self.state.read().has_role(addr, role)
    }

    // ──────────────────────────────────────────────────────────────────
    // Mutations (write lock, atomic per call)
    // ──────────────────────────────────────────────────────────────────

    pub fn submit_hash_power(
        &self,
        caller: Address,
        proof: &Proof,
        now: u64,
    ) -> Result<u128, ProtocolError> {
        mining::handle_submit_hash_power(&mut self.state.write(), caller, proof, now)
    }

    pub fn deposit_to_stable_pool(
        &self,
        caller: Address,
        amount: u128,
    ) -> Result<u128, ProtocolError> {
        stable_pool::handle_deposit_to_stable_pool(&mut self.state.write(), caller, amount)
    }

    pub fn withdraw_from_stable_pool(
        &self,
        caller: Address,
        shares: u128,
    ) -> Result<u128, ProtocolError> {
        stable_pool::handle_withdraw_from_stable_pool(&mut self.state.write(), caller, shares)
    }

    pub fn claim_mining_reward(&self, caller: Address, now: u64) -> Result<u128, ProtocolError> {
        rewards::handle_claim_mining_reward(&mut self.state.write(), caller, now)
    }

    pub fn deposit_collateral(&self, caller: Address, amount: u128) -> Result<(), ProtocolError> {
        collateral::handle_deposit_collateral(&mut self.state.write(), caller, amount)
    }

    pub fn withdraw_collateral(&self, caller: Address, amount: u128) -> Result<(), ProtocolError> {
        collateral::handle_withdraw_collateral(&mut self.state.write(), caller, amount)
    }

    pub fn update_price(&self, caller: Address, now: u64) -> Result<u128, ProtocolError> {
        price::handle_update_price(&mut self.state.write(), caller, now)
    }

    pub fn mint(&self, caller: Address, target: Address, amount: u128) -> Result<(), ProtocolError> {
        token::handle_mint(&mut self.state.write(), caller, target, amount)
    }

    pub fn burn(&self, caller: Address, target: Address, amount: u128) -> Result<(), ProtocolError> {
        token::handle_burn(&mut self.state.write(), caller, target, amount)
    }

    pub fn pause(&self, caller: Address) -> Result<(), ProtocolError> {
        gate::handle_pause(&mut self.state.write(), caller)
    }

    pub fn unpause(&self, caller: Address) -> Result<(), ProtocolError> {
        gate::handle_unpause(&mut self.state.write(), caller)
    }

    pub fn set_difficulty(&self, caller: Address, difficulty: u8) -> Result<(), ProtocolError> {
        mining::handle_set_difficulty(&mut self.state.write(), caller, difficulty)
    }

    pub fn set_proof_cooldown(&self, caller: Address, secs: u64) -> Result<(), ProtocolError> {
        mining::handle_set_proof_cooldown(&mut self.state.write(), caller, secs)
    }

    pub fn set_emergency_mode(&self, caller: Address, enabled: bool) -> Result<(), ProtocolError> {
        gate::handle_set_emergency_mode(&mut self.state.write(), caller, enabled)
    }

    pub fn collect_fees(&self, caller: Address) -> Result<FundSplit, ProtocolError> {
        fees::handle_collect_fees(&mut self.state.write(), caller)
    }

    pub fn grant_miner_role(&self, caller: Address, miner: Address) -> Result<(), ProtocolError> {
        gate::handle_grant_miner_role(&mut self.state.write(), caller, miner)
    }

    pub fn revoke_miner_role(&self, caller: Address, miner: Address) -> Result<(), ProtocolError> {
        gate::handle_revoke_miner_role(&mut self.state.write(), caller, miner)
    }

    /// Drains all events accumulated since the last drain.
    pub fn take_events(&self) -> Vec<ProtocolEvent> {
        self.state.write().take_events()
    }
}
