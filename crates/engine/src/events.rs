//! # Domain Events
//!
//! Every successful mutation appends exactly one `ProtocolEvent` to the
//! state's event log. The embedding client (dashboard poller, RPC
//! layer) drains the log via `ProtocolEngine::take_events`; the engine
//! itself never consumes events.
//!
//! Failed operations emit nothing — an event implies the mutation
//! committed.

use serde::{Deserialize, Serialize};

use democoin_common::Address;

/// Typed domain event, one per committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolEvent {
    HashPowerSubmitted { miner: Address, accepted_power: u128, total_power: u128 },
    DifficultyChanged { difficulty: u8 },
    ProofCooldownChanged { cooldown_secs: u64 },
    MinerRoleGranted { miner: Address },
    MinerRoleRevoked { miner: Address },
    Minted { target: Address, amount: u128, total_supply: u128 },
    Burned { target: Address, amount: u128, total_supply: u128 },
    Paused,
    Unpaused,
    EmergencyModeActivated,
    EmergencyModeDeactivated,
    PriceUpdated { previous: u128, current: u128 },
    StablePoolDeposited { depositor: Address, gross: u128, fee: u128, shares: u128 },
    StablePoolWithdrawn { withdrawer: Address, shares: u128, gross: u128, fee: u128 },
    CollateralDeposited { depositor: Address, amount: u128 },
    CollateralWithdrawn { withdrawer: Address, amount: u128 },
    MiningRewardClaimed { miner: Address, reward: u128 },
    FeesCollected { insurance: u128, development: u128, marketing: u128 },
}
