//! # Protocol Error Types
//!
//! `ProtocolError` is the public error contract for every mutating
//! operation of the engine. Each variant maps to a specific,
//! non-overlapping failure condition:
//!
//! | Category | Variants |
//! |----------|----------|
//! | Access | `Unauthorized`, `ProtocolPaused`, `EmergencyMode` |
//! | Amounts | `ZeroAmount`, `InsufficientBalance`, `InsufficientShares`, `InsufficientCollateral`, `SupplyCapExceeded` |
//! | Mining | `CooldownActive`, `InvalidProof`, `NoHashPower`, `OutOfRange` |
//! | Price | `TooSoon` |
//!
//! All failures are synchronous and recoverable: the caller adjusts its
//! inputs or waits. Nothing is retried inside the engine, and no partial
//! state mutation survives a failed call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gate::Role;

/// Error type for all engine operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolError {
    /// Caller does not hold the role the operation requires.
    #[error("caller does not hold the required {required} role")]
    Unauthorized {
        /// Role the capability check demanded.
        required: Role,
    },

    /// The protocol is paused; only admin controls are accepted.
    #[error("protocol is paused")]
    ProtocolPaused,

    /// The emergency circuit breaker is active; value-moving
    /// operations are disabled, queries remain available.
    #[error("emergency mode is active")]
    EmergencyMode,

    /// The operation was called with a zero amount or zero shares.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Token balance is short of the requested amount.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    /// The implied withdrawal amount exceeds the caller's pool deposit.
    #[error("insufficient shares: requested amount {requested}, deposit {available}")]
    InsufficientShares { requested: u128, available: u128 },

    /// Withdrawal would drive the collateral deposit negative.
    #[error("insufficient collateral: requested {requested}, deposited {available}")]
    InsufficientCollateral { requested: u128, available: u128 },

    /// Minting `requested` would push total supply past the cap.
    #[error("supply cap exceeded: requested {requested}, headroom {headroom}")]
    SupplyCapExceeded { requested: u128, headroom: u128 },

    /// A parameter fell outside its valid range.
    #[error("value {value} out of range [{min}, {max}]")]
    OutOfRange { value: u64, min: u64, max: u64 },

    /// The per-miner submission cooldown has not elapsed yet.
    #[error("proof cooldown active: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: u64 },

    /// Proof-of-work verification failed.
    #[error("invalid proof of work")]
    InvalidProof,

    /// Reward claim from a miner with no accumulated hash power.
    #[error("no hash power recorded for caller")]
    NoHashPower,

    /// Price update rate limit has not elapsed yet.
    #[error("price update too soon: {remaining_secs}s remaining")]
    TooSoon { remaining_secs: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_operator_friendly() {
        let err = ProtocolError::InsufficientBalance { required: 500, available: 100 };
        assert_eq!(err.to_string(), "insufficient balance: required 500, available 100");

        let err = ProtocolError::Unauthorized { required: Role::Admin };
        assert_eq!(err.to_string(), "caller does not hold the required admin role");

        let err = ProtocolError::CooldownActive { remaining_secs: 42 };
        assert_eq!(err.to_string(), "proof cooldown active: 42s remaining");
    }

    #[test]
    fn errors_are_value_types() {
        let err = ProtocolError::TooSoon { remaining_secs: 7 };
        let json = serde_json::to_string(&err).unwrap();
        let back: ProtocolError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
