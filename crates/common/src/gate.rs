//! # Governance Gate
//!
//! Roles, capabilities, and the single authorization check consulted at
//! the top of every mutating operation. Access control lives in one
//! place instead of being re-derived ad hoc inside each handler: a
//! handler names the [`Capability`] it needs, the engine snapshots the
//! caller's standing into a [`GateContext`], and [`authorize`] yields a
//! tagged result.
//!
//! ## Capability Matrix
//!
//! | Capability | Role required | Blocked by pause | Blocked by emergency |
//! |------------|---------------|------------------|----------------------|
//! | `AdminControl` | admin | no | no |
//! | `SubmitProof` | miner | yes | no |
//! | `MoveValue` | none | yes | yes |
//! | `SteerPrice` | none | yes | no |
//!
//! Admin controls are never blocked by the pause flag or the emergency
//! circuit breaker — they are the way out of both states.
//!
//! Pure evaluation: no state access, no side effects, deterministic for
//! a given context.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProtocolError;

/// Protocol roles. Granted per address; an address may hold several.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// May mint/burn, pause, tune mining parameters, toggle emergency
    /// mode, collect fees, and manage the miner role.
    Admin,
    /// May submit hash-power proofs.
    Miner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Miner => f.write_str("miner"),
        }
    }
}

/// What a mutating operation is about to do, for gate purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Administrative control: mint/burn, pause/unpause, difficulty and
    /// cooldown tuning, emergency toggle, fee collection, role grants.
    AdminControl,
    /// Submit a proof-of-work for hash-power credit.
    SubmitProof,
    /// Move token value: pool deposits/withdrawals, collateral moves,
    /// reward claims.
    MoveValue,
    /// Run the price controller.
    SteerPrice,
}

/// Snapshot of the caller's standing at the moment of the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateContext {
    pub paused: bool,
    pub emergency_mode: bool,
    pub is_admin: bool,
    pub is_miner: bool,
}

/// The uniform access check. Every mutating engine operation calls this
/// exactly once, before touching any state.
pub fn authorize(ctx: &GateContext, cap: Capability) -> Result<(), ProtocolError> {
    match cap {
        Capability::AdminControl => {
            if !ctx.is_admin {
                return Err(ProtocolError::Unauthorized { required: Role::Admin });
            }
            Ok(())
        }
        Capability::SubmitProof => {
            if !ctx.is_miner {
                return Err(ProtocolError::Unauthorized { required: Role::Miner });
            }
            if ctx.paused {
                return Err(ProtocolError::ProtocolPaused);
            }
            Ok(())
        }
        Capability::MoveValue => {
            if ctx.paused {
                return Err(ProtocolError::ProtocolPaused);
            }
            if ctx.emergency_mode {
                return Err(ProtocolError::EmergencyMode);
            }
            Ok(())
        }
        Capability::SteerPrice => {
            if ctx.paused {
                return Err(ProtocolError::ProtocolPaused);
            }
            Ok(())
        }
    }
}
