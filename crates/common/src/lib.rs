//! # DEMOCOIN Common Crate
//!
//! Shared value types and pure protocol logic, consumed by the engine
//! crate and by embedding clients (RPC layers, test harnesses).
//!
//! ## Modules
//! - `types`: `Address` and `Digest` newtypes with hex serde
//! - `constants`: protocol economic constants (single source of truth)
//! - `error`: `ProtocolError`, the public error contract
//! - `proof`: proof-of-work verification against a difficulty threshold
//! - `gate`: roles, capabilities, and the uniform authorization check
//! - `config`: `ProtocolConfig`, the per-engine parameter set
//!
//! Everything in this crate is a value type or a pure function: no
//! mutable state, no clocks, no I/O. Time-dependent checks take a
//! caller-provided timestamp.

pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod proof;
pub mod types;

pub use config::ProtocolConfig;
pub use error::ProtocolError;
pub use gate::{authorize, Capability, GateContext, Role};
pub use proof::{compute_solution, difficulty_threshold, verify_proof, Proof};
pub use types::{Address, Digest};
