//! # Engine Configuration
//!
//! Every tunable protocol parameter lives in one explicit structure,
//! owned by the engine at construction. Tests build independent engines
//! with distinct parameter sets; a deployed engine never mutates its
//! config (difficulty and cooldown, the two admin-tunable values, are
//! copied into state at genesis and adjusted there).

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_REWARD_PER_HOUR, BPS_DENOMINATOR, COLLATERAL_FACTOR_PERCENT, DEFAULT_DIFFICULTY,
    DEFAULT_PROOF_COOLDOWN_SECS, DIFFICULTY_MAX, DIFFICULTY_MIN, FUND_DEVELOPMENT_PERCENT,
    FUND_INSURANCE_PERCENT, FUND_MARKETING_PERCENT, FUND_TOTAL_PERCENT, HASH_POWER_PER_PROOF,
    MAX_SUPPLY, POOL_FEE_BPS, PRICE_CEILING_MULTIPLIER, PRICE_UPDATE_INTERVAL_SECS,
    STABLE_POOL_APY_PERCENT, TARGET_PRICE,
};

/// Protocol parameters, fixed per engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Hard supply cap in smallest units.
    pub max_supply: u128,
    /// Stable-pool deposit/withdrawal fee, basis points of the amount.
    pub pool_fee_bps: u128,
    /// Insurance fund share of collected fees, percent.
    pub insurance_percent: u128,
    /// Development fund share of collected fees, percent.
    pub development_percent: u128,
    /// Marketing fund share of collected fees, percent.
    pub marketing_percent: u128,
    /// Hash power credited per accepted proof.
    pub hash_power_per_proof: u128,
    /// Difficulty at genesis; admin-tunable afterwards within
    /// `[DIFFICULTY_MIN, DIFFICULTY_MAX]`.
    pub initial_difficulty: u8,
    /// Seconds between accepted submissions per miner at genesis.
    pub proof_cooldown_secs: u64,
    /// Network-wide reward budget per hour, smallest units.
    pub base_reward_per_hour: u128,
    /// Minimum seconds between price-controller runs.
    pub price_update_interval_secs: u64,
    /// The peg the price controller steers toward.
    pub target_price: u128,
    /// Over-collateralization requirement, percent (150 = borrow up to
    /// two-thirds of collateral).
    pub collateral_factor_percent: u128,
    /// Advertised stable-pool APY, integer percent.
    pub stable_pool_apy_percent: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_supply: MAX_SUPPLY,
            pool_fee_bps: POOL_FEE_BPS,
            insurance_percent: FUND_INSURANCE_PERCENT,
            development_percent: FUND_DEVELOPMENT_PERCENT,
            marketing_percent: FUND_MARKETING_PERCENT,
            hash_power_per_proof: HASH_POWER_PER_PROOF,
            initial_difficulty: DEFAULT_DIFFICULTY,
            proof_cooldown_secs: DEFAULT_PROOF_COOLDOWN_SECS,
            base_reward_per_hour: BASE_REWARD_PER_HOUR,
            price_update_interval_secs: PRICE_UPDATE_INTERVAL_SECS,
            target_price: TARGET_PRICE,
            collateral_factor_percent: COLLATERAL_FACTOR_PERCENT,
            stable_pool_apy_percent: STABLE_POOL_APY_PERCENT,
        }
    }
}

impl ProtocolConfig {
    /// Checks internal consistency. Returns a human-readable reason on
    /// the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_supply == 0 {
            return Err("max_supply must be non-zero".to_string());
        }
        if self.pool_fee_bps > BPS_DENOMINATOR {
            return Err(format!(
                "pool_fee_bps {} exceeds 100% ({})",
                self.pool_fee_bps, BPS_DENOMINATOR
            ));
        }
        let split = self.insurance_percent + self.development_percent + self.marketing_percent;
        if split != FUND_TOTAL_PERCENT {
            return Err(format!("fund split sums to {}, expected {}", split, FUND_TOTAL_PERCENT));
        }
        if self.initial_difficulty < DIFFICULTY_MIN || self.initial_difficulty > DIFFICULTY_MAX {
            return Err(format!(
                "initial_difficulty {} outside [{}, {}]",
                self.initial_difficulty, DIFFICULTY_MIN, DIFFICULTY_MAX
            ));
        }
        if self.hash_power_per_proof == 0 {
            return Err("hash_power_per_proof must be non-zero".to_string());
        }
        if self.base_reward_per_hour == 0 {
            return Err("base_reward_per_hour must be non-zero".to_string());
        }
        if self.target_price == 0 {
            return Err("target_price must be non-zero".to_string());
        }
        if self.collateral_factor_percent < 100 {
            return Err(format!(
                "collateral_factor_percent {} would allow under-collateralized borrowing",
                self.collateral_factor_percent
            ));
        }
        Ok(())
    }

    /// Upper price bound a single controller run may reach.
    #[must_use]
    #[inline]
    pub fn price_ceiling(&self) -> u128 {
        self.target_price.saturating_mul(PRICE_CEILING_MULTIPLIER)
    }
}
