//! # Protocol Economic Constants
//!
//! Single source of truth for the DEMOCOIN economic parameters. The
//! engine reads these through `ProtocolConfig::default()`; tests may
//! construct configs with different values, but a deployed engine never
//! changes them after construction.
//!
//! All ratio values are either percent (`*_PERCENT`, out of 100) or
//! basis points (`*_BPS`, out of 10 000).

// ════════════════════════════════════════════════════════════════════════════
// FIXED-POINT UNITS
// ════════════════════════════════════════════════════════════════════════════

/// One whole token in 18-decimal fixed point.
pub const ONE: u128 = 1_000_000_000_000_000_000;

/// Basis-points denominator (10 000 = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Percent denominator.
pub const PERCENT_DENOMINATOR: u128 = 100;

// ════════════════════════════════════════════════════════════════════════════
// SUPPLY
// ════════════════════════════════════════════════════════════════════════════

/// Hard supply cap: 21 000 000 tokens.
pub const MAX_SUPPLY: u128 = 21_000_000 * ONE;

// ════════════════════════════════════════════════════════════════════════════
// STABLE POOL
// ════════════════════════════════════════════════════════════════════════════

/// Deposit and withdrawal fee: 10 bps = 0.1% of the moved amount.
pub const POOL_FEE_BPS: u128 = 10;

/// Advertised stable-pool APY, integer percent.
pub const STABLE_POOL_APY_PERCENT: u64 = 8;

// ════════════════════════════════════════════════════════════════════════════
// FEE DISTRIBUTION
// ════════════════════════════════════════════════════════════════════════════
//
// Collected fees are split across three reserve funds. The percentages
// must sum to exactly 100; the insurance fund absorbs the integer
// remainder of the split.

/// Insurance fund share of collected fees (40%).
pub const FUND_INSURANCE_PERCENT: u128 = 40;

/// Development fund share of collected fees (30%).
pub const FUND_DEVELOPMENT_PERCENT: u128 = 30;

/// Marketing fund share of collected fees (30%).
pub const FUND_MARKETING_PERCENT: u128 = 30;

/// Total fund split. MUST always equal 100.
pub const FUND_TOTAL_PERCENT: u128 = 100;

// ════════════════════════════════════════════════════════════════════════════
// MINING
// ════════════════════════════════════════════════════════════════════════════

/// Hash power credited per accepted proof.
pub const HASH_POWER_PER_PROOF: u128 = 10;

/// Lowest accepted difficulty.
pub const DIFFICULTY_MIN: u8 = 1;

/// Highest accepted difficulty.
pub const DIFFICULTY_MAX: u8 = 100;

/// Difficulty at genesis.
pub const DEFAULT_DIFFICULTY: u8 = 10;

/// Seconds a miner must wait between accepted submissions.
pub const DEFAULT_PROOF_COOLDOWN_SECS: u64 = 60;

/// Network-wide mining reward budget per hour: 50 tokens, divided
/// among miners by hash-power share and scaled by unclaimed time.
pub const BASE_REWARD_PER_HOUR: u128 = 50 * ONE;

pub const SECS_PER_HOUR: u64 = 3_600;

// ════════════════════════════════════════════════════════════════════════════
// PRICE CONTROLLER
// ════════════════════════════════════════════════════════════════════════════

/// The peg: 1.0 unit in 18-decimal fixed point.
pub const TARGET_PRICE: u128 = ONE;

/// A single price update may never leave `[0, ceiling]` where
/// `ceiling = PRICE_CEILING_MULTIPLIER * target`.
pub const PRICE_CEILING_MULTIPLIER: u128 = 2;

/// Minimum seconds between price updates.
pub const PRICE_UPDATE_INTERVAL_SECS: u64 = 3_600;

// ════════════════════════════════════════════════════════════════════════════
// COLLATERAL
// ════════════════════════════════════════════════════════════════════════════

/// Over-collateralization requirement: borrow capacity is
/// `collateral * 100 / 150`, i.e. two-thirds of deposited collateral.
pub const COLLATERAL_FACTOR_PERCENT: u128 = 150;

// ════════════════════════════════════════════════════════════════════════════
// FUNCTIONS
// ════════════════════════════════════════════════════════════════════════════

/// Seconds left until a window of `interval_secs` starting at `since`
/// has elapsed, as seen at `now`.
///
/// Returns `0` once the window has passed. A `now` before `since`
/// reports the full remaining window (conservative). Saturating; never
/// panics.
#[must_use]
#[inline]
pub const fn window_remaining(since: u64, interval_secs: u64, now: u64) -> u64 {
    let end = since.saturating_add(interval_secs);
    end.saturating_sub(now)
}
