//! Constant-product quote math.
//!
//! Plain `f64` arithmetic throughout. This is a pricing simulator, not a
//! ledger: results are not suitable for integer on-chain accounting.

use crate::error::{Error, Result};

// ─── Constants ────────────────────────────────────────────────────────────────

/// Ratio → percent.
pub const PERCENT: f64 = 100.0;

// ─── Validation ───────────────────────────────────────────────────────────────

pub(crate) fn check_amount(amount_in: f64) -> Result<()> {
    if amount_in > 0.0 && amount_in.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidAmount(amount_in))
    }
}

pub(crate) fn check_reserves(first: f64, second: f64) -> Result<()> {
    let ok = |r: f64| r > 0.0 && r.is_finite();
    if ok(first) && ok(second) {
        Ok(())
    } else {
        Err(Error::InvalidPool(first, second))
    }
}

pub(crate) fn check_fee(fee: f64) -> Result<()> {
    // NaN falls outside the range as well.
    if (0.0..1.0).contains(&fee) {
        Ok(())
    } else {
        Err(Error::InvalidFee(fee))
    }
}

// ─── Quote ────────────────────────────────────────────────────────────────────

/// Portion of `amount_in` that moves the curve once the fee is taken.
pub fn amount_in_after_fee(amount_in: f64, fee: f64) -> f64 {
    amount_in * (1.0 - fee)
}

/// Output amount for selling `amount_in` into a constant-product pool.
///
/// ```text
/// after_fee  = amount_in × (1 − fee)
/// amount_out = after_fee × reserve_out / (reserve_in + after_fee)
/// ```
///
/// Preconditions are checked in order (amount, reserves, fee) and each
/// maps to its own [`Error`] variant. The result is strictly concave in
/// `amount_in` and tends to `reserve_out` without reaching it in exact
/// arithmetic; callers that need the strict bound under rounding must
/// check it themselves (see [`crate::simulate`]).
///
/// ```
/// let out = cpswap_sdk::math::quote(100.0, 10_000.0, 10_000.0, 0.003).unwrap();
/// assert!((out - 98.715803).abs() < 1e-5);
/// ```
pub fn quote(amount_in: f64, reserve_in: f64, reserve_out: f64, fee: f64) -> Result<f64> {
    check_amount(amount_in)?;
    check_reserves(reserve_in, reserve_out)?;
    check_fee(fee)?;

    let after_fee = amount_in_after_fee(amount_in, fee);
    Ok((after_fee * reserve_out) / (reserve_in + after_fee))
}

/// Fee-independent share of slippage, in percent.
///
/// `after_fee / (reserve_in + after_fee) × 100`: how far the trade itself
/// pushes the marginal price, ignoring what the fee takes off the top.
pub fn price_impact_pct(amount_in: f64, reserve_in: f64, fee: f64) -> f64 {
    let after_fee = amount_in_after_fee(amount_in, fee);
    after_fee / (reserve_in + after_fee) * PERCENT
}
