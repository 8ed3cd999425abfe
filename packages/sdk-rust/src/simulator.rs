//! Swap simulation: direction resolution, reserve update, price metrics.

use crate::error::{Error, Result};
use crate::math::{price_impact_pct, quote, PERCENT};
use crate::types::{Direction, PoolState, SwapResult};

/// Price a single swap of `amount_in` against `pool`.
///
/// Checks run in a fixed order: reserves, then the quote's own checks
/// (amount, fee), then feasibility. The output must land strictly inside
/// `(0, reserve_out)`: reaching the reserve (or NaN) is
/// [`Error::PoolDrained`], rounding to zero is [`Error::ZeroOutput`].
/// Nothing is clamped. Any derived value that leaves the finite range is
/// [`Error::MathOverflow`].
///
/// The pool is taken by reference and left untouched; use
/// [`PoolState::apply`] to carry the new reserves forward.
///
/// ```
/// use cpswap_sdk::{simulate, Direction, PoolState};
///
/// let pool = PoolState::new(10_000.0, 10_000.0, 0.003);
/// let r = simulate(&pool, Direction::AToB, 100.0).unwrap();
/// assert_eq!(r.new_reserve_a, 10_100.0);
/// assert!(r.slippage_percent > 0.0);
/// ```
pub fn simulate(pool: &PoolState, direction: Direction, amount_in: f64) -> Result<SwapResult> {
    pool.validate()?;

    let (reserve_in, reserve_out) = pool.reserves_for(direction);

    let amount_out = quote(amount_in, reserve_in, reserve_out, pool.fee)?;
    // Written as `!(x < r)` so NaN is rejected too.
    if !(amount_out < reserve_out) {
        return Err(Error::PoolDrained { amount_out, reserve_out });
    }
    if amount_out <= 0.0 {
        return Err(Error::ZeroOutput { amount_in });
    }

    let spot_price = pool.spot_price(direction);
    if !(spot_price > 0.0 && spot_price.is_finite()) {
        return Err(Error::MathOverflow("spot price"));
    }

    let (new_reserve_a, new_reserve_b) = match direction {
        Direction::AToB => (pool.reserve_a + amount_in, pool.reserve_b - amount_out),
        Direction::BToA => (pool.reserve_a - amount_out, pool.reserve_b + amount_in),
    };
    if !(new_reserve_a.is_finite() && new_reserve_b.is_finite()) {
        return Err(Error::MathOverflow("post-trade reserves"));
    }

    let effective_price = amount_out / amount_in;
    let slippage_percent = (spot_price - effective_price) / spot_price * PERCENT;
    if !slippage_percent.is_finite() {
        return Err(Error::MathOverflow("slippage"));
    }

    Ok(SwapResult {
        amount_out,
        new_reserve_a,
        new_reserve_b,
        effective_price,
        slippage_percent,
        spot_price,
        fee_paid: amount_in * pool.fee,
        price_impact_percent: price_impact_pct(amount_in, reserve_in, pool.fee),
    })
}

/// Price each amount independently against the same starting pool.
pub fn simulate_batch(
    pool: &PoolState,
    direction: Direction,
    amounts: &[f64],
) -> Vec<Result<SwapResult>> {
    amounts
        .iter()
        .map(|&amount_in| simulate(pool, direction, amount_in))
        .collect()
}
