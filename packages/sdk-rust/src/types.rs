//! Pool, request and result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::check_reserves;

// ─── Direction ────────────────────────────────────────────────────────────────

/// Which side of the pool is sold into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    /// Sell token A, receive token B.
    AToB,
    /// Sell token B, receive token A.
    BToA,
}

impl Direction {
    /// The opposite trade.
    pub fn reverse(self) -> Self {
        match self {
            Direction::AToB => Direction::BToA,
            Direction::BToA => Direction::AToB,
        }
    }

    /// Short token, `A2B` or `B2A`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::AToB => "A2B",
            Direction::BToA => "B2A",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Case-insensitive; accepts `A2B`/`B2A` and `A_TO_B`/`B_TO_A`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A2B" | "A_TO_B" => Ok(Direction::AToB),
            "B2A" | "B_TO_A" => Ok(Direction::BToA),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Pool ─────────────────────────────────────────────────────────────────────

/// Reserves and fee of a two-asset constant-product pool at one instant.
///
/// Fields are public and unchecked; [`crate::simulate`] validates them on
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    pub reserve_a: f64,
    pub reserve_b: f64,
    /// Proportional fee taken from the input side, in `[0, 1)`.
    pub fee:       f64,
}

impl PoolState {
    pub fn new(reserve_a: f64, reserve_b: f64, fee: f64) -> Self {
        Self { reserve_a, reserve_b, fee }
    }

    /// Both reserves strictly positive and finite. The fee is checked by the quote.
    pub fn validate(&self) -> Result<()> {
        check_reserves(self.reserve_a, self.reserve_b)
    }

    /// `(reserve_in, reserve_out)` for a trade in `direction`.
    pub fn reserves_for(&self, direction: Direction) -> (f64, f64) {
        match direction {
            Direction::AToB => (self.reserve_a, self.reserve_b),
            Direction::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Pre-trade marginal price in out-units per in-unit.
    pub fn spot_price(&self, direction: Direction) -> f64 {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        reserve_out / reserve_in
    }

    /// `k = reserve_a × reserve_b`.
    pub fn constant_product(&self) -> f64 {
        self.reserve_a * self.reserve_b
    }

    /// Pool after `result` settles, fee unchanged.
    pub fn apply(&self, result: &SwapResult) -> PoolState {
        PoolState {
            reserve_a: result.new_reserve_a,
            reserve_b: result.new_reserve_b,
            fee:       self.fee,
        }
    }
}

// ─── Request ──────────────────────────────────────────────────────────────────

/// One trade to price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub pool:      PoolState,
    pub direction: Direction,
    pub amount_in: f64,
}

impl SwapRequest {
    pub fn new(pool: PoolState, direction: Direction, amount_in: f64) -> Self {
        Self { pool, direction, amount_in }
    }

    /// Build a request from a raw direction token (`"a2b"`, `"B2A"`, …).
    pub fn parse(pool: PoolState, direction: &str, amount_in: f64) -> Result<Self> {
        Ok(Self::new(pool, direction.parse()?, amount_in))
    }

    pub fn simulate(&self) -> Result<SwapResult> {
        crate::simulator::simulate(&self.pool, self.direction, self.amount_in)
    }
}

// ─── Result ───────────────────────────────────────────────────────────────────

/// Outcome of one simulated swap.
///
/// Prices are in out-units per in-unit for the request's direction.
/// No rounding is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    /// Tokens the trader receives.
    pub amount_out:           f64,
    pub new_reserve_a:        f64,
    pub new_reserve_b:        f64,
    /// `amount_out / amount_in`.
    pub effective_price:      f64,
    /// `(spot − effective) / spot × 100`, unclamped.
    pub slippage_percent:     f64,
    /// Pre-trade spot price the slippage is measured against.
    pub spot_price:           f64,
    /// `amount_in × fee`, in input-token units.
    pub fee_paid:             f64,
    /// Slippage attributable to pool depth alone.
    pub price_impact_percent: f64,
}
