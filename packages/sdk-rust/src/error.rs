//! SDK error type.

/// All errors returned by the swap pricing engine.
///
/// Every variant is a rejected input: nothing is retried, clamped or
/// partially applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    // ── Pool ─────────────────────────────────────────────────────────────────
    /// One or both reserves are zero, negative, or not a finite number.
    #[error("reserves must be > 0 (got {0} and {1})")]
    InvalidPool(f64, f64),

    /// Fee rate outside `[0, 1)`.
    #[error("fee must be in [0, 1) (got {0})")]
    InvalidFee(f64),

    // ── Request ──────────────────────────────────────────────────────────────
    /// Non-positive or non-finite input amount.
    #[error("amountIn must be > 0 (got {0})")]
    InvalidAmount(f64),

    /// Direction token did not match `A2B` / `B2A` after case folding.
    #[error("direction must be A2B or B2A (got '{0}')")]
    InvalidDirection(String),

    // ── Feasibility ──────────────────────────────────────────────────────────
    /// Inputs are individually valid but the output would empty the
    /// opposing reserve, or could not be computed at all (NaN).
    #[error("amountOut would drain the pool (amountOut={amount_out}, reserveOut={reserve_out})")]
    PoolDrained { amount_out: f64, reserve_out: f64 },

    /// The trade is too small to move any output at this precision.
    #[error("amountOut rounds to zero for amountIn={amount_in}")]
    ZeroOutput { amount_in: f64 },

    // ── Arithmetic ───────────────────────────────────────────────────────────
    /// A post-trade reserve or price left the finite `f64` range.
    #[error("Floating-point overflow in swap math: {0}")]
    MathOverflow(&'static str),
}

impl Error {
    /// Stable snake-case identifier for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidPool(..)      => "invalid_pool",
            Error::InvalidFee(_)        => "invalid_fee",
            Error::InvalidAmount(_)     => "invalid_amount",
            Error::InvalidDirection(_)  => "invalid_direction",
            Error::PoolDrained { .. }   => "pool_drained",
            Error::ZeroOutput { .. }    => "zero_output",
            Error::MathOverflow(_)      => "math_overflow",
        }
    }
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
