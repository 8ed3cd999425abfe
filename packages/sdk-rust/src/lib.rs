//! cpswap Rust SDK
//!
//! Swap pricing for a two-asset constant-product (`x·y=k`) pool.
//! Give it reserves, a fee, a direction and an input amount; get back the
//! output amount, post-trade reserves, effective price and slippage.
//! Pure functions only: no state between calls, no I/O, safe to call from
//! any number of threads.
//!
//! # Quick Start
//!
//! ```rust
//! use cpswap_sdk::{PoolState, SwapRequest};
//!
//! fn main() -> Result<(), cpswap_sdk::Error> {
//!     let pool = PoolState::new(10_000.0, 10_000.0, 0.003); // 0.3% fee
//!
//!     let result = SwapRequest::parse(pool, "a2b", 100.0)?.simulate()?;
//!     println!(
//!         "out: {:.6}  price: {:.8}  slippage: {:.6}%",
//!         result.amount_out, result.effective_price, result.slippage_percent,
//!     );
//!
//!     // Carry the new reserves into the next trade.
//!     let next = pool.apply(&result);
//!     assert!(next.constant_product() > pool.constant_product());
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`math::quote`] | Output amount for a given input, fee deducted first |
//! | [`simulate`] | Full swap: reserves, effective price, slippage |
//! | [`simulate_batch`] | Several independent sizes against one pool |
//! | [`PoolState::apply`] | Post-trade pool for chaining swaps |
//!
//! All arithmetic is `f64`. This models prices; it is not an integer ledger.

pub mod error;
pub mod math;
pub mod simulator;
pub mod types;

pub use error::{Error, Result};
pub use simulator::{simulate, simulate_batch};
pub use types::*;
