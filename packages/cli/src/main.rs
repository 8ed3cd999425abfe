use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cpswap_sdk::{Direction, PoolState, SwapRequest, SwapResult};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ─── Demo constants ───────────────────────────────────────────────────────────

const DEMO_RESERVE_A: f64 = 10_000.0;
const DEMO_RESERVE_B: f64 = 10_000.0;
/// 0.3%
const DEMO_FEE: f64 = 0.003;
const DEMO_DIRECTION: Direction = Direction::AToB;

/// `(name, share of reserve A)` for each demo trade.
const DEMO_SIZES: &[(&str, f64)] = &[
    ("small",  0.01),
    ("medium", 0.10),
    ("large",  0.40),
];

const CONCLUSIONS: &[&str] = &[
    "Slippage grows non-linearly with trade size (big trades move reserves a lot).",
    "Effective price is always worse than spot because of fee + price impact.",
    "Larger pools (more liquidity) mean smaller slippage for the same amountIn.",
];

/// Width of the demo table rule.
const TABLE_WIDTH: usize = 100;

// ─── CLI definition ───────────────────────────────────────────────────────────

/// cpswap — price one swap against a constant-product (x·y=k) pool.
///
/// Run without arguments (or with --demo) for a three-trade demonstration.
/// Pool parameters can also be set via environment variables:
///   CPSWAP_RESERVE_A, CPSWAP_RESERVE_B, CPSWAP_FEE, CPSWAP_DIRECTION
#[derive(Parser, Debug)]
#[command(
    name         = "cpswap",
    version      = env!("CARGO_PKG_VERSION"),
    long_version = concat!(
        env!("CARGO_PKG_VERSION"), "\n",
        "Model:     constant product, fee deducted from amountIn\n",
        "Precision: IEEE-754 double (pricing simulator, not a ledger)\n",
        "License:   MIT",
    ),
    about = "Price a single swap against a constant-product liquidity pool.",
    after_help = "\
EXAMPLES:
  # Three-scenario demo (also the default with no arguments)
  cpswap --demo

  # Sell 100 A into a 10k/10k pool with a 0.3% fee
  cpswap --reserve-a 10000 --reserve-b 10000 --fee 0.003 --direction A2B --amount-in 100

  # Same trade, machine-readable
  cpswap --reserveA 10000 --reserveB 10000 --fee 0.003 --direction a2b --amountIn 100 --json

ENVIRONMENT:
  CPSWAP_RESERVE_A   Reserve of token A
  CPSWAP_RESERVE_B   Reserve of token B
  CPSWAP_FEE         Fee rate in [0, 1)
  CPSWAP_DIRECTION   A2B or B2A
  RUST_LOG           Log filter for stderr diagnostics  [default: warn]

FORMULA:
  after_fee  = amountIn × (1 − fee)
  amountOut  = after_fee × reserveOut / (reserveIn + after_fee)
  slippage % = (spot − amountOut/amountIn) / spot × 100"
)]
struct Cli {
    /// Reserve of token A before the trade (> 0)
    #[arg(long = "reserve-a", alias = "reserveA", value_name = "NUM",
          env = "CPSWAP_RESERVE_A", value_parser = parse_number)]
    reserve_a: Option<f64>,

    /// Reserve of token B before the trade (> 0)
    #[arg(long = "reserve-b", alias = "reserveB", value_name = "NUM",
          env = "CPSWAP_RESERVE_B", value_parser = parse_number)]
    reserve_b: Option<f64>,

    /// Proportional fee taken from amountIn, in [0, 1). 0.003 = 0.3%
    #[arg(long, value_name = "NUM", env = "CPSWAP_FEE", value_parser = parse_number)]
    fee: Option<f64>,

    /// Trade direction: A2B (sell A for B) or B2A (sell B for A), any case
    #[arg(long, value_name = "A2B|B2A", env = "CPSWAP_DIRECTION")]
    direction: Option<String>,

    /// Amount of the input token to sell (> 0)
    #[arg(long = "amount-in", alias = "amountIn", value_name = "NUM", value_parser = parse_number)]
    amount_in: Option<f64>,

    /// Run the three-scenario demo; other swap flags are ignored
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Whole-string decimal parse; rejects trailing junk, NaN and infinities.
fn parse_number(s: &str) -> std::result::Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("invalid number '{s}'"))?;
    if !v.is_finite() {
        return Err(format!("number must be finite, got '{s}'"));
    }
    Ok(v)
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    init_tracing();

    // No arguments at all: run the demo.
    let cli = if std::env::args().len() == 1 {
        None
    } else {
        Some(Cli::parse())
    };
    let json_output = cli.as_ref().is_some_and(|c| c.json);

    let outcome = match &cli {
        None => cmd_demo(false),
        Some(c) if c.demo => cmd_demo(c.json),
        Some(c) => cmd_simulate(c),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json_output {
                println!("{}", json!({
                    "status":  "error",
                    "code":    error_code(&e),
                    "message": format!("{e:#}"),
                }));
            }
            eprintln!("Error: {e:#}");
            eprintln!("Run with --help for usage.");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Core rejection kind, or `invalid_argument` for presentation-layer failures.
fn error_code(e: &anyhow::Error) -> &'static str {
    e.downcast_ref::<cpswap_sdk::Error>()
        .map(cpswap_sdk::Error::code)
        .unwrap_or("invalid_argument")
}

/// Price one request, logging it at debug level.
fn price(req: &SwapRequest) -> Result<SwapResult> {
    debug!(
        reserve_a = req.pool.reserve_a,
        reserve_b = req.pool.reserve_b,
        fee       = req.pool.fee,
        direction = %req.direction,
        amount_in = req.amount_in,
        "simulating swap"
    );
    req.simulate().map_err(|e| {
        debug!(code = e.code(), "swap rejected: {e}");
        anyhow::Error::new(e)
    })
}

// ─── demo ─────────────────────────────────────────────────────────────────────

struct Scenario {
    name:      &'static str,
    direction: Direction,
    amount_in: f64,
}

fn demo_pool() -> PoolState {
    PoolState::new(DEMO_RESERVE_A, DEMO_RESERVE_B, DEMO_FEE)
}

fn demo_scenarios(pool: &PoolState) -> Vec<Scenario> {
    DEMO_SIZES
        .iter()
        .map(|&(name, share)| Scenario {
            name,
            direction: DEMO_DIRECTION,
            amount_in: pool.reserve_a * share,
        })
        .collect()
}

/// Each scenario is priced against the same starting pool.
fn run_demo() -> Result<(PoolState, Vec<(Scenario, SwapResult)>)> {
    let pool = demo_pool();
    let mut rows = Vec::new();
    for s in demo_scenarios(&pool) {
        let r = price(&SwapRequest::new(pool, s.direction, s.amount_in))
            .with_context(|| format!("demo scenario '{}'", s.name))?;
        rows.push((s, r));
    }
    Ok((pool, rows))
}

fn cmd_demo(json_output: bool) -> Result<()> {
    let (pool, rows) = run_demo()?;

    if json_output {
        let scenarios: Vec<_> = rows.iter().map(|(s, r)| json!({
            "name":      s.name,
            "direction": s.direction,
            "amount_in": s.amount_in,
            "result":    r,
        })).collect();
        println!("{}", json!({
            "status":      "ok",
            "command":     "demo",
            "pool":        pool,
            "scenarios":   scenarios,
            "conclusions": CONCLUSIONS,
        }));
    } else {
        println!(
            "Demo: reserveA={}, reserveB={}, fee={}, direction={}",
            pool.reserve_a, pool.reserve_b, pool.fee, DEMO_DIRECTION
        );
        println!();
        println!("{}", table_header());
        println!("{}", "-".repeat(TABLE_WIDTH));
        for (s, r) in &rows {
            println!("{}", table_row(s, r));
        }
        println!();
        println!("Conclusions:");
        for line in CONCLUSIONS {
            println!("- {line}");
        }
    }
    Ok(())
}

fn table_header() -> String {
    format!(
        "{:<10}{:<6}{:>12}{:>14}{:>14}{:>14}{:>16}{:>14}",
        "Scenario", "Dir", "amountIn", "amountOut", "newResA", "newResB", "effPrice", "slip(%)"
    )
}

fn table_row(s: &Scenario, r: &SwapResult) -> String {
    format!(
        "{:<10}{:<6}{:>12.6}{:>14.6}{:>14.6}{:>14.6}{:>16.8}{:>14.6}",
        s.name,
        s.direction.as_str(),
        s.amount_in,
        r.amount_out,
        r.new_reserve_a,
        r.new_reserve_b,
        r.effective_price,
        r.slippage_percent,
    )
}

// ─── simulate ─────────────────────────────────────────────────────────────────

/// Assemble a request from flags; every swap flag is required here.
fn request_from(cli: &Cli) -> Result<SwapRequest> {
    let reserve_a = cli.reserve_a.ok_or_else(|| missing("--reserve-a"))?;
    let reserve_b = cli.reserve_b.ok_or_else(|| missing("--reserve-b"))?;
    let fee       = cli.fee.ok_or_else(|| missing("--fee"))?;
    let direction = cli.direction.as_deref().ok_or_else(|| missing("--direction"))?;
    let amount_in = cli.amount_in.ok_or_else(|| missing("--amount-in"))?;

    // Reserves are reported before a bad direction token.
    let pool = PoolState::new(reserve_a, reserve_b, fee);
    pool.validate()?;
    Ok(SwapRequest::parse(pool, direction, amount_in)?)
}

fn missing(flag: &str) -> anyhow::Error {
    anyhow!("Missing value for {flag}")
}

fn cmd_simulate(cli: &Cli) -> Result<()> {
    let req = request_from(cli)?;
    let r = price(&req)?;

    if cli.json {
        println!("{}", json!({
            "status":    "ok",
            "command":   "simulate",
            "pool":      req.pool,
            "direction": req.direction,
            "amount_in": req.amount_in,
            "result":    r,
        }));
    } else {
        print!("{}", single_report(&r));
    }
    Ok(())
}

fn single_report(r: &SwapResult) -> String {
    format!(
        "amountOut       = {:.10}\n\
         new reserveA    = {:.10}\n\
         new reserveB    = {:.10}\n\
         effective price = {:.10}\n\
         slippage (%)    = {:.6}\n",
        r.amount_out, r.new_reserve_a, r.new_reserve_b, r.effective_price, r.slippage_percent,
    )
}
