//! Property-based checks of the pricing invariants.

use cpswap_sdk::math::quote;
use cpswap_sdk::{simulate, Direction, Error, PoolState};
use proptest::prelude::*;

// Trades from 0.01% to 1000% of the input reserve keep every ratio well
// inside f64 resolution.
fn reserve() -> impl Strategy<Value = f64> {
    1.0f64..1e9
}

fn fraction() -> impl Strategy<Value = f64> {
    1e-4f64..10.0
}

fn fee() -> impl Strategy<Value = f64> {
    0.0f64..0.5
}

/// Any finite magnitude from about 1e-300 up to 1e308.
fn extreme() -> impl Strategy<Value = f64> {
    (1.0f64..10.0, -300i32..=307).prop_map(|(m, e)| m * 10f64.powi(e))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::AToB), Just(Direction::BToA)]
}

proptest! {
    #[test]
    fn quote_stays_below_reserve_out(
        r_in in reserve(), r_out in reserve(), frac in fraction(), fee in fee(),
    ) {
        let out = quote(r_in * frac, r_in, r_out, fee).unwrap();
        prop_assert!(out > 0.0);
        prop_assert!(out < r_out);
    }

    #[test]
    fn quote_increases_with_amount(
        r_in in reserve(), r_out in reserve(), frac in fraction(), fee in fee(),
    ) {
        let x = r_in * frac;
        let small = quote(x, r_in, r_out, fee).unwrap();
        let large = quote(x * 1.5, r_in, r_out, fee).unwrap();
        prop_assert!(large > small);
    }

    #[test]
    fn quote_increases_with_reserve_out(
        r_in in reserve(), r_out in reserve(), frac in fraction(), fee in fee(),
    ) {
        let x = r_in * frac;
        let shallow = quote(x, r_in, r_out, fee).unwrap();
        let deep = quote(x, r_in, r_out * 2.0, fee).unwrap();
        prop_assert!(deep > shallow);
    }

    #[test]
    fn higher_fee_never_pays_more(
        r_in in reserve(), r_out in reserve(), frac in fraction(),
        fee1 in fee(), bump in 1e-3f64..0.4,
    ) {
        let x = r_in * frac;
        let fee2 = fee1 + bump;
        prop_assert!(quote(x, r_in, r_out, fee1).unwrap() >= quote(x, r_in, r_out, fee2).unwrap());
    }

    #[test]
    fn zero_fee_preserves_product(r_in in reserve(), r_out in reserve(), frac in fraction()) {
        let x = r_in * frac;
        let out = quote(x, r_in, r_out, 0.0).unwrap();
        let k0 = r_in * r_out;
        let k1 = (r_in + x) * (r_out - out);
        prop_assert!(((k1 - k0) / k0).abs() < 1e-9);
    }

    #[test]
    fn product_never_shrinks(
        ra in reserve(), rb in reserve(), frac in fraction(),
        fee in 0.001f64..0.5, dir in direction(),
    ) {
        let pool = PoolState::new(ra, rb, fee);
        let (r_in, _) = pool.reserves_for(dir);
        let r = simulate(&pool, dir, r_in * frac).unwrap();
        prop_assert!(pool.apply(&r).constant_product() > pool.constant_product());
    }

    #[test]
    fn exactly_one_reserve_grows(
        ra in reserve(), rb in reserve(), frac in fraction(), fee in fee(), dir in direction(),
    ) {
        let pool = PoolState::new(ra, rb, fee);
        let (r_in, _) = pool.reserves_for(dir);
        let x = r_in * frac;
        let r = simulate(&pool, dir, x).unwrap();
        match dir {
            Direction::AToB => {
                prop_assert_eq!(r.new_reserve_a, ra + x);
                prop_assert_eq!(r.new_reserve_b, rb - r.amount_out);
            }
            Direction::BToA => {
                prop_assert_eq!(r.new_reserve_a, ra - r.amount_out);
                prop_assert_eq!(r.new_reserve_b, rb + x);
            }
        }
    }

    #[test]
    fn slippage_is_non_negative(
        ra in reserve(), rb in reserve(), frac in fraction(), fee in fee(), dir in direction(),
    ) {
        let pool = PoolState::new(ra, rb, fee);
        let (r_in, _) = pool.reserves_for(dir);
        let r = simulate(&pool, dir, r_in * frac).unwrap();
        prop_assert!(r.slippage_percent >= -1e-9, "{}", r.slippage_percent);
        prop_assert!(r.slippage_percent < 100.0);
        prop_assert!(r.effective_price <= r.spot_price * (1.0 + 1e-12));
    }

    #[test]
    fn direction_case_does_not_matter(
        ra in reserve(), rb in reserve(), frac in fraction(), fee in fee(),
    ) {
        let pool = PoolState::new(ra, rb, fee);
        let x = ra * frac;
        let upper = simulate(&pool, "A2B".parse().unwrap(), x).unwrap();
        let lower = simulate(&pool, "a2b".parse().unwrap(), x).unwrap();
        prop_assert_eq!(upper, lower);
    }

    #[test]
    fn fee_of_one_or_more_is_rejected(
        ra in reserve(), rb in reserve(), x in 0.0f64..1e6, fee in 1.0f64..10.0, dir in direction(),
    ) {
        // A non-positive amount would be reported first.
        prop_assume!(x > 0.0);
        let pool = PoolState::new(ra, rb, fee);
        prop_assert_eq!(simulate(&pool, dir, x), Err(Error::InvalidFee(fee)));
    }

    #[test]
    fn extreme_inputs_are_rejected_or_well_formed(
        ra in extreme(), rb in extreme(), x in extreme(), fee in 0.0f64..0.99, dir in direction(),
    ) {
        let pool = PoolState::new(ra, rb, fee);
        let (_, r_out) = pool.reserves_for(dir);
        if let Ok(r) = simulate(&pool, dir, x) {
            prop_assert!(r.amount_out > 0.0 && r.amount_out < r_out, "{r:?}");
            for v in [
                r.amount_out, r.new_reserve_a, r.new_reserve_b, r.effective_price,
                r.slippage_percent, r.spot_price, r.fee_paid, r.price_impact_percent,
            ] {
                prop_assert!(v.is_finite(), "{r:?}");
            }
        }
    }
}

#[test]
fn boundary_magnitudes_never_yield_bad_output() {
    let tiny = 1e-300;
    let huge = 1.7e308;
    for &ra in &[tiny, 1.0, 1e300, huge] {
        for &rb in &[tiny, 1.0, 1e300, huge] {
            for &x in &[tiny, 1.0, 1e300, huge] {
                for dir in [Direction::AToB, Direction::BToA] {
                    let pool = PoolState::new(ra, rb, 0.0);
                    let (_, r_out) = pool.reserves_for(dir);
                    if let Ok(r) = simulate(&pool, dir, x) {
                        assert!(r.amount_out > 0.0 && r.amount_out < r_out, "{pool:?} {x} {r:?}");
                        assert!(r.slippage_percent.is_finite(), "{pool:?} {x} {r:?}");
                        assert!(r.new_reserve_a.is_finite() && r.new_reserve_b.is_finite());
                    }
                }
            }
        }
    }
}
