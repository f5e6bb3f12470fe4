//! Property tests for execution invariants.
//!
//! Uses proptest to verify:
//! 1. Candle fitting: price lands in range, notional never exceeds volume
//! 2. Portfolio cap: capped notional equals the ceiling, uncapped amounts are untouched
//! 3. Slippage: buys never improve, sells never improve, rate 1 is identity
//! 4. Fee: exactly notional × rate
//! 5. Venue limits: conformed amounts always pass the amount checks

use proptest::prelude::*;
use execsim_core::domain::{Direction, ExecutionLimits};
use execsim_core::execution::{
    apply_slippage, calculate_fee, cap_to_portfolio, fit_to_market, normalize_bounds,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (0.01..100_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_amount() -> impl Strategy<Value = f64> {
    0.000_1..1_000.0_f64
}

/// (high, low) with low <= high, both positive.
fn arb_range() -> impl Strategy<Value = (f64, f64)> {
    (arb_price(), 0.0..1.0_f64).prop_map(|(high, frac)| (high, (high * frac).max(0.01).min(high)))
}

fn arb_rate() -> impl Strategy<Value = f64> {
    0.000_1..=1.0_f64
}

// ── 1. Candle fitting ────────────────────────────────────────────────

proptest! {
    #[test]
    fn fitted_price_is_within_candle(
        price in arb_price(),
        amount in arb_amount(),
        (high, low) in arb_range(),
        volume in 0.0..1e9_f64,
    ) {
        let (fitted, _) = fit_to_market(price, amount, high, low, volume);
        prop_assert!(fitted >= low && fitted <= high);
        if price > high {
            prop_assert_eq!(fitted, high);
        }
        if price < low {
            prop_assert_eq!(fitted, low);
        }
    }

    #[test]
    fn fitted_notional_never_exceeds_volume(
        price in arb_price(),
        amount in arb_amount(),
        (high, low) in arb_range(),
        volume in 0.0..1e9_f64,
    ) {
        let (fitted_price, fitted_amount) = fit_to_market(price, amount, high, low, volume);
        if amount * fitted_price <= volume {
            prop_assert_eq!(fitted_amount, amount);
        } else {
            prop_assert!(fitted_amount * fitted_price <= volume);
            prop_assert!(fitted_amount <= amount);
        }
    }
}

// ── 2. Portfolio cap ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn capped_notional_matches_ceiling(
        price in arb_price(),
        amount in arb_amount(),
        total in 1.0..1e6_f64,
    ) {
        let capped = cap_to_portfolio(price, amount, total);
        if amount * price > total {
            let notional = capped * price;
            prop_assert!((notional - total).abs() <= total * 1e-12);
        } else {
            prop_assert_eq!(capped, amount);
        }
    }
}

// ── 3. Slippage ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn slippage_never_favors_the_trader(price in arb_price(), rate in arb_rate()) {
        prop_assert!(apply_slippage(Direction::Buy, price, rate) >= price);
        prop_assert!(apply_slippage(Direction::Sell, price, rate) <= price);
    }

    #[test]
    fn rate_one_is_identity(price in arb_price()) {
        prop_assert_eq!(apply_slippage(Direction::Buy, price, 1.0), price);
        prop_assert_eq!(apply_slippage(Direction::Sell, price, 1.0), price);
    }

    #[test]
    fn normalized_bounds_are_ordered_and_valid(min in -1.0..2.0_f64, max in -1.0..2.0_f64) {
        let (lo, hi) = normalize_bounds(min, max);
        prop_assert!(lo <= hi);
        prop_assert!(lo > 0.0 && hi <= 1.0);
    }
}

// ── 4. Fee ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn fee_is_notional_times_rate(
        price in arb_price(),
        amount in arb_amount(),
        rate in 0.0..0.1_f64,
    ) {
        prop_assert_eq!(calculate_fee(price, amount, rate), price * amount * rate);
        prop_assert!(calculate_fee(price, amount, rate) >= 0.0);
    }
}

// ── 5. Venue limits ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn conformed_amount_passes_amount_checks(
        amount in arb_amount(),
        minimum in 0.0..1.0_f64,
        maximum in 1.0..500.0_f64,
        step_exp in 0..4_i32,
    ) {
        let step = 10f64.powi(-step_exp);
        let limits = ExecutionLimits::new(minimum, maximum, step, 0.0);
        let conformed = limits.conform_amount(amount);
        prop_assert!(conformed <= amount + 1e-8);
        if conformed > 0.0 {
            prop_assert!(conformed <= maximum + 1e-9);
            prop_assert!(conformed >= minimum);
        }
    }
}
