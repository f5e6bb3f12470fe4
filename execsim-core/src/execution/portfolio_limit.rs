//! Portfolio limiter: cap an order's notional to the funds allocated to it.

/// Reduce `amount` so `amount × price` does not exceed `allocated_total`.
///
/// How the ceiling is derived (funds, leverage, side bounds) lives in
/// [`crate::settings::Settings::allocated_total`]; this only enforces it.
pub fn cap_to_portfolio(price: f64, amount: f64, allocated_total: f64) -> f64 {
    if amount * price > allocated_total {
        allocated_total / price
    } else {
        amount
    }
}
