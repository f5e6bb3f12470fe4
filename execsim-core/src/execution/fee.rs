//! Trading fee.

/// Fee charged on `amount` traded at `price`: notional × `rate`.
///
/// Which rate applies (exchange, maker, taker) is the caller's decision.
pub fn calculate_fee(price: f64, amount: f64, rate: f64) -> f64 {
    price * amount * rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_is_notional_times_rate() {
        assert_eq!(calculate_fee(1.0, 1.0, 0.1), 0.1);
        assert_eq!(calculate_fee(2.0, 1.0, 0.005), 0.01);
    }

    #[test]
    fn zero_rate_is_free() {
        assert_eq!(calculate_fee(1337.0, 4.2, 0.0), 0.0);
    }
}
