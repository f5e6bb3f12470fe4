//! Slippage model: directional price penalty and the sources its rate is drawn from.
//!
//! A slippage rate lives in (0, 1] and says how favorable execution was; 1
//! means no slippage. Buyers pay `price × (2 − rate)`, sellers receive
//! `price × rate`.
//!
//! The rate draw is isolated behind [`SlippageRateSource`] so tests can pin it
//! with [`FixedSlippageRate`] and backtests can reproduce it with
//! [`SeededSlippage`].

use crate::domain::{AssetClass, CurrencyPair, Direction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Apply a slippage `rate` to `price` for an order in `direction`.
pub fn apply_slippage(direction: Direction, price: f64, rate: f64) -> f64 {
    match direction {
        Direction::Buy => price * (2.0 - rate),
        Direction::Sell => price * rate,
        Direction::DoNothing => price,
    }
}

/// Normalize configured bounds into a drawable range.
///
/// Bounds outside (0, 1] disable slippage; reversed bounds are swapped.
pub fn normalize_bounds(minimum: f64, maximum: f64) -> (f64, f64) {
    let valid = |r: f64| r > 0.0 && r <= 1.0;
    if !valid(minimum) || !valid(maximum) {
        return (1.0, 1.0);
    }
    if minimum > maximum {
        (maximum, minimum)
    } else {
        (minimum, maximum)
    }
}

/// Instrument a rate is drawn for.
#[derive(Debug, Clone, Copy)]
pub struct SlippageKey<'a> {
    pub exchange: &'a str,
    pub asset: AssetClass,
    pub pair: &'a CurrencyPair,
}

/// Source of slippage rates.
pub trait SlippageRateSource: Send + Sync {
    /// Draw a rate in `[minimum, maximum]` (after [`normalize_bounds`]).
    fn rate(&self, key: SlippageKey<'_>, minimum: f64, maximum: f64) -> f64;

    /// Name of this source
    fn name(&self) -> &str;
}

/// Always the same rate, ignoring the configured bounds.
#[derive(Debug, Clone, Copy)]
pub struct FixedSlippageRate(pub f64);

impl SlippageRateSource for FixedSlippageRate {
    fn rate(&self, _key: SlippageKey<'_>, _minimum: f64, _maximum: f64) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "FixedSlippageRate"
    }
}

fn draw(rng: &mut StdRng, minimum: f64, maximum: f64) -> f64 {
    let (minimum, maximum) = normalize_bounds(minimum, maximum);
    if minimum == maximum {
        return minimum;
    }
    rng.gen_range(minimum..=maximum)
}

/// Uniform draw from one shared generator.
#[derive(Debug)]
pub struct RandomSlippage {
    rng: Mutex<StdRng>,
}

impl RandomSlippage {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SlippageRateSource for RandomSlippage {
    fn rate(&self, _key: SlippageKey<'_>, minimum: f64, maximum: f64) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw(&mut rng, minimum, maximum)
    }

    fn name(&self) -> &str {
        "RandomSlippage"
    }
}

/// Reproducible draws with one generator per instrument.
///
/// Each (venue, asset, pair) gets a generator seeded from a BLAKE3 hash of the
/// master seed and the key, so the sequence an instrument sees does not depend
/// on how draws for other instruments interleave with it.
#[derive(Debug)]
pub struct SeededSlippage {
    master_seed: u64,
    streams: Mutex<HashMap<String, StdRng>>,
}

impl SeededSlippage {
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            streams: Mutex::new(HashMap::new()),
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Sub-seed for one instrument.
    pub fn sub_seed(&self, key: SlippageKey<'_>) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(key.exchange.to_lowercase().as_bytes());
        hasher.update(key.asset.as_str().as_bytes());
        hasher.update(key.pair.to_string().as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    fn stream_id(key: SlippageKey<'_>) -> String {
        format!("{}|{}|{}", key.exchange.to_lowercase(), key.asset, key.pair)
    }
}

impl SlippageRateSource for SeededSlippage {
    fn rate(&self, key: SlippageKey<'_>, minimum: f64, maximum: f64) -> f64 {
        let mut streams = self.streams.lock().unwrap_or_else(PoisonError::into_inner);
        let rng = streams
            .entry(Self::stream_id(key))
            .or_insert_with(|| StdRng::seed_from_u64(self.sub_seed(key)));
        draw(rng, minimum, maximum)
    }

    fn name(&self) -> &str {
        "SeededSlippage"
    }
}
