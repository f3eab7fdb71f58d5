//! The trigonometric hash every synthetic figure is drawn from.
//!
//! Other implementations (the original web front end among them) compute the
//! same values independently, so the formula must stay bit-for-bit identical:
//! `frac(sin(seed) * 10000)` in IEEE-754 double precision. Do not swap it for
//! a "better" generator.

/// Map a seed to a value in `[0, 1)`.
pub fn seeded_value(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}

/// Round a monetary value to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
