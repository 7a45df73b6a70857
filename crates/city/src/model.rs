//! Deterministic house price surface.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::CityParams;

/// Odd multiplier used to spread the x key before mixing in y.
const KEY_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Stateless pseudo-random value in `[0, 1)` keyed on a location.
///
/// The same `(x, y)` always yields the same value regardless of what was
/// evaluated before. Positive and negative zero map to the same key.
pub fn coordinate_noise(x: f64, y: f64) -> f64 {
    let kx = (x + 0.0).to_bits();
    let ky = (y + 0.0).to_bits();
    let key = kx.wrapping_mul(KEY_MIX) ^ ky.rotate_left(32);
    StdRng::seed_from_u64(key).random::<f64>()
}

/// Price of a unit at `(x, y)` on `floor` (1 is the ground floor).
///
/// The ground-floor price is the larger of `base_price` and the strongest
/// center influence `peak_price * exp(-distance_decay * (d / influence_radius)^2)`.
/// It then grows by `(1 + floor_premium)^(floor - 1)` and is scaled by
/// `1 + noise_factor * (coordinate_noise(x, y) - 0.5)`.
pub fn house_price(x: f64, y: f64, floor: f64, params: &CityParams) -> f64 {
    let ground = params
        .high_end_centers
        .iter()
        .map(|c| {
            let d = (x - c.x).hypot(y - c.y);
            let r = d / c.influence_radius;
            c.peak_price * (-params.distance_decay * r * r).exp()
        })
        .fold(params.base_price, f64::max);

    let floor_multiplier = (1.0 + params.floor_premium).powf(floor - 1.0);
    let mut price = ground * floor_multiplier;

    if params.noise_factor > 0.0 {
        price *= 1.0 + params.noise_factor * (coordinate_noise(x, y) - 0.5);
    }
    price
}
