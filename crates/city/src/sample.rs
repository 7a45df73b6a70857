//! Synthetic reference datasets drawn from the price surface.

use kgrid_knn::ReferencePoints;
use rand::Rng;

use crate::error::CityError;
use crate::model::house_price;
use crate::params::CityParams;

/// Draw `n` reference points with prices from the city model.
///
/// `x` and `y` are uniform in `[-limit, limit]`; the floor is a uniform
/// integer in `1..=max_floor`.
///
/// # Errors
///
/// Returns [`CityError::InvalidParams`] if `limit` is not finite and
/// positive, `max_floor` is zero, or `params` fails validation, and
/// [`CityError::Points`] if a sampled price is non-finite.
pub fn sample_reference_points(
    n: usize,
    limit: f64,
    max_floor: u32,
    params: &CityParams,
    rng: &mut impl Rng,
) -> Result<ReferencePoints, CityError> {
    if !limit.is_finite() || limit <= 0.0 {
        return Err(CityError::InvalidParams {
            reason: format!("limit must be finite and positive, got {limit}"),
        });
    }
    if max_floor == 0 {
        return Err(CityError::InvalidParams {
            reason: "max_floor must be at least 1".to_string(),
        });
    }
    params.validate()?;

    let mut coords = Vec::with_capacity(n * 3);
    let mut prices = Vec::with_capacity(n);
    for _ in 0..n {
        let x = rng.random_range(-limit..=limit);
        let y = rng.random_range(-limit..=limit);
        let floor = f64::from(rng.random_range(1..=max_floor));
        coords.extend([x, y, floor]);
        prices.push(house_price(x, y, floor, params));
    }

    Ok(ReferencePoints::new(coords, prices)?)
}
