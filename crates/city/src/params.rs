//! City definition: high-end centers and price shaping factors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CityError;

/// A premium location whose influence decays with distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighEndCenter {
    /// Optional label, e.g. a district name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Center x coordinate.
    pub x: f64,
    /// Center y coordinate.
    pub y: f64,
    /// Ground-floor price at the center itself.
    pub peak_price: f64,
    /// Length scale of the Gaussian decay.
    pub influence_radius: f64,
}

impl HighEndCenter {
    /// Creates a center at `(x, y)`.
    pub fn new(x: f64, y: f64, peak_price: f64, influence_radius: f64) -> Self {
        Self {
            name: None,
            x,
            y,
            peak_price,
            influence_radius,
        }
    }

    /// Attaches a label to this center.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Parameters of the synthetic city price surface.
///
/// The JSON layout matches the field names, e.g.
///
/// ```json
/// {
///   "high_end_centers": [{"x": 0, "y": 0, "peak_price": 2000, "influence_radius": 5}],
///   "base_price": 200,
///   "floor_premium": 0.05,
///   "distance_decay": 0.3,
///   "noise_factor": 0.1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CityParams {
    /// Premium locations; may be empty.
    pub high_end_centers: Vec<HighEndCenter>,
    /// Price floor applied everywhere before the floor premium.
    pub base_price: f64,
    /// Compound growth per floor above the first.
    pub floor_premium: f64,
    /// Decay rate of center influence.
    pub distance_decay: f64,
    /// Relative amplitude of the coordinate noise.
    pub noise_factor: f64,
}

impl Default for CityParams {
    fn default() -> Self {
        Self {
            high_end_centers: vec![
                HighEndCenter::new(0.0, 0.0, 2000.0, 5.0),
                HighEndCenter::new(2.0, 1.0, 1500.0, 3.0),
                HighEndCenter::new(-1.0, 3.0, 1200.0, 2.5),
                HighEndCenter::new(1.0, -2.0, 1000.0, 2.0),
            ],
            base_price: 200.0,
            floor_premium: 0.05,
            distance_decay: 0.3,
            noise_factor: 0.1,
        }
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), CityError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CityError::InvalidParams {
            reason: format!("{name} must be finite and non-negative, got {value}"),
        });
    }
    Ok(())
}

impl CityParams {
    /// Validates parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CityError::InvalidParams`] if any factor or peak price is
    /// negative or non-finite, a center coordinate is non-finite, or an
    /// influence radius is not strictly positive.
    pub fn validate(&self) -> Result<(), CityError> {
        check_non_negative("base_price", self.base_price)?;
        check_non_negative("floor_premium", self.floor_premium)?;
        check_non_negative("distance_decay", self.distance_decay)?;
        check_non_negative("noise_factor", self.noise_factor)?;

        for (i, c) in self.high_end_centers.iter().enumerate() {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(CityError::InvalidParams {
                    reason: format!("high_end_centers[{i}] has a non-finite position"),
                });
            }
            check_non_negative(&format!("high_end_centers[{i}].peak_price"), c.peak_price)?;
            if !c.influence_radius.is_finite() || c.influence_radius <= 0.0 {
                return Err(CityError::InvalidParams {
                    reason: format!(
                        "high_end_centers[{i}].influence_radius must be positive, got {}",
                        c.influence_radius
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Load and validate a city definition from a JSON file.
///
/// # Errors
///
/// Returns [`CityError::Io`] if the file cannot be read,
/// [`CityError::Json`] if it does not parse, or
/// [`CityError::InvalidParams`] if validation fails.
pub fn load_city_params(path: &Path) -> Result<CityParams, CityError> {
    let text = std::fs::read_to_string(path).map_err(|source| CityError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let params: CityParams = serde_json::from_str(&text)?;
    params.validate()?;
    Ok(params)
}
