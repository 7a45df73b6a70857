//! # kgrid-city
//!
//! Synthetic city used to generate reference datasets: a smooth price
//! surface peaking at a few high-end centers, compounded per floor and
//! perturbed by location-keyed noise.
//!
//! ```
//! use kgrid_city::{CityParams, house_price};
//!
//! let params = CityParams::default();
//! let downtown = house_price(0.0, 0.0, 1.0, &params);
//! let outskirts = house_price(9.0, 9.0, 1.0, &params);
//! assert!(downtown > outskirts);
//! ```

mod error;
mod model;
mod params;
mod sample;

pub use error::CityError;
pub use model::{coordinate_noise, house_price};
pub use params::{CityParams, HighEndCenter, load_city_params};
pub use sample::sample_reference_points;
