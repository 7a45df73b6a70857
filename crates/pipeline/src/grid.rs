//! Regular query grids over the city.

use kgrid_knn::{QueryPoints, SPATIAL_DIMS};

use crate::config::GridConfig;
use crate::error::PipelineError;

/// `n` evenly spaced values from `start` to `end`, both inclusive.
///
/// `n = 1` yields `[start]`; `n = 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // pin the endpoint against accumulated rounding
            out[n - 1] = end;
            out
        }
    }
}

/// Flattened `n_points × n_points` mesh over `[-limit, limit]²`.
///
/// x varies fastest: point `i * n_points + j` is `(xs[j], ys[i])`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidGrid`] if the number of flattened grid
/// coordinates overflows `usize`.
pub fn create_grid(n_points: usize, limit: f64) -> Result<(Vec<f64>, Vec<f64>), PipelineError> {
    let n_total = n_points
        .checked_mul(n_points)
        .filter(|n| n.checked_mul(SPATIAL_DIMS).is_some())
        .ok_or_else(|| PipelineError::InvalidGrid {
            reason: format!("{n_points} points per axis overflows the grid size"),
        })?;

    let axis = linspace(-limit, limit, n_points);
    let mut x = Vec::with_capacity(n_total);
    let mut y = Vec::with_capacity(n_total);
    for &yi in &axis {
        for &xj in &axis {
            x.push(xj);
            y.push(yi);
        }
    }
    Ok((x, y))
}

/// Builds the query points of a grid, every point on the configured floor.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidGrid`] if the configuration is invalid
/// or the grid is too large to index.
pub fn create_query_points(config: &GridConfig) -> Result<QueryPoints, PipelineError> {
    config.validate()?;
    let (x, y) = create_grid(config.n_points(), config.limit())?;
    let coords = x
        .iter()
        .zip(&y)
        .flat_map(|(&xi, &yi)| [xi, yi, config.floor()])
        .collect();
    Ok(QueryPoints::new(coords)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(-10.0, 10.0, 5);
        assert_eq!(v, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_linspace_pins_end() {
        let v = linspace(-10.0, 10.0, 7);
        assert_eq!(v[6], 10.0);
        assert_abs_diff_eq!(v[1] - v[0], 20.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_create_grid_shape_and_corners() {
        let (x, y) = create_grid(5, 10.0).unwrap();
        assert_eq!(x.len(), 25);
        assert_eq!(y.len(), 25);
        assert_eq!(x[0], -10.0);
        assert_eq!(y[0], -10.0);
        assert_eq!(x[24], 10.0);
        assert_eq!(y[24], 10.0);
        // x fastest
        assert_eq!((x[1], y[1]), (-5.0, -10.0));
        assert_eq!((x[5], y[5]), (-10.0, -5.0));
    }

    #[test]
    fn test_create_query_points() {
        let cfg = GridConfig::new().with_n_points(5).with_floor(2.0);
        let q = create_query_points(&cfg).unwrap();
        assert_eq!(q.len(), 25);
        assert!(q.rows().all(|r| r[2] == 2.0));
        assert!(q.rows().all(|r| (-10.0..=10.0).contains(&r[0])));
        assert!(q.rows().all(|r| (-10.0..=10.0).contains(&r[1])));
        assert_eq!(q.row(17), &[0.0, 5.0, 2.0]);
    }

    #[test]
    fn test_create_query_points_empty_grid() {
        let q = create_query_points(&GridConfig::new().with_n_points(0)).unwrap();
        assert!(q.is_empty());
    }

    #[test]
    fn test_create_grid_overflow() {
        for n in [usize::MAX, 1usize << (usize::BITS / 2)] {
            let err = create_grid(n, 10.0).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidGrid { .. }), "n={n}");
        }
    }

    #[test]
    fn test_create_query_points_overflow() {
        let cfg = GridConfig::new().with_n_points(usize::MAX / 2);
        let err = create_query_points(&cfg).unwrap_err();
        match err {
            PipelineError::InvalidGrid { reason } => assert!(reason.contains("overflows")),
            other => panic!("expected InvalidGrid, got {other:?}"),
        }
    }

    #[test]
    fn test_create_query_points_invalid() {
        let err = create_query_points(&GridConfig::new().with_limit(-1.0)).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidGrid { .. }));
    }
}
