//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries may be left undefined (NaN) while a matrix is being assembled;
/// [`ProblemInstance`](crate::models::ProblemInstance) rejects any undefined
/// entry between two distinct cities.
///
/// # Examples
///
/// ```
/// use u_pickup::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 568.0, 634.0],
///     vec![568.0, 0.0, 121.0],
///     vec![634.0, 121.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(1, 2), 121.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixData")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix whose off-diagonal entries are all undefined.
    pub fn undefined(size: usize) -> Self {
        let mut dm = Self {
            data: vec![f64::NAN; size * size],
            size,
        };
        for i in 0..size {
            dm.set(i, i, 0.0);
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form a square grid.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Self::from_data(size, rows.into_iter().flatten().collect())
    }

    /// Builds a star metric around `depot` from depot distances only.
    ///
    /// `depot_distances[i]` is the distance between the depot and city `i`
    /// (the depot's own entry is ignored). Travel between two other cities is
    /// modelled as the detour through the depot.
    ///
    /// ```
    /// use u_pickup::distance::DistanceMatrix;
    ///
    /// let dm = DistanceMatrix::from_depot_distances(0, &[0.0, 10.0, 4.0]);
    /// assert_eq!(dm.get(0, 1), 10.0);
    /// assert_eq!(dm.get(2, 0), 4.0);
    /// assert_eq!(dm.get(1, 2), 14.0);
    /// ```
    pub fn from_depot_distances(depot: usize, depot_distances: &[f64]) -> Self {
        let n = depot_distances.len();
        let mut dm = Self::new(n);
        let leg = |i: usize| if i == depot { 0.0 } else { depot_distances[i] };
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    dm.set(i, j, leg(i) + leg(j));
                }
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Returns the distance if both indices are in range and the entry is defined.
    pub fn try_get(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        let d = self.get(from, to);
        (!d.is_nan()).then_some(d)
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Sets both directions at once.
    pub fn set_symmetric(&mut self, a: usize, b: usize, distance: f64) {
        self.set(a, b, distance);
        self.set(b, a, distance);
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest of `candidates` as seen from `from`.
    ///
    /// Ties go to the earlier candidate. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}

/// Wire form of a [`DistanceMatrix`], checked on the way in.
#[derive(Deserialize)]
struct MatrixData {
    data: Vec<f64>,
    size: usize,
}

impl TryFrom<MatrixData> for DistanceMatrix {
    type Error = InputError;

    fn try_from(raw: MatrixData) -> Result<Self, InputError> {
        let len = raw.data.len();
        if raw.size.checked_mul(raw.size) != Some(len) {
            return Err(InputError::MalformedMatrix {
                size: raw.size,
                len,
            });
        }
        Ok(Self {
            data: raw.data,
            size: raw.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durban_triangle() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 568.0, 634.0],
            vec![568.0, 0.0, 121.0],
            vec![634.0, 121.0, 0.0],
        ])
        .expect("square")
    }

    #[test]
    fn test_from_rows() {
        let dm = durban_triangle();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(0, 2), 634.0);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_none());
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_undefined_entries() {
        let mut dm = DistanceMatrix::undefined(3);
        assert_eq!(dm.try_get(1, 1), Some(0.0));
        assert_eq!(dm.try_get(0, 1), None);
        dm.set_symmetric(0, 1, 7.0);
        assert_eq!(dm.try_get(1, 0), Some(7.0));
        assert_eq!(dm.try_get(0, 5), None);
    }

    #[test]
    fn test_star_metric() {
        let dm = DistanceMatrix::from_depot_distances(1, &[5.0, 99.0, 3.0]);
        assert_eq!(dm.get(1, 0), 5.0);
        assert_eq!(dm.get(1, 2), 3.0);
        assert_eq!(dm.get(0, 2), 8.0);
        assert_eq!(dm.get(1, 1), 0.0);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_nearest_neighbor() {
        let dm = durban_triangle();
        assert_eq!(dm.nearest_neighbor(1, &[0, 2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_deserialize_checks_length() {
        let dm: DistanceMatrix =
            serde_json::from_str(r#"{"data":[0.0,4.0,4.0,0.0],"size":2}"#).expect("square");
        assert_eq!(dm.get(1, 0), 4.0);

        for bad in [
            r#"{"data":[0.0,1.0,1.0],"size":2}"#,
            r#"{"data":[],"size":3}"#,
            r#"{"data":[0.0],"size":0}"#,
        ] {
            let err = serde_json::from_str::<DistanceMatrix>(bad).unwrap_err();
            assert!(err.to_string().contains("entries"), "{bad}: {err}");
        }
    }
}
