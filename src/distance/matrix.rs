//! Dense cost matrix.

/// A dense n×n cost matrix stored in row-major order.
///
/// Cells hold non-negative costs, or `f64::INFINITY` for a pair that must
/// not be used as a direct leg. The diagonal is always zero.
///
/// # Examples
///
/// ```
/// use u_tour::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 4.0,
///     1.0, 0.0, 2.0,
///     4.0, 2.0, 0.0,
/// ]).unwrap();
/// assert_eq!(dm.get(1, 2), 2.0);
/// assert!((dm.path_cost(&[0, 1, 2, 0]) - 7.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a cost matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the cost from vertex `from` to vertex `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from vertex `from` to vertex `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of vertices in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// Two infinite cells in mirrored positions count as equal.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol || a.is_infinite() || b.is_infinite() {
                    return false;
                }
            }
        }
        true
    }

    /// Sums the costs of consecutive pairs along `path`.
    ///
    /// Zero for paths shorter than two entries.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Returns the candidate with the lowest finite cost from `from`.
    ///
    /// Ties go to the candidate listed first. Returns `None` if no candidate
    /// is reachable.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if !d.is_finite() {
                continue;
            }
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DistanceMatrix {
        // Unit square corners: (0,0), (0,1), (1,1), (1,0)
        let d = std::f64::consts::SQRT_2;
        DistanceMatrix::from_data(
            4,
            vec![
                0.0, 1.0, d, 1.0, //
                1.0, 0.0, 1.0, d, //
                d, 1.0, 0.0, 1.0, //
                1.0, d, 1.0, 0.0,
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_symmetric() {
        assert!(square().is_symmetric(1e-10));
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_mirrored_infinity_is_symmetric() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, f64::INFINITY);
        dm.set(1, 0, f64::INFINITY);
        assert!(dm.is_symmetric(1e-10));
        dm.set(1, 0, 3.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_path_cost() {
        let dm = square();
        assert!((dm.path_cost(&[0, 1, 2, 3, 0]) - 4.0).abs() < 1e-10);
        assert_eq!(dm.path_cost(&[2]), 0.0);
        assert_eq!(dm.path_cost(&[]), 0.0);
    }

    #[test]
    fn test_nearest_first_tie_wins() {
        let dm = square();
        assert_eq!(dm.nearest(0, &[1, 2, 3]), Some(1));
        assert_eq!(dm.nearest(0, &[3, 1]), Some(3));
        assert_eq!(dm.nearest(0, &[]), None);
    }

    #[test]
    fn test_nearest_skips_infinite() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, f64::INFINITY);
        dm.set(0, 2, 7.0);
        assert_eq!(dm.nearest(0, &[1, 2]), Some(2));
        assert_eq!(dm.nearest(0, &[1]), None);
    }
}
