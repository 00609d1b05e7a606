//! Evenly spaced sample points.

/// `n` evenly spaced values from `start` to `end`, endpoint exact.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * delta).collect();
            // Ensure exact endpoint
            points[n - 1] = end;
            points
        }
    }
}

/// Row-major cartesian product; the first axis varies slowest.
pub fn cartesian(axes: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut combos: Vec<Vec<f64>> = vec![Vec::with_capacity(axes.len())];
    for axis in axes {
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                axis.iter().map(move |&v| {
                    let mut next = prefix.clone();
                    next.push(v);
                    next
                })
            })
            .collect();
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let pts = linspace(10.0, 20.0, 20);
        assert_eq!(pts.len(), 20);
        assert_eq!(pts[0], 10.0);
        assert_eq!(pts[19], 20.0);
        assert!((pts[1] - (10.0 + 10.0 / 19.0)).abs() < 1e-12);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn cartesian_is_row_major() {
        let combos = cartesian(&[vec![1.0, 2.0], vec![10.0, 20.0, 30.0]]);
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0], vec![1.0, 10.0]);
        assert_eq!(combos[1], vec![1.0, 20.0]);
        assert_eq!(combos[3], vec![2.0, 10.0]);
        assert_eq!(combos[5], vec![2.0, 30.0]);
    }
}
