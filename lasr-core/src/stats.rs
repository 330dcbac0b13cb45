//! Vector reductions

/// Largest element; `-inf` for an empty vector
pub fn max(a: &[f64]) -> f64 {
    a.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Index of the first largest element.
///
/// Panics on an empty vector.
pub fn maxi(a: &[f64]) -> usize {
    assert!(!a.is_empty(), "maxi: vector must not be empty");
    let mut best = 0;
    for (i, &x) in a.iter().enumerate().skip(1) {
        if x > a[best] {
            best = i;
        }
    }
    best
}

/// Smallest element; `+inf` for an empty vector
pub fn min(a: &[f64]) -> f64 {
    a.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Index of the first smallest element.
///
/// Panics on an empty vector.
pub fn mini(a: &[f64]) -> usize {
    assert!(!a.is_empty(), "mini: vector must not be empty");
    let mut best = 0;
    for (i, &x) in a.iter().enumerate().skip(1) {
        if x < a[best] {
            best = i;
        }
    }
    best
}

pub fn mean(a: &[f64]) -> f64 {
    sum(a) / a.len() as f64
}

/// Population standard deviation (divides by `n`)
pub fn std(a: &[f64]) -> f64 {
    let m = mean(a);
    let ss: f64 = a.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / a.len() as f64).sqrt()
}

/// Subtract the mean and divide by the standard deviation
pub fn normalize(a: &[f64]) -> Vec<f64> {
    let m = mean(a);
    let s = std(a);
    a.iter().map(|x| (x - m) / s).collect()
}

pub fn sum(a: &[f64]) -> f64 {
    a.iter().sum()
}

/// Sum of squares
pub fn sumsq(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::approx_eq_all;

    #[test]
    fn test_extrema() {
        let a = [3.0, 7.0, -1.0, 7.0];
        assert_eq!(max(&a), 7.0);
        assert_eq!(maxi(&a), 1);
        assert_eq!(min(&a), -1.0);
        assert_eq!(mini(&a), 2);
        assert_eq!(max(&[]), f64::NEG_INFINITY);
    }

    #[test]
    #[should_panic]
    fn test_maxi_empty_panics() {
        maxi(&[]);
    }

    #[test]
    fn test_moments() {
        let a = [1.0, 4.0];
        assert_eq!(mean(&a), 2.5);
        assert!((std(&a) - 1.5).abs() < 1e-14);
        assert_eq!(sum(&a), 5.0);
        assert_eq!(sumsq(&a), 17.0);
    }

    #[test]
    fn test_normalize() {
        let n = normalize(&[1.0, 2.0, 3.0]);
        let s = (2.0f64 / 3.0).sqrt();
        assert!(approx_eq_all(&n, &[-1.0 / s, 0.0, 1.0 / s]));
        assert!(mean(&n).abs() < 1e-14);
    }
}
