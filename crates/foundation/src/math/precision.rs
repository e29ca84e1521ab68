//! Deterministic float ordering.
//!
//! Label placement walks measured frost depths in sorted order, so sorts on
//! measured values must come out the same on every run and every platform.
//! `total_cmp` alone distinguishes `-0.0` from `0.0` and one NaN bit pattern
//! from another; canonicalizing first removes both sources of wobble.

use core::cmp::Ordering;

/// Collapses `-0.0` to `0.0` and every NaN to one canonical NaN.
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Total ordering over floats, stable across zero signs and NaN payloads.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

#[cfg(test)]
mod tests {
    use super::{canonical_f64, stable_total_cmp_f64};
    use core::cmp::Ordering;

    #[test]
    fn zero_signs_compare_equal() {
        assert_eq!(canonical_f64(-0.0).to_bits(), 0.0_f64.to_bits());
        assert_eq!(stable_total_cmp_f64(-0.0, 0.0), Ordering::Equal);
    }

    #[test]
    fn nans_compare_equal_and_sort_last() {
        assert_eq!(stable_total_cmp_f64(f64::NAN, f64::NAN), Ordering::Equal);
        assert_eq!(stable_total_cmp_f64(f64::INFINITY, f64::NAN), Ordering::Less);
    }

    #[test]
    fn sorts_depths_with_zero_variants_together() {
        let mut depths = vec![2.5, -0.0, 1.0, 0.0];
        depths.sort_by(|a, b| stable_total_cmp_f64(*a, *b));
        assert_eq!(stable_total_cmp_f64(depths[0], depths[1]), Ordering::Equal);
        assert_eq!(depths[2], 1.0);
        assert_eq!(depths[3], 2.5);
    }
}
