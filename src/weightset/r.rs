use super::{StarError, StarStatus, WeightSet};

/// The field of reals, represented as `f64`. The star of `v` is `1/(1-v)`, which is only defined
/// for `-1 < v < 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct R;

impl WeightSet for R {
    type Weight = f64;

    const STAR_STATUS: StarStatus = StarStatus::Absval;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, l: &f64, r: &f64) -> f64 {
        l + r
    }

    fn mul(&self, l: &f64, r: &f64) -> f64 {
        l * r
    }

    fn star(&self, w: &f64) -> Result<f64, StarError> {
        if -1.0 < *w && *w < 1.0 {
            Ok(1.0 / (1.0 - w))
        } else {
            Err(StarError::new(self.name(), w))
        }
    }

    fn abs(&self, w: &f64) -> f64 {
        w.abs()
    }

    fn name(&self) -> &'static str {
        "r"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_of_reals() {
        assert_eq!(R.star(&0.5), Ok(2.0));
        assert_eq!(R.star(&-1.0).unwrap_err().to_string(), "r: star: invalid value: -1");
        assert!(R.star(&1.0).is_err());
        assert_eq!(R.abs(&-0.25), 0.25);
    }
}
