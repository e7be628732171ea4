use super::{StarError, StarStatus, WeightSet};

/// The ring of integers. Only zero is starable, hence spontaneous cycles of nonzero weight
/// cannot be removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Z;

impl WeightSet for Z {
    type Weight = i64;

    const STAR_STATUS: StarStatus = StarStatus::NonStarable;

    fn zero(&self) -> i64 {
        0
    }

    fn one(&self) -> i64 {
        1
    }

    fn add(&self, l: &i64, r: &i64) -> i64 {
        l + r
    }

    fn mul(&self, l: &i64, r: &i64) -> i64 {
        l * r
    }

    fn star(&self, w: &i64) -> Result<i64, StarError> {
        if *w == 0 {
            Ok(1)
        } else {
            Err(StarError::new(self.name(), w))
        }
    }

    fn abs(&self, w: &i64) -> i64 {
        w.abs()
    }

    fn name(&self) -> &'static str {
        "z"
    }
}
