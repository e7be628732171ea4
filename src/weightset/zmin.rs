use super::{StarError, StarStatus, WeightSet};
use crate::Show;

/// The tropical semiring over the integers: minimum as addition, sum as multiplication. Zero is
/// `+oo` (represented as `i64::MAX`) and one is `0`. Only nonnegative weights are starable, and
/// their star is `0`; whether an automaton is valid can only be decided by trying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ZMin;

impl ZMin {
    /// The representation of `+oo`.
    pub const INFINITY: i64 = i64::MAX;

    /// Renders a weight, with `oo` for zero.
    pub fn format(w: i64) -> String {
        if w == Self::INFINITY {
            "oo".to_string()
        } else {
            w.show()
        }
    }
}

impl WeightSet for ZMin {
    type Weight = i64;

    const STAR_STATUS: StarStatus = StarStatus::Tops;

    fn zero(&self) -> i64 {
        Self::INFINITY
    }

    fn one(&self) -> i64 {
        0
    }

    fn add(&self, l: &i64, r: &i64) -> i64 {
        *l.min(r)
    }

    fn mul(&self, l: &i64, r: &i64) -> i64 {
        if self.is_zero(l) || self.is_zero(r) {
            self.zero()
        } else {
            l.saturating_add(*r)
        }
    }

    fn star(&self, w: &i64) -> Result<i64, StarError> {
        if 0 <= *w {
            Ok(self.one())
        } else {
            Err(StarError {
                weightset: self.name(),
                value: Self::format(*w),
            })
        }
    }

    fn name(&self) -> &'static str {
        "zmin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tropical_operations() {
        assert_eq!(ZMin.add(&3, &-2), -2);
        assert_eq!(ZMin.mul(&3, &-2), 1);
        assert_eq!(ZMin.mul(&3, &ZMin.zero()), ZMin.zero());
        assert_eq!(ZMin.star(&4), Ok(0));
        assert_eq!(ZMin.star(&ZMin.zero()), Ok(0));
        assert_eq!(
            ZMin.star(&-1).unwrap_err().to_string(),
            "zmin: star: invalid value: -1"
        );
        assert_eq!(ZMin::format(ZMin.zero()), "oo");
    }
}
