use super::{StarError, StarStatus, WeightSet};

/// The Boolean semiring: disjunction as addition, conjunction as multiplication. Every weight is
/// starable, the star is always `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct B;

impl WeightSet for B {
    type Weight = bool;

    const STAR_STATUS: StarStatus = StarStatus::Starable;

    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }

    fn add(&self, l: &bool, r: &bool) -> bool {
        *l || *r
    }

    fn mul(&self, l: &bool, r: &bool) -> bool {
        *l && *r
    }

    fn star(&self, _w: &bool) -> Result<bool, StarError> {
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "b"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_semiring() {
        assert!(B.add(&true, &false));
        assert!(!B.mul(&true, &false));
        assert_eq!(B.star(&true), Ok(true));
        assert_eq!(B.star(&false), Ok(true));
        assert!(B.is_zero(&false));
    }
}
