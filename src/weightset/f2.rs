use super::{StarError, StarStatus, WeightSet};

/// The field with two elements: exclusive or as addition, conjunction as multiplication. Only
/// zero is starable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct F2;

impl WeightSet for F2 {
    type Weight = bool;

    const STAR_STATUS: StarStatus = StarStatus::NonStarable;

    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }

    fn add(&self, l: &bool, r: &bool) -> bool {
        l ^ r
    }

    fn mul(&self, l: &bool, r: &bool) -> bool {
        *l && *r
    }

    fn star(&self, w: &bool) -> Result<bool, StarError> {
        if *w {
            Err(StarError::new(self.name(), w))
        } else {
            Ok(true)
        }
    }

    fn name(&self) -> &'static str {
        "f2"
    }
}
