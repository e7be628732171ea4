use std::fmt::Display;

use super::{StarError, StarStatus, WeightSet};
use crate::{math, Show};

/// A rational number `num/den`, always kept in normal form: `den > 0` and `gcd(num, den) == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i64,
    den: u64,
}

impl Rational {
    /// Builds the normalized rational `num/den`. Panics if `den` is zero.
    pub fn new(num: i64, den: u64) -> Self {
        assert!(den != 0, "rational with zero denominator");
        let g = math::gcd(num.unsigned_abs(), den);
        Self {
            num: num / g as i64,
            den: den / g,
        }
    }

    /// Normalizes `num/den` computed in 128 bits, `den` must be positive. Panics if the reduced
    /// fraction does not fit in 64 bits.
    fn reduced(num: i128, den: i128) -> Self {
        debug_assert!(den > 0);
        let (mut a, mut b) = (num.unsigned_abs(), den.unsigned_abs());
        while b != 0 {
            (a, b) = (b, a % b);
        }
        let g = a.max(1) as i128;
        match (i64::try_from(num / g), u64::try_from(den / g)) {
            (Ok(num), Ok(den)) => Self { num, den },
            _ => overflow(),
        }
    }

    /// The integer `n` as a rational.
    pub fn integer(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    /// The numerator.
    pub fn num(&self) -> i64 {
        self.num
    }

    /// The (positive) denominator.
    pub fn den(&self) -> u64 {
        self.den
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl Show for Rational {
    fn show(&self) -> String {
        self.to_string()
    }
}

fn overflow() -> ! {
    panic!("q: rational overflow")
}

/// The field of rationals. The star of `v` is `1/(1-v)`, it is only defined for `|v| < 1`.
///
/// Numerators and denominators of normalized values are 64 bit integers, intermediate results
/// are computed on 128 bits. Operations whose normalized result does not fit panic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Q;

impl WeightSet for Q {
    type Weight = Rational;

    const STAR_STATUS: StarStatus = StarStatus::Absval;

    fn zero(&self) -> Rational {
        Rational::integer(0)
    }

    fn one(&self) -> Rational {
        Rational::integer(1)
    }

    fn add(&self, l: &Rational, r: &Rational) -> Rational {
        let g = math::gcd(l.den, r.den);
        let (ld, rd) = (i128::from(l.den / g), i128::from(r.den / g));
        let num = i128::from(l.num)
            .checked_mul(rd)
            .zip(i128::from(r.num).checked_mul(ld))
            .and_then(|(a, b)| a.checked_add(b))
            .unwrap_or_else(|| overflow());
        let den = ld.checked_mul(i128::from(r.den)).unwrap_or_else(|| overflow());
        Rational::reduced(num, den)
    }

    fn mul(&self, l: &Rational, r: &Rational) -> Rational {
        let num = i128::from(l.num) * i128::from(r.num);
        let den = i128::from(l.den)
            .checked_mul(i128::from(r.den))
            .unwrap_or_else(|| overflow());
        Rational::reduced(num, den)
    }

    fn star(&self, w: &Rational) -> Result<Rational, StarError> {
        if w.num.unsigned_abs() < w.den {
            // 1/(1 - n/d) = d/(d - n), d - n is positive
            let den = i128::from(w.den) - i128::from(w.num);
            Ok(Rational::reduced(i128::from(w.den), den))
        } else {
            Err(StarError::new(self.name(), w))
        }
    }

    fn abs(&self, w: &Rational) -> Rational {
        Rational {
            num: w.num.abs(),
            den: w.den,
        }
    }

    fn name(&self) -> &'static str {
        "q"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rationals_are_normalized() {
        assert_eq!(Rational::new(2, 4), Rational::new(1, 2));
        assert_eq!(Rational::new(0, 7), Q.zero());
        assert_eq!(Rational::new(-6, 3).to_string(), "-2");
        assert_eq!(Rational::new(3, 6).to_string(), "1/2");
    }

    #[test]
    fn field_operations() {
        let half = Rational::new(1, 2);
        let third = Rational::new(1, 3);
        assert_eq!(Q.add(&half, &third), Rational::new(5, 6));
        assert_eq!(Q.mul(&half, &third), Rational::new(1, 6));
        assert_eq!(Q.add(&half, &Rational::new(-1, 2)), Q.zero());
    }

    #[test]
    fn star_of_rationals() {
        assert_eq!(Q.star(&Rational::new(1, 2)), Ok(Rational::integer(2)));
        assert_eq!(Q.star(&Rational::new(-1, 2)), Ok(Rational::new(2, 3)));
        assert_eq!(Q.star(&Q.zero()), Ok(Q.one()));
        assert!(Q.star(&Rational::integer(1)).is_err());
        assert!(Q.star(&Rational::new(-3, 2)).is_err());
        assert_eq!(Q.abs(&Rational::new(-3, 2)), Rational::new(3, 2));
    }

    #[test]
    fn large_operands_reduce_without_overflow() {
        let big = Rational::new(i64::MAX, 1 << 62);
        let back = Rational::new(1 << 62, i64::MAX as u64);
        assert_eq!(Q.mul(&big, &back), Q.one());
        let tiny = Rational::new(1, u64::MAX);
        assert_eq!(Q.add(&tiny, &Q.mul(&tiny, &Rational::integer(-1))), Q.zero());
        assert_eq!(
            Q.add(&Rational::new(1, 1 << 40), &Rational::new(1, 1 << 40)),
            Rational::new(1, 1 << 39)
        );
        assert_eq!(
            Q.star(&Rational::new(i64::MAX - 1, i64::MAX as u64)),
            Ok(Rational::integer(i64::MAX))
        );
    }

    #[test]
    #[should_panic(expected = "q: rational overflow")]
    fn unrepresentable_results_panic() {
        let tiny = Rational::new(1, u64::MAX);
        Q.mul(&tiny, &tiny);
    }
}
