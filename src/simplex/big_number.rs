use std::{
    cmp::Ordering,
    fmt,
    ops::{Mul, Neg},
};

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// A number of the form `big_part·M + small_part`, where `M` is arbitrarily large.
///
/// Ordering is lexicographic: the big part decides unless both big parts are equal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
    derive_more::AddAssign,
    derive_more::SubAssign,
)]
pub struct BigNumber<T> {
    big_part: T,
    small_part: T,
}

impl<T> fmt::Display for BigNumber<T>
where
    T: Zero + One + PartialOrd + Neg<Output = T> + Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let big_part = &self.big_part;
        let small_part = &self.small_part;
        let minus_one = -T::one();
        if big_part.is_one() {
            write!(f, "M")?;
        } else if *big_part == minus_one {
            write!(f, "-M")?;
        } else if !big_part.is_zero() {
            write!(f, "{big_part}M")?;
        }
        if *small_part > T::zero() && !big_part.is_zero() {
            write!(f, "+")?;
        }
        if !small_part.is_zero() || big_part.is_zero() {
            write!(f, "{small_part}")?;
        }
        Ok(())
    }
}

impl<T> BigNumber<T> {
    #[inline(always)]
    pub const fn new(big_part: T, small_part: T) -> Self {
        Self {
            big_part,
            small_part,
        }
    }

    pub const fn big_part(&self) -> &T {
        &self.big_part
    }

    pub const fn small_part(&self) -> &T {
        &self.small_part
    }
}

impl<T: One + Zero> BigNumber<T> {
    pub fn one_big() -> Self {
        Self {
            big_part: T::one(),
            small_part: T::zero(),
        }
    }
}

impl BigNumber<f64> {
    /// `value·M` without a small part.
    pub fn big(value: f64) -> Self {
        Self::new(value, 0.)
    }

    /// Lexicographic comparison treating parts closer than `epsilon` as equal.
    pub fn approx_cmp(&self, other: &Self, epsilon: f64) -> Ordering {
        if (self.big_part - other.big_part).abs() > epsilon {
            return self.big_part.total_cmp(&other.big_part);
        }
        if (self.small_part - other.small_part).abs() > epsilon {
            return self.small_part.total_cmp(&other.small_part);
        }
        Ordering::Equal
    }

    /// Below zero by more than the given tolerances.
    pub fn is_negative(&self, epsilon: f64, threshold: f64) -> bool {
        self.big_part < -epsilon || (self.big_part.abs() <= epsilon && self.small_part < -threshold)
    }

    /// Substitutes a concrete value for `M`.
    pub fn evaluate(&self, big_m: f64) -> f64 {
        self.big_part * big_m + self.small_part
    }
}

impl<T> From<T> for BigNumber<T>
where
    T: Zero,
{
    #[inline]
    fn from(val: T) -> Self {
        Self {
            big_part: T::zero(),
            small_part: val,
        }
    }
}

/// Scales both parts.
impl Mul<f64> for BigNumber<f64> {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            big_part: self.big_part * other,
            small_part: self.small_part * other,
        }
    }
}

impl<T: Zero> Zero for BigNumber<T> {
    fn zero() -> Self {
        Self {
            big_part: T::zero(),
            small_part: T::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.big_part.is_zero() && self.small_part.is_zero()
    }
}
