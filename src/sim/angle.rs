//! Angle type with wraparound arithmetic
//!
//! An `Angle` stores a measure together with the size of one revolution
//! (its modulus). The measure is always normalized into `(-mod/2, mod/2]`,
//! and every arithmetic operation re-normalizes. Ordering is defined by the
//! shorter rotational direction between two angles rather than by raw
//! numeric order, which is what makes comparisons between headings work
//! across the ±180° seam.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// One revolution in degrees
pub const DEGREES: f32 = 360.0;
/// One revolution in radians
pub const RADIANS: f32 = std::f32::consts::TAU;
/// One revolution in gradians
pub const GRADIANS: f32 = 400.0;

/// A normalized angle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Angle {
    measure: f32,
    modulus: f32,
}

impl Angle {
    /// Create an angle with an arbitrary revolution size.
    ///
    /// A negative modulus is treated as its absolute value. A zero or
    /// non-finite modulus is rejected.
    pub fn new(measure: f32, modulus: f32) -> Result<Self, SimError> {
        let modulus = modulus.abs();
        if modulus == 0.0 || !modulus.is_finite() {
            return Err(SimError::ZeroModulus);
        }
        Ok(Self::normalized(measure, modulus))
    }

    /// Angle measured in degrees
    pub fn degrees(measure: f32) -> Self {
        Self::normalized(measure, DEGREES)
    }

    /// Angle measured in radians
    pub fn radians(measure: f32) -> Self {
        Self::normalized(measure, RADIANS)
    }

    fn normalized(measure: f32, modulus: f32) -> Self {
        Self {
            measure: wrap(measure, modulus),
            modulus,
        }
    }

    #[inline]
    pub fn measure(&self) -> f32 {
        self.measure
    }

    #[inline]
    pub fn modulus(&self) -> f32 {
        self.modulus
    }

    /// Absolute value of the measure
    #[inline]
    pub fn abs(&self) -> f32 {
        self.measure.abs()
    }

    /// The measure rescaled to another revolution size, in `(-mod/2, mod/2]`.
    ///
    /// Returns 0 for a zero modulus.
    pub fn convert(&self, modulus: f32) -> f32 {
        let modulus = modulus.abs();
        if modulus == 0.0 {
            return 0.0;
        }
        wrap(self.measure / self.modulus * modulus, modulus)
    }

    /// Measure in radians
    pub fn to_radians(&self) -> f32 {
        self.convert(RADIANS)
    }

    /// Measure in degrees
    pub fn to_degrees(&self) -> f32 {
        self.convert(DEGREES)
    }

    /// Normalized distance to another angle: 0 when equal, 1 when
    /// diametrically opposed.
    pub fn reldiff(&self, other: impl Into<Operand>) -> f32 {
        (*self - other).abs() / (self.modulus / 2.0)
    }

    /// Measure of the other operand expressed in this angle's unit
    fn operand(&self, other: Operand) -> f32 {
        match other {
            Operand::Angle(a) if a.modulus == self.modulus => a.measure,
            Operand::Angle(a) => a.convert(self.modulus),
            Operand::Measure(m) => m,
        }
    }
}

/// Wrap a measure into `(-modulus/2, modulus/2]`
fn wrap(measure: f32, modulus: f32) -> f32 {
    let half = modulus / 2.0;
    let mut m = measure;
    if m < -half || m > half {
        m = (m + half).rem_euclid(modulus) - half;
    }
    if m <= -half {
        m = half;
    }
    m
}

/// Right-hand side of angle arithmetic: another angle (converted to the
/// left operand's unit) or a bare measure already in that unit.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    Angle(Angle),
    Measure(f32),
}

impl From<Angle> for Operand {
    fn from(angle: Angle) -> Self {
        Operand::Angle(angle)
    }
}

impl From<f32> for Operand {
    fn from(measure: f32) -> Self {
        Operand::Measure(measure)
    }
}

impl<T: Into<Operand>> Add<T> for Angle {
    type Output = Angle;

    fn add(self, rhs: T) -> Angle {
        let theta = self.operand(rhs.into());
        Angle::normalized(self.measure + theta, self.modulus)
    }
}

impl<T: Into<Operand>> Sub<T> for Angle {
    type Output = Angle;

    fn sub(self, rhs: T) -> Angle {
        let theta = self.operand(rhs.into());
        Angle::normalized(self.measure - theta, self.modulus)
    }
}

impl Mul<f32> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f32) -> Angle {
        Angle::normalized(self.measure * rhs, self.modulus)
    }
}

impl Div<f32> for Angle {
    type Output = Angle;

    fn div(self, rhs: f32) -> Angle {
        Angle::normalized(self.measure / rhs, self.modulus)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::normalized(-self.measure, self.modulus)
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Angle) -> bool {
        (*self - *other).measure == 0.0
    }
}

impl PartialEq<f32> for Angle {
    fn eq(&self, other: &f32) -> bool {
        (*self - *other).measure == 0.0
    }
}

/// Shorter-path ordering. `a > b` when the short way from `b` to `a` is
/// counterclockwise. Diametrically opposed angles compare greater from
/// whichever side is the left operand, so this is not a total order.
impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Angle) -> Option<Ordering> {
        (*self - *other).measure.partial_cmp(&0.0)
    }
}

impl PartialOrd<f32> for Angle {
    fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
        (*self - *other).measure.partial_cmp(&0.0)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modulus == DEGREES {
            write!(f, "{} deg", self.measure)
        } else if self.modulus == RADIANS {
            write!(f, "{} rad", self.measure)
        } else if self.modulus == GRADIANS {
            write!(f, "{} grad", self.measure)
        } else {
            write!(f, "{} / {}", self.measure, self.modulus)
        }
    }
}
