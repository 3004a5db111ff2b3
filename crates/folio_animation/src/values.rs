//! Animatable value types
//!
//! Provides the interpolation used by the reference engine for plain numbers,
//! unit-carrying property values and points.

use folio_core::{Point, PropertyValue};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t
    ///
    /// `t` is usually 0.0 to 1.0 but may leave that range for overshooting
    /// easings.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// PropertyValue Implementation
// ============================================================================

/// Values in the same unit interpolate numerically. Across units, a zero
/// start adopts the end's unit (`0` → `20%` animates through percentages);
/// any other mismatch holds the start value and snaps at the end.
impl Interpolate for PropertyValue {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if self.same_unit(*other) || self.magnitude() == 0.0 {
            other.with_magnitude(self.magnitude().lerp(&other.magnitude(), t))
        } else if t >= 1.0 {
            *other
        } else {
            *self
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.same_unit(*other) && self.magnitude().approx_eq(&other.magnitude(), epsilon)
    }
}

// ============================================================================
// Point Implementation
// ============================================================================

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}
