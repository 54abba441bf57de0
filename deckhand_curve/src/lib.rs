// Copyright 2026 the Deckhand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deckhand Curve: the geometry seam the hand is laid out along.
//!
//! The hand layout engine does not know what shape the hand takes. It asks a
//! [`HandCurve`] for a [`CurveSample`] at a normalized parameter `t` in
//! `[0, 1]` and receives a position, a forward tangent, and an up vector. The
//! curve itself is authored elsewhere; this crate only defines the contract
//! and implements it for the [`kurbo`] curves a host is likely to hand over:
//!
//! - [`kurbo::CubicBez`] for the usual gently bowed fan,
//! - [`kurbo::Line`] for a flat hand (and for tests that want exact numbers).
//!
//! A sample converts into a card [`Pose`] by aligning the card's up axis with
//! the sample's up vector; the tangent resolves which way the card leans.
//!
//! ```rust
//! use deckhand_curve::HandCurve;
//! use kurbo::{CubicBez, Point};
//!
//! let curve = CubicBez::new(
//!     Point::new(-4.0, 0.0),
//!     Point::new(-1.5, 1.2),
//!     Point::new(1.5, 1.2),
//!     Point::new(4.0, 0.0),
//! );
//! let mid = curve.sample(0.5);
//! // At the apex the card stands upright.
//! assert!(mid.pose().angle.abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use deckhand_card::Pose;
use kurbo::{CubicBez, Line, ParamCurve, ParamCurveDeriv, Point, Vec2};

/// One sample of a hand curve: where a card sits and how it is oriented.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CurveSample {
    /// Position on the curve.
    pub position: Point,
    /// Unit forward tangent at the sample.
    pub tangent: Vec2,
    /// Unit up vector at the sample, perpendicular to the tangent.
    pub up: Vec2,
}

impl CurveSample {
    /// The card pose implied by this sample.
    ///
    /// The card's up axis is aligned with [`CurveSample::up`]; position is
    /// taken as-is and scale is 1.
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            angle: orientation_angle(self.up),
            scale: 1.0,
        }
    }
}

/// A curve the hand can be fanned out along.
///
/// Implementations must accept any `t` in `[0, 1]` and return unit tangent
/// and up vectors. Callers clamp `t` before sampling.
pub trait HandCurve {
    /// Sample the curve at normalized parameter `t` in `[0, 1]`.
    fn sample(&self, t: f64) -> CurveSample;
}

/// Rotation angle, in degrees CCW, that aligns a card's up axis with `up`.
///
/// An up vector of `(0, 1)` yields 0°.
#[must_use]
pub fn orientation_angle(up: Vec2) -> f64 {
    up.atan2().to_degrees() - 90.0
}

impl HandCurve for CubicBez {
    fn sample(&self, t: f64) -> CurveSample {
        let tangent = unit_or_x(self.deriv().eval(t).to_vec2());
        CurveSample {
            position: self.eval(t),
            tangent,
            up: rot90(tangent),
        }
    }
}

impl HandCurve for Line {
    fn sample(&self, t: f64) -> CurveSample {
        let tangent = unit_or_x(self.p1 - self.p0);
        CurveSample {
            position: self.eval(t),
            tangent,
            up: rot90(tangent),
        }
    }
}

/// Perpendicular of `v`, rotated 90° counterclockwise.
fn rot90(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Normalize `v`, falling back to +x for degenerate (zero-length) tangents.
fn unit_or_x(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > 1e-12 {
        v / len
    } else {
        Vec2::new(1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan() -> CubicBez {
        CubicBez::new(
            Point::new(-4.0, 0.0),
            Point::new(-1.5, 1.2),
            Point::new(1.5, 1.2),
            Point::new(4.0, 0.0),
        )
    }

    #[test]
    fn flat_line_samples_are_upright() {
        let line = Line::new(Point::new(-2.0, 0.0), Point::new(2.0, 0.0));
        for i in 0..=4 {
            let s = line.sample(f64::from(i) / 4.0);
            assert_eq!(s.tangent, Vec2::new(1.0, 0.0));
            assert_eq!(s.up, Vec2::new(0.0, 1.0));
            assert!(s.pose().angle.abs() < 1e-12, "flat hand cards stand upright");
        }
        assert_eq!(line.sample(0.0).position, Point::new(-2.0, 0.0));
        assert_eq!(line.sample(1.0).position, Point::new(2.0, 0.0));
    }

    #[test]
    fn fan_tilts_cards_toward_the_ends() {
        let curve = fan();
        let left = curve.sample(0.1).pose().angle;
        let mid = curve.sample(0.5).pose().angle;
        let right = curve.sample(0.9).pose().angle;
        assert!(left > 0.0, "left of the fan leans counterclockwise");
        assert!(mid.abs() < 1e-9, "fan apex is upright");
        assert!(right < 0.0, "right of the fan leans clockwise");
        assert!(
            (left + right).abs() < 1e-9,
            "a symmetric fan tilts symmetrically"
        );
    }

    #[test]
    fn samples_are_unit_length_frames() {
        let curve = fan();
        for i in 0..=10 {
            let s = curve.sample(f64::from(i) / 10.0);
            assert!((s.tangent.hypot() - 1.0).abs() < 1e-12, "tangent is unit");
            assert!((s.up.hypot() - 1.0).abs() < 1e-12, "up is unit");
            assert!(s.tangent.dot(s.up).abs() < 1e-12, "frame is orthogonal");
        }
    }

    #[test]
    fn orientation_angle_matches_axes() {
        assert!(orientation_angle(Vec2::new(0.0, 1.0)).abs() < 1e-12);
        assert!((orientation_angle(Vec2::new(-1.0, 0.0)) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_tangent_falls_back_to_x() {
        let line = Line::new(Point::ZERO, Point::ZERO);
        let s = line.sample(0.5);
        assert_eq!(s.tangent, Vec2::new(1.0, 0.0));
        assert_eq!(s.up, Vec2::new(0.0, 1.0));
    }
}
