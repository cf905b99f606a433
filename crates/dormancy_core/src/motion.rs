//! Velocity threshold tests.
//!
//! One tester per supported velocity layout. A group is bound to the first
//! tester in [`MotionTester::ALL`] that can read its layout, once, when the
//! registry is initialized.

use dormancy_data::{Rigid2Deriv, Rigid3Deriv, Velocities};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionTester {
    Vec1,
    Vec2,
    Vec3,
    Vec6,
    Rigid2,
    Rigid3,
}

impl MotionTester {
    /// Selection order used when binding a group.
    pub const ALL: [MotionTester; 6] = [
        MotionTester::Vec1,
        MotionTester::Vec2,
        MotionTester::Vec3,
        MotionTester::Vec6,
        MotionTester::Rigid2,
        MotionTester::Rigid3,
    ];

    /// First tester able to read `velocities`, if any.
    #[must_use]
    pub fn bind(velocities: &Velocities) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.can_convert(velocities))
    }

    #[must_use]
    pub fn can_convert(self, velocities: &Velocities) -> bool {
        matches!(
            (self, velocities),
            (MotionTester::Vec1, Velocities::Vec1(_))
                | (MotionTester::Vec2, Velocities::Vec2(_))
                | (MotionTester::Vec3, Velocities::Vec3(_))
                | (MotionTester::Vec6, Velocities::Vec6(_))
                | (MotionTester::Rigid2, Velocities::Rigid2(_))
                | (MotionTester::Rigid3, Velocities::Rigid3(_))
        )
    }

    /// Whether every entry of `velocities` moves slower than the thresholds.
    ///
    /// Returns `false` when the layout no longer matches this tester.
    #[must_use]
    pub fn wants_to_sleep(
        self,
        velocities: &Velocities,
        speed_threshold: f64,
        rotation_threshold: f64,
    ) -> bool {
        match (self, velocities) {
            (MotionTester::Vec1, Velocities::Vec1(v)) => linear_below(v, speed_threshold),
            (MotionTester::Vec2, Velocities::Vec2(v)) => linear_below(v, speed_threshold),
            (MotionTester::Vec3, Velocities::Vec3(v)) => linear_below(v, speed_threshold),
            (MotionTester::Vec6, Velocities::Vec6(v)) => linear_below(v, speed_threshold),
            (MotionTester::Rigid2, Velocities::Rigid2(v)) => {
                rigid2_below(v, speed_threshold, rotation_threshold)
            }
            (MotionTester::Rigid3, Velocities::Rigid3(v)) => {
                rigid3_below(v, speed_threshold, rotation_threshold)
            }
            _ => false,
        }
    }
}

#[inline]
fn norm2<const N: usize>(v: &[f64; N]) -> f64 {
    v.iter().map(|c| c * c).sum()
}

/// Running maximum starting at zero, so an empty input yields zero.
#[inline]
fn running_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

fn linear_below<const N: usize>(velocities: &[[f64; N]], speed_threshold: f64) -> bool {
    running_max(velocities.iter().map(norm2)) < speed_threshold * speed_threshold
}

fn rigid2_below(velocities: &[Rigid2Deriv], speed_threshold: f64, rotation_threshold: f64) -> bool {
    let max_speed = running_max(velocities.iter().map(|d| norm2(&d.linear)));
    // Scalar angular velocity, compared unsquared.
    let max_rotation = running_max(velocities.iter().map(|d| d.angular.abs()));

    max_speed < speed_threshold * speed_threshold
        && (rotation_threshold == 0.0 || max_rotation < rotation_threshold)
}

fn rigid3_below(velocities: &[Rigid3Deriv], speed_threshold: f64, rotation_threshold: f64) -> bool {
    let max_speed = running_max(velocities.iter().map(|d| norm2(&d.linear)));
    let max_rotation = running_max(velocities.iter().map(|d| norm2(&d.angular)));

    max_speed < speed_threshold * speed_threshold
        && (rotation_threshold == 0.0 || max_rotation < rotation_threshold * rotation_threshold)
}
