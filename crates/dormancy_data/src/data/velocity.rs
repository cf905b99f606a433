use serde::{Deserialize, Serialize};

/// Velocity of a 2D rigid frame: linear velocity of the center plus a scalar
/// angular velocity around the out-of-plane axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Rigid2Deriv {
    pub linear: [f64; 2],
    pub angular: f64,
}

/// Velocity of a 3D rigid frame: linear velocity of the center plus an
/// angular velocity vector.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Rigid3Deriv {
    pub linear: [f64; 3],
    pub angular: [f64; 3],
}

/// The velocity vector of a mechanical state, tagged by its layout.
///
/// Layouts nobody knows how to read are kept as [`Velocities::Opaque`] so the
/// controller can name them when it refuses to track the state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "template", content = "values")]
pub enum Velocities {
    Vec1(Vec<[f64; 1]>),
    Vec2(Vec<[f64; 2]>),
    Vec3(Vec<[f64; 3]>),
    Vec6(Vec<[f64; 6]>),
    Rigid2(Vec<Rigid2Deriv>),
    Rigid3(Vec<Rigid3Deriv>),
    Opaque(String),
}

impl Velocities {
    /// Name of the layout, as reported in diagnostics.
    #[must_use]
    pub fn template_name(&self) -> &str {
        match self {
            Velocities::Vec1(_) => "Vec1d",
            Velocities::Vec2(_) => "Vec2d",
            Velocities::Vec3(_) => "Vec3d",
            Velocities::Vec6(_) => "Vec6d",
            Velocities::Rigid2(_) => "Rigid2d",
            Velocities::Rigid3(_) => "Rigid3d",
            Velocities::Opaque(name) => name,
        }
    }

    /// Number of entries (particles or frames). Opaque layouts report zero.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Velocities::Vec1(v) => v.len(),
            Velocities::Vec2(v) => v.len(),
            Velocities::Vec3(v) => v.len(),
            Velocities::Vec6(v) => v.len(),
            Velocities::Rigid2(v) => v.len(),
            Velocities::Rigid3(v) => v.len(),
            Velocities::Opaque(_) => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Multiplies every component by `factor`. Opaque layouts are left alone.
    pub fn scale(&mut self, factor: f64) {
        fn scale_all<const N: usize>(values: &mut [[f64; N]], factor: f64) {
            for v in values.iter_mut().flat_map(|v| v.iter_mut()) {
                *v *= factor;
            }
        }

        match self {
            Velocities::Vec1(v) => scale_all(v, factor),
            Velocities::Vec2(v) => scale_all(v, factor),
            Velocities::Vec3(v) => scale_all(v, factor),
            Velocities::Vec6(v) => scale_all(v, factor),
            Velocities::Rigid2(v) => {
                for d in v.iter_mut() {
                    d.linear[0] *= factor;
                    d.linear[1] *= factor;
                    d.angular *= factor;
                }
            }
            Velocities::Rigid3(v) => {
                for d in v.iter_mut() {
                    for c in d.linear.iter_mut().chain(d.angular.iter_mut()) {
                        *c *= factor;
                    }
                }
            }
            Velocities::Opaque(_) => {}
        }
    }
}
