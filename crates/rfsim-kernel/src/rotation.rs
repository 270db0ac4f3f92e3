//! The two rotations applied at every time step.
//!
//! Both operate on a single `[Mx, My, Mz]` vector in place. Neither
//! renormalizes; rounding error accumulates and is visible to callers.

use rfsim_core::{RfPhase, TrigPair};

/// Free-precession rotation about z by the position's per-step angle.
///
/// Clockwise in the transverse plane:
/// ```text
/// Mx' =  cos θ · Mx + sin θ · My
/// My' = -sin θ · Mx + cos θ · My
/// Mz' =  Mz
/// ```
/// `Mz` is left untouched.
#[inline]
pub fn precess(m: &mut [f64; 3], theta: TrigPair) {
    let [mx, my, _] = *m;
    m[0] = theta.cos * mx + theta.sin * my;
    m[1] = -theta.sin * mx + theta.cos * my;
}

/// Closed-form RF tip rotation for one time step.
///
/// Rotation by the step's flip angle `α` about the transverse axis at the
/// pulse phase `φ`: a rotation of the transverse plane into the phase
/// frame, a rotation about that axis, and the inverse frame rotation,
/// collapsed into one 3×3 matrix. The coefficients depend only on the
/// step, so they are built once and applied to every position.
///
/// The `Mz` row is applied term by term as `Mz·cα − My·cφ·sα + Mx·sφ·sα`,
/// not through the folded coefficients of [`matrix`](Self::matrix).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TipRotation {
    r: [[f64; 3]; 3],
    alpha: TrigPair,
    phase: RfPhase,
}

impl TipRotation {
    /// Build the rotation for flip `alpha` about the axis fixed by `phase`.
    pub fn new(alpha: TrigPair, phase: RfPhase) -> Self {
        let (ca, sa) = (alpha.cos, alpha.sin);
        let (cp, sp) = (phase.cp, phase.sp);
        Self {
            r: [
                [cp * cp + ca * sp * sp, cp * sp - ca * cp * sp, -(sp * sa)],
                [cp * sp - cp * sp * ca, ca * cp * cp + sp * sp, cp * sa],
                [sp * sa, -(cp * sa), ca],
            ],
            alpha,
            phase,
        }
    }

    /// Row-major coefficients.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        self.r
    }

    /// Apply the rotation to `m` in place.
    #[inline]
    pub fn apply(&self, m: &mut [f64; 3]) {
        let [mx, my, mz] = *m;
        let r = &self.r;
        m[0] = mx * r[0][0] + my * r[0][1] + mz * r[0][2];
        m[1] = my * r[1][1] + mx * r[1][0] + mz * r[1][2];
        let (ca, sa) = (self.alpha.cos, self.alpha.sin);
        let (cp, sp) = (self.phase.cp, self.phase.sp);
        m[2] = mz * ca - my * cp * sa + mx * sp * sa;
    }
}
