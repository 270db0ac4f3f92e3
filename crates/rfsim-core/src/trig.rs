//! Precomputed cosine/sine tables driving the rotations.
//!
//! The simulator never evaluates a trigonometric function itself: callers
//! supply `(cos, sin)` pairs. Each pair is expected to lie on the unit
//! circle. That is not checked on construction; [`TrigPair::unit_error`]
//! and the `check_unit` methods exist for callers (and the kernel's
//! optional tolerance check) that want it verified.

use crate::error::ShapeError;

/// A `(cos, sin)` pair for one rotation angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrigPair {
    /// Cosine of the angle.
    pub cos: f64,
    /// Sine of the angle.
    pub sin: f64,
}

impl TrigPair {
    /// The zero angle `(1, 0)`.
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    /// Construct from raw cosine and sine.
    pub const fn new(cos: f64, sin: f64) -> Self {
        Self { cos, sin }
    }

    /// Construct from an angle in radians.
    pub fn from_angle(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { cos, sin }
    }

    /// `atan2(sin, cos)`.
    pub fn angle(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    /// Distance from the unit circle, `|cos² + sin² − 1|`.
    pub fn unit_error(&self) -> f64 {
        (self.cos * self.cos + self.sin * self.sin - 1.0).abs()
    }
}

/// Split parallel `(cos, sin)` columns, checking lengths.
fn paired(
    what: &'static str,
    cos: Vec<f64>,
    sin: Vec<f64>,
) -> Result<(Vec<f64>, Vec<f64>), ShapeError> {
    if cos.len() != sin.len() {
        return Err(ShapeError::ShapeMismatch {
            what,
            expected: cos.len(),
            actual: sin.len(),
        });
    }
    Ok((cos, sin))
}

/// First index whose pair is further than `tol` from the unit circle.
fn first_off_circle(cos: &[f64], sin: &[f64], tol: f64) -> Option<(usize, f64)> {
    cos.iter()
        .zip(sin)
        .map(|(&c, &s)| TrigPair::new(c, s).unit_error())
        .enumerate()
        // NaN compares false, so it is reported as off-circle too.
        .find(|&(_, err)| !(err <= tol))
}

/// Per-position precession trig table: `cos θᵢ`, `sin θᵢ` for `i in 0..Nz`.
///
/// `θᵢ` is the phase accrued at position `i` during one time step (from
/// off-resonance or gradient-induced dephasing). The same angle applies at
/// every step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrecessionTable {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl PrecessionTable {
    /// Build from parallel cosine and sine columns.
    pub fn new(cos: Vec<f64>, sin: Vec<f64>) -> Result<Self, ShapeError> {
        let (cos, sin) = paired("cos_theta/sin_theta", cos, sin)?;
        Ok(Self { cos, sin })
    }

    /// Build from per-position angles in radians.
    pub fn from_angles(theta: &[f64]) -> Self {
        let (cos, sin) = theta.iter().map(|t| (t.cos(), t.sin())).unzip();
        Self { cos, sin }
    }

    /// `nz` positions with no precession.
    pub fn identity(nz: usize) -> Self {
        Self {
            cos: vec![1.0; nz],
            sin: vec![0.0; nz],
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.cos.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    /// Cosine column.
    pub fn cos(&self) -> &[f64] {
        &self.cos
    }

    /// Sine column.
    pub fn sin(&self) -> &[f64] {
        &self.sin
    }

    /// Pair for position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn pair(&self, i: usize) -> TrigPair {
        TrigPair::new(self.cos[i], self.sin[i])
    }

    /// Verify every entry lies within `tol` of the unit circle.
    pub fn check_unit(&self, tol: f64) -> Result<(), ShapeError> {
        match first_off_circle(&self.cos, &self.sin, tol) {
            Some((index, error)) => Err(ShapeError::NotUnitCircle {
                table: "precession",
                index,
                error,
            }),
            None => Ok(()),
        }
    }
}

/// Per-step RF tip trig table: `cos αₜ`, `sin αₜ` for `t in 0..Nt`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TipTable {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl TipTable {
    /// Build from parallel cosine and sine columns.
    pub fn new(cos: Vec<f64>, sin: Vec<f64>) -> Result<Self, ShapeError> {
        let (cos, sin) = paired("cos_alpha/sin_alpha", cos, sin)?;
        Ok(Self { cos, sin })
    }

    /// Build from per-step flip angles in radians.
    pub fn from_flip_angles(alpha: &[f64]) -> Self {
        let (cos, sin) = alpha.iter().map(|a| (a.cos(), a.sin())).unzip();
        Self { cos, sin }
    }

    /// `nt` steps with zero flip angle (free precession only).
    pub fn zero_flip(nt: usize) -> Self {
        Self {
            cos: vec![1.0; nt],
            sin: vec![0.0; nt],
        }
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.cos.len()
    }

    /// Whether the pulse has no steps.
    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    /// Cosine column.
    pub fn cos(&self) -> &[f64] {
        &self.cos
    }

    /// Sine column.
    pub fn sin(&self) -> &[f64] {
        &self.sin
    }

    /// Iterate the steps in time order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = TrigPair> + '_ {
        self.cos
            .iter()
            .zip(&self.sin)
            .map(|(&c, &s)| TrigPair::new(c, s))
    }

    /// Verify every entry lies within `tol` of the unit circle.
    pub fn check_unit(&self, tol: f64) -> Result<(), ShapeError> {
        match first_off_circle(&self.cos, &self.sin, tol) {
            Some((index, error)) => Err(ShapeError::NotUnitCircle {
                table: "tip",
                index,
                error,
            }),
            None => Ok(()),
        }
    }
}

/// Pulse-wide RF phase `(cp, sp) = (cos φ, sin φ)`.
///
/// Fixes the transverse axis about which every tip rotation turns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RfPhase {
    /// Cosine of the RF phase.
    pub cp: f64,
    /// Sine of the RF phase.
    pub sp: f64,
}

impl RfPhase {
    /// Phase along +x.
    pub const X: Self = Self { cp: 1.0, sp: 0.0 };

    /// Phase along +y.
    pub const Y: Self = Self { cp: 0.0, sp: 1.0 };

    /// Construct from raw cosine and sine.
    pub const fn new(cp: f64, sp: f64) -> Self {
        Self { cp, sp }
    }

    /// Construct from a phase angle in radians.
    pub fn from_angle(phi: f64) -> Self {
        let (sp, cp) = phi.sin_cos();
        Self { cp, sp }
    }

    /// `atan2(sp, cp)`.
    pub fn angle(&self) -> f64 {
        self.sp.atan2(self.cp)
    }

    /// Verify the pair lies within `tol` of the unit circle.
    pub fn check_unit(&self, tol: f64) -> Result<(), ShapeError> {
        let error = TrigPair::new(self.cp, self.sp).unit_error();
        if error <= tol {
            Ok(())
        } else {
            Err(ShapeError::NotUnitCircle {
                table: "rf_phase",
                index: 0,
                error,
            })
        }
    }
}

impl Default for RfPhase {
    fn default() -> Self {
        Self::X
    }
}
