//! The magnetization field: one 3-vector per spatial position.
//!
//! Storage is a `Vec<[f64; 3]>`, so the in-memory layout is exactly the
//! flat `3·Nz` column-major buffer used at the host boundary (vector `i`
//! occupies `[3i, 3i+1, 3i+2]`). Conversions to and from flat buffers are
//! therefore copies at most, never re-strides.

use std::ops::Index;

use crate::error::ShapeError;

/// A single bulk magnetization vector `(Mx, My, Mz)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Magnetization {
    /// Transverse x component.
    pub x: f64,
    /// Transverse y component.
    pub y: f64,
    /// Longitudinal component.
    pub z: f64,
}

impl Magnetization {
    /// Thermal equilibrium, fully longitudinal: `(0, 0, 1)`.
    pub const EQUILIBRIUM: Self = Self::new(0.0, 0.0, 1.0);

    /// Construct from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length `sqrt(Mx² + My² + Mz²)`.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Length of the transverse component `sqrt(Mx² + My²)`.
    pub fn transverse_magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Phase of the transverse component, `atan2(My, Mx)` in radians.
    pub fn transverse_phase(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Components as an array in `[x, y, z]` order.
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Magnetization {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Magnetization> for [f64; 3] {
    fn from(m: Magnetization) -> Self {
        m.to_array()
    }
}

/// An ordered sequence of `Nz` magnetization vectors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MagnetizationField {
    vectors: Vec<[f64; 3]>,
}

impl MagnetizationField {
    /// An empty field (`Nz = 0`).
    pub fn new() -> Self {
        Self::default()
    }

    /// `nz` copies of the same vector.
    pub fn uniform(nz: usize, m: Magnetization) -> Self {
        Self {
            vectors: vec![m.to_array(); nz],
        }
    }

    /// Build from a flat `3·Nz` buffer.
    ///
    /// Fails with [`ShapeError::ShapeMismatch`] if the length is not a
    /// multiple of three.
    pub fn from_flat(flat: &[f64]) -> Result<Self, ShapeError> {
        if flat.len() % 3 != 0 {
            return Err(ShapeError::ShapeMismatch {
                what: "magnetization buffer",
                expected: flat.len() - flat.len() % 3,
                actual: flat.len(),
            });
        }
        let vectors = flat
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Self { vectors })
    }

    /// Flat `3·Nz` view in boundary layout.
    pub fn as_flat(&self) -> &[f64] {
        self.vectors.as_flattened()
    }

    /// Consume the field, returning the flat `3·Nz` buffer.
    pub fn into_flat(self) -> Vec<f64> {
        self.vectors.into_flattened()
    }

    /// Copy the field into a caller-provided flat buffer of exactly `3·Nz`.
    pub fn write_flat(&self, out: &mut [f64]) -> Result<(), ShapeError> {
        let flat = self.as_flat();
        if out.len() != flat.len() {
            return Err(ShapeError::ShapeMismatch {
                what: "output buffer",
                expected: flat.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(flat);
        Ok(())
    }

    /// Number of positions `Nz`.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the field has no positions.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector at position `i`, if in range.
    pub fn get(&self, i: usize) -> Option<Magnetization> {
        self.vectors.get(i).copied().map(Magnetization::from)
    }

    /// Overwrite the vector at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn set(&mut self, i: usize, m: Magnetization) {
        self.vectors[i] = m.to_array();
    }

    /// Iterate over the vectors in position order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Magnetization> + '_ {
        self.vectors.iter().copied().map(Magnetization::from)
    }

    /// Raw per-position storage.
    pub fn vectors(&self) -> &[[f64; 3]] {
        &self.vectors
    }

    /// Mutable per-position storage. Rotation kernels write through this.
    pub fn vectors_mut(&mut self) -> &mut [[f64; 3]] {
        &mut self.vectors
    }

    /// A new field holding only positions `range`.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        Self {
            vectors: self.vectors[range].to_vec(),
        }
    }
}

impl Index<usize> for MagnetizationField {
    type Output = [f64; 3];

    fn index(&self, i: usize) -> &[f64; 3] {
        &self.vectors[i]
    }
}

impl FromIterator<Magnetization> for MagnetizationField {
    fn from_iter<I: IntoIterator<Item = Magnetization>>(iter: I) -> Self {
        Self {
            vectors: iter.into_iter().map(Magnetization::to_array).collect(),
        }
    }
}

impl From<Vec<[f64; 3]>> for MagnetizationField {
    fn from(vectors: Vec<[f64; 3]>) -> Self {
        Self { vectors }
    }
}
