//! Compact coding of gradient directions.
//!
//! A gradient is coded by the face of the unit cube its direction points
//! through, followed by the two remaining components quantized within that
//! face. With a component budget of `b` bits the code has the form
//! `face << 2b | n1 << b | n2`, and the zero vector is given the reserved
//! code `6 << 2b`. Only the direction is kept: magnitudes are lost.
use std::convert::TryFrom;

/// The seven cases of a decoded gradient code.
///
/// Faces are named after the dominant axis and its sign. The two payload
/// values are the remaining components in axis order, so that
/// `NegX(gy, gz)` stands for the gradient `(-norm, gy, gz)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    /// Face 0, dominated by a negative x component.
    NegX(f64, f64),
    /// Face 1, dominated by a negative y component.
    NegY(f64, f64),
    /// Face 2, dominated by a negative z component.
    NegZ(f64, f64),
    /// Face 3, dominated by a positive x component.
    PosX(f64, f64),
    /// Face 4, dominated by a positive y component.
    PosY(f64, f64),
    /// Face 5, dominated by a positive z component.
    PosZ(f64, f64),
    /// The zero vector.
    Zero,
}

impl Direction {
    /// The face index of this direction, 6 for the zero vector.
    pub fn face(&self) -> u16 {
        match self {
            Direction::NegX(..) => 0,
            Direction::NegY(..) => 1,
            Direction::NegZ(..) => 2,
            Direction::PosX(..) => 3,
            Direction::PosY(..) => 4,
            Direction::PosZ(..) => 5,
            Direction::Zero => 6,
        }
    }

    /// Reconstruct the gradient vector, with the dominant component at
    /// `±norm`.
    pub fn to_vector(&self, norm: f64) -> [f64; 3] {
        match *self {
            Direction::NegX(a, b) => [-norm, a, b],
            Direction::NegY(a, b) => [a, -norm, b],
            Direction::NegZ(a, b) => [a, b, -norm],
            Direction::PosX(a, b) => [norm, a, b],
            Direction::PosY(a, b) => [a, norm, b],
            Direction::PosZ(a, b) => [a, b, norm],
            Direction::Zero => [0.; 3],
        }
    }
}

/// A gradient coding scheme, defined by its component bit budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GradientCoding {
    component_bits: u32,
}

impl GradientCoding {
    /// Coding of surface normals: 4 bits per component.
    pub const NORMAL: GradientCoding = GradientCoding { component_bits: 4 };
    /// Coding of boundary gradients: 6 bits per component.
    pub const BOUNDARY: GradientCoding = GradientCoding { component_bits: 6 };

    /// Create a coding with the given number of bits per component.
    ///
    /// # Panics
    ///
    /// If the codes would not fit in 16 bits (more than 6 bits per
    /// component) or `component_bits` is zero.
    pub fn new(component_bits: u32) -> Self {
        assert!(
            (1..=6).contains(&component_bits),
            "invalid component bit budget {}",
            component_bits
        );
        GradientCoding { component_bits }
    }

    /// Number of bits of each quantized component.
    pub fn component_bits(&self) -> u32 {
        self.component_bits
    }

    /// Half the range of a quantized component, which is also the
    /// magnitude of the dominant component on decoding.
    pub fn norm(&self) -> u32 {
        1 << (self.component_bits - 1)
    }

    /// Number of distinct codes, the zero vector included.
    pub fn codes(&self) -> u32 {
        (6 << (2 * self.component_bits)) + 1
    }

    /// The reserved code of the zero vector.
    pub fn zero_code(&self) -> u16 {
        (6 << (2 * self.component_bits)) as u16
    }

    /// Code the direction of the gradient `(gx, gy, gz)`.
    ///
    /// The face is chosen by looking at x, then y, then z, a later
    /// component only taking over when its magnitude is strictly greater.
    pub fn encode(&self, gx: f64, gy: f64, gz: f64) -> u16 {
        let mut face = 6;
        let mut max = 0.;
        if gx < 0. {
            face = 0;
            max = -gx;
        } else if gx > 0. {
            face = 3;
            max = gx;
        }
        if gy < -max {
            face = 1;
            max = -gy;
        } else if gy > max {
            face = 4;
            max = gy;
        }
        if gz < -max {
            face = 2;
            max = -gz;
        } else if gz > max {
            face = 5;
            max = gz;
        }
        let (nu1, nu2) = match face {
            0 | 3 => (-gy, -gz),
            1 | 4 => (-gx, -gz),
            2 | 5 => (-gx, -gy),
            _ => return self.zero_code(),
        };
        let n1 = self.quantize(nu1 / max);
        let n2 = self.quantize(nu2 / max);
        ((face << (2 * self.component_bits)) | (n1 << self.component_bits) | n2) as u16
    }

    /// Decode a gradient code. Codes of face 6 and above decode to the
    /// zero vector.
    pub fn decode(&self, code: u16) -> Direction {
        let b = self.component_bits;
        let mask = (1u32 << b) - 1;
        let code = u32::from(code);
        let norm = f64::from(self.norm());
        let c1 = norm - (f64::from((code >> b) & mask) + 0.5);
        let c2 = norm - (f64::from(code & mask) + 0.5);
        match code >> (2 * b) {
            0 => Direction::NegX(c1, c2),
            1 => Direction::NegY(c1, c2),
            2 => Direction::NegZ(c1, c2),
            3 => Direction::PosX(c1, c2),
            4 => Direction::PosY(c1, c2),
            5 => Direction::PosZ(c1, c2),
            _ => Direction::Zero,
        }
    }

    /// Decode a gradient code straight into a vector.
    pub fn decode_vector(&self, code: u16) -> [f64; 3] {
        self.decode(code).to_vector(f64::from(self.norm()))
    }

    /// Map a ratio in `[-1, 1]` to a component in `[0, 2 norm - 1]`.
    fn quantize(&self, ratio: f64) -> u32 {
        let norm = f64::from(self.norm());
        // truncation toward zero, then saturation of the top value
        let n = u32::try_from((ratio * norm + norm) as i64).unwrap_or(0);
        n.min(2 * self.norm() - 1)
    }
}
