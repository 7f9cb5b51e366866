//! The single-qubit Clifford group.
//!
//! An element is stored as its action on the Pauli operators under
//! conjugation: `C X C† = ±P` and `C Z C† = ±Q` with `P ≠ Q`. Six ordered
//! axis pairs and four sign choices give the 24 group elements. Global phase
//! is not tracked, so two elements compare equal exactly when they act
//! identically on every Pauli.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};

/// A Pauli axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Pauli X.
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z.
    Z,
}

impl Axis {
    /// All three axes in X, Y, Z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in a Bloch vector.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The axis that is neither `self` nor `other`, and whether
    /// `(self, other, third)` is a cyclic permutation of `(X, Y, Z)`.
    ///
    /// `self` and `other` must differ.
    fn third(self, other: Axis) -> (Axis, bool) {
        match (self, other) {
            (Axis::X, Axis::Y) => (Axis::Z, true),
            (Axis::Y, Axis::Z) => (Axis::X, true),
            (Axis::Z, Axis::X) => (Axis::Y, true),
            (Axis::Y, Axis::X) => (Axis::Z, false),
            (Axis::Z, Axis::Y) => (Axis::X, false),
            (Axis::X, Axis::Z) => (Axis::Y, false),
            // Equal axes never reach here; `Clifford` construction rejects them.
            (a, _) => (a, false),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// A Pauli operator with a ±1 sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedPauli {
    /// The Pauli axis.
    pub axis: Axis,
    /// Whether the sign is −1.
    pub negative: bool,
}

impl SignedPauli {
    /// Create a signed Pauli.
    pub const fn new(axis: Axis, negative: bool) -> Self {
        Self { axis, negative }
    }

    /// `+P`.
    pub const fn plus(axis: Axis) -> Self {
        Self::new(axis, false)
    }

    /// `−P`.
    pub const fn minus(axis: Axis) -> Self {
        Self::new(axis, true)
    }

    /// The sign as a float.
    pub fn sign(self) -> f64 {
        if self.negative { -1.0 } else { 1.0 }
    }
}

impl fmt::Display for SignedPauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { '-' } else { '+' };
        write!(f, "{sign}{}", self.axis)
    }
}

/// An element of the single-qubit Clifford group.
///
/// Deserialization goes through [`Clifford::from_images`], so parallel
/// images are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawClifford")]
pub struct Clifford {
    x: SignedPauli,
    z: SignedPauli,
}

#[derive(Deserialize)]
struct RawClifford {
    x: SignedPauli,
    z: SignedPauli,
}

impl TryFrom<RawClifford> for Clifford {
    type Error = IrError;

    fn try_from(raw: RawClifford) -> IrResult<Self> {
        Clifford::from_images(raw.x, raw.z)
    }
}

const fn cliff(x: SignedPauli, z: SignedPauli) -> Clifford {
    Clifford { x, z }
}

impl Clifford {
    /// Identity.
    pub const I: Clifford = cliff(SignedPauli::plus(Axis::X), SignedPauli::plus(Axis::Z));
    /// Pauli X.
    pub const X: Clifford = cliff(SignedPauli::plus(Axis::X), SignedPauli::minus(Axis::Z));
    /// Pauli Y.
    pub const Y: Clifford = cliff(SignedPauli::minus(Axis::X), SignedPauli::minus(Axis::Z));
    /// Pauli Z.
    pub const Z: Clifford = cliff(SignedPauli::minus(Axis::X), SignedPauli::plus(Axis::Z));
    /// Hadamard.
    pub const H: Clifford = cliff(SignedPauli::plus(Axis::Z), SignedPauli::plus(Axis::X));
    /// Phase gate, sqrt(Z).
    pub const S: Clifford = cliff(SignedPauli::plus(Axis::Y), SignedPauli::plus(Axis::Z));
    /// Inverse phase gate.
    pub const SDG: Clifford = cliff(SignedPauli::minus(Axis::Y), SignedPauli::plus(Axis::Z));
    /// sqrt(X).
    pub const SX: Clifford = cliff(SignedPauli::plus(Axis::X), SignedPauli::minus(Axis::Y));
    /// Inverse of sqrt(X).
    pub const SXDG: Clifford = cliff(SignedPauli::plus(Axis::X), SignedPauli::plus(Axis::Y));
    /// sqrt(Y).
    pub const SY: Clifford = cliff(SignedPauli::minus(Axis::Z), SignedPauli::plus(Axis::X));
    /// Inverse of sqrt(Y).
    pub const SYDG: Clifford = cliff(SignedPauli::plus(Axis::Z), SignedPauli::minus(Axis::X));

    /// Named elements, in the order they are listed by tooling.
    pub const NAMED: [(&'static str, Clifford); 11] = [
        ("I", Clifford::I),
        ("X", Clifford::X),
        ("Y", Clifford::Y),
        ("Z", Clifford::Z),
        ("H", Clifford::H),
        ("S", Clifford::S),
        ("Sdg", Clifford::SDG),
        ("SX", Clifford::SX),
        ("SXdg", Clifford::SXDG),
        ("SY", Clifford::SY),
        ("SYdg", Clifford::SYDG),
    ];

    /// Build an element from the images of X and Z under conjugation.
    pub fn from_images(x: SignedPauli, z: SignedPauli) -> IrResult<Self> {
        if x.axis == z.axis {
            return Err(IrError::InvalidClifford { x, z });
        }
        Ok(cliff(x, z))
    }

    /// Image of X under conjugation.
    pub fn x_image(&self) -> SignedPauli {
        self.x
    }

    /// Image of Z under conjugation.
    pub fn z_image(&self) -> SignedPauli {
        self.z
    }

    /// Image of Y under conjugation.
    ///
    /// Follows from `Y = iXZ`: `C Y C† = i (C X C†)(C Z C†)`.
    pub fn y_image(&self) -> SignedPauli {
        let (axis, cyclic) = self.x.axis.third(self.z.axis);
        SignedPauli::new(axis, cyclic ^ self.x.negative ^ self.z.negative)
    }

    /// Conjugate a signed Pauli: `C P C†`.
    pub fn image(&self, pauli: SignedPauli) -> SignedPauli {
        let image = match pauli.axis {
            Axis::X => self.x,
            Axis::Y => self.y_image(),
            Axis::Z => self.z,
        };
        SignedPauli::new(image.axis, image.negative ^ pauli.negative)
    }

    /// The element equal to applying `self` first and then `next`.
    pub fn then(&self, next: &Clifford) -> Clifford {
        cliff(next.image(self.x), next.image(self.z))
    }

    /// The unique inverse element.
    pub fn inverse(&self) -> Clifford {
        // Element orders in this group are 1, 2, 3 or 4, so C^12 = I.
        (0..11).fold(Clifford::I, |acc, _| acc.then(self))
    }

    /// Whether this is the identity element.
    pub fn is_identity(&self) -> bool {
        *self == Clifford::I
    }

    /// The gate name, if this element is one of [`Clifford::NAMED`].
    pub fn name(&self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, c)| c == self)
            .map(|(name, _)| *name)
    }

    /// All 24 group elements.
    pub fn all() -> impl Iterator<Item = Clifford> {
        Axis::ALL.into_iter().flat_map(|x_axis| {
            Axis::ALL
                .into_iter()
                .filter(move |z_axis| *z_axis != x_axis)
                .flat_map(move |z_axis| {
                    [false, true].into_iter().flat_map(move |x_neg| {
                        [false, true].into_iter().map(move |z_neg| {
                            cliff(
                                SignedPauli::new(x_axis, x_neg),
                                SignedPauli::new(z_axis, z_neg),
                            )
                        })
                    })
                })
        })
    }

    /// Act on a Bloch vector `(x, y, z)`.
    ///
    /// The state `(I + r·σ)/2` maps to `(I + Σ r_P C P C†)/2`.
    pub fn apply_bloch(&self, r: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for axis in Axis::ALL {
            let image = self.image(SignedPauli::plus(axis));
            out[image.axis.index()] += image.sign() * r[axis.index()];
        }
        out
    }
}

impl Default for Clifford {
    fn default() -> Self {
        Clifford::I
    }
}

impl fmt::Display for Clifford {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "C(X->{}, Z->{})", self.x, self.z),
        }
    }
}

impl FromStr for Clifford {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" | "id" => Ok(Clifford::I),
            "x" => Ok(Clifford::X),
            "y" => Ok(Clifford::Y),
            "z" => Ok(Clifford::Z),
            "h" => Ok(Clifford::H),
            "s" | "sqrt_z" => Ok(Clifford::S),
            "sdg" => Ok(Clifford::SDG),
            "sx" | "sqrt_x" => Ok(Clifford::SX),
            "sxdg" => Ok(Clifford::SXDG),
            "sy" | "sqrt_y" => Ok(Clifford::SY),
            "sydg" => Ok(Clifford::SYDG),
            _ => Err(IrError::UnknownGate(s.to_string())),
        }
    }
}
