//! Angular offsets on the sky, in milliarcseconds.

use std::ops::{Neg, Sub};

use serde::{Deserialize, Serialize};

/// An on-sky offset relative to the star, in milliarcseconds.
///
/// Serializes with the field names the instrument templates use,
/// so it can be flattened directly into a template.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    #[serde(rename = "RA offset")]
    pub ra: f64,

    #[serde(rename = "DEC offset")]
    pub dec: f64,
}

impl Offset {
    pub const ZERO: Self = Self { ra: 0.0, dec: 0.0 };

    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// The larger of the two absolute components.
    pub fn max_abs(self) -> f64 {
        self.ra.abs().max(self.dec.abs())
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.ra * factor, self.dec * factor)
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.ra, -self.dec)
    }
}

impl Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.ra - rhs.ra, self.dec - rhs.dec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_abs_ignores_sign() {
        assert_eq!(Offset::new(-1200.0, 300.0).max_abs(), 1200.0);
        assert_eq!(Offset::new(10.0, -20.0).max_abs(), 20.0);
    }

    #[test]
    fn serializes_with_template_field_names() {
        let json = serde_json::to_value(Offset::new(1.5, -2.0)).unwrap();
        assert_eq!(json["RA offset"], 1.5);
        assert_eq!(json["DEC offset"], -2.0);
    }
}
