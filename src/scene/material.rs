//! Acoustic material properties for wall occlusion.

use crate::error::{Result, RoomtoneError};

/// Acoustic properties of a wall surface.
///
/// Single-band fractions of sound energy in [0.0, 1.0]:
/// - **Absorption**: energy soaked up on contact
/// - **Transmission**: energy passing through to the far side
///
/// Occlusion only consumes `transmission`; absorption is carried so scene
/// editors can round-trip material data without loss.
///
/// # Example
///
/// ```
/// use roomtone::Material;
///
/// // Use a preset material
/// let wall = Material::BRICK;
///
/// // Or create a custom one
/// let padded = Material {
///     absorption: 0.8,
///     transmission: 0.1,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Fraction of sound energy absorbed on contact (0.0 - 1.0)
    pub absorption: f32,

    /// Fraction of sound energy transmitted through the surface (0.0 - 1.0)
    ///
    /// Higher values = more transparent (curtain, thin glass)
    /// Lower values = more blocking (concrete, metal)
    pub transmission: f32,
}

impl Material {
    /// Generic default material with moderate acoustic properties
    pub const GENERIC: Self = Self {
        absorption: 0.20,
        transmission: 0.30,
    };

    /// Brick - hard, very little gets through
    pub const BRICK: Self = Self {
        absorption: 0.04,
        transmission: 0.02,
    };

    /// Concrete - excellent sound blocking
    pub const CONCRETE: Self = Self {
        absorption: 0.07,
        transmission: 0.01,
    };

    /// Glass - hard but acoustically leaky
    pub const GLASS: Self = Self {
        absorption: 0.03,
        transmission: 0.40,
    };

    /// Plaster on studs - typical interior wall
    pub const PLASTER: Self = Self {
        absorption: 0.06,
        transmission: 0.25,
    };

    /// Wood panelling
    pub const WOOD: Self = Self {
        absorption: 0.07,
        transmission: 0.15,
    };

    /// Sheet metal
    pub const METAL: Self = Self {
        absorption: 0.07,
        transmission: 0.05,
    };

    /// Heavy curtain - absorbs a lot, blocks almost nothing
    pub const CURTAIN: Self = Self {
        absorption: 0.69,
        transmission: 0.70,
    };

    /// Checks that both fractions lie in [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("absorption", self.absorption),
            ("transmission", self.transmission),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RoomtoneError::Configuration(format!(
                    "{name} must be in [0.0, 1.0], got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::GENERIC
    }
}
