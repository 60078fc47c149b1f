//! Wall segments and line-of-sight occlusion.

use crate::math::{segments_intersect, Vec2};
use crate::scene::Material;

/// A wall: an inert line segment in the plane, optionally carrying an
/// acoustic material.
///
/// Walls never move on their own; the scene replaces the whole set when
/// geometry changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub start: Vec2,
    pub end: Vec2,
    /// Material override; walls without one use the scene-wide transmission
    pub material: Option<Material>,
}

impl Wall {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            material: None,
        }
    }

    pub fn with_material(start: Vec2, end: Vec2, material: Material) -> Self {
        Self {
            start,
            end,
            material: Some(material),
        }
    }

    /// True when this wall properly crosses the open segment `a..b`.
    pub fn blocks(&self, a: Vec2, b: Vec2) -> bool {
        segments_intersect(a, b, self.start, self.end)
    }
}

/// Number of walls crossing the direct path from `a` to `b`.
pub fn walls_between(a: Vec2, b: Vec2, walls: &[Wall]) -> usize {
    walls.iter().filter(|wall| wall.blocks(a, b)).count()
}

/// Uniform occlusion factor: each crossed wall passes `per_wall` of the
/// remaining energy, so `count` walls leave `per_wall^count`.
pub fn wall_attenuation(count: usize, per_wall: f32) -> f32 {
    per_wall.clamp(0.0, 1.0).powi(count as i32)
}

/// Material-aware occlusion along `a..b`.
///
/// Returns the number of crossed walls together with the product of each
/// crossed wall's transmission. Walls without a material contribute
/// `default_transmission`, so a scene that never attaches materials
/// behaves exactly like [`wall_attenuation`]. An unobstructed path yields
/// `(0, 1.0)`.
pub fn transmission_between(
    a: Vec2,
    b: Vec2,
    walls: &[Wall],
    default_transmission: f32,
) -> (usize, f32) {
    let default_transmission = default_transmission.clamp(0.0, 1.0);
    let mut count = 0;
    let mut remaining = 1.0f32;
    for wall in walls {
        if wall.blocks(a, b) {
            count += 1;
            remaining *= wall
                .material
                .map_or(default_transmission, |m| m.transmission.clamp(0.0, 1.0));
        }
    }
    (count, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_wall(x: f32) -> Wall {
        Wall::new(Vec2::new(x, -10.0), Vec2::new(x, 10.0))
    }

    #[test]
    fn counts_crossing_walls() {
        let walls = vec![vertical_wall(1.0), vertical_wall(3.0), vertical_wall(8.0)];
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(5.0, 0.0);
        assert_eq!(walls_between(a, b, &walls), 2);
    }

    #[test]
    fn coincident_endpoints_cross_nothing() {
        let walls = vec![vertical_wall(0.0)];
        let p = Vec2::new(0.0, 0.0);
        assert_eq!(walls_between(p, p, &walls), 0);
    }

    #[test]
    fn attenuation_compounds_per_wall() {
        assert_eq!(wall_attenuation(0, 0.3), 1.0);
        assert!((wall_attenuation(1, 0.3) - 0.3).abs() < 1e-6);
        assert!((wall_attenuation(2, 0.3) - 0.09).abs() < 1e-6);
    }

    #[test]
    fn attenuation_clamps_factor() {
        assert_eq!(wall_attenuation(3, 1.5), 1.0);
        assert_eq!(wall_attenuation(2, -0.1), 0.0);
    }

    #[test]
    fn transmission_uses_material_when_present() {
        let walls = vec![
            Wall::with_material(Vec2::new(1.0, -10.0), Vec2::new(1.0, 10.0), Material::GLASS),
            vertical_wall(3.0),
        ];
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(5.0, 0.0);
        let (count, remaining) = transmission_between(a, b, &walls, 0.3);
        assert_eq!(count, 2);
        // glass 0.40 times default 0.3
        assert!((remaining - 0.12).abs() < 1e-6);
    }

    #[test]
    fn unobstructed_path_is_transparent() {
        let walls = vec![vertical_wall(9.0)];
        let (count, remaining) =
            transmission_between(Vec2::ZERO, Vec2::new(5.0, 0.0), &walls, 0.3);
        assert_eq!(count, 0);
        assert_eq!(remaining, 1.0);
    }

    #[test]
    fn default_material_matches_uniform_attenuation() {
        let walls = vec![vertical_wall(1.0), vertical_wall(2.0)];
        let a = Vec2::ZERO;
        let b = Vec2::new(5.0, 0.0);
        let (count, remaining) = transmission_between(a, b, &walls, 0.3);
        assert!((remaining - wall_attenuation(count, 0.3)).abs() < 1e-6);
    }

    #[test]
    fn path_grazing_wall_endpoint_is_clear() {
        let wall = Wall::new(Vec2::new(2.0, 0.0), Vec2::new(2.0, 5.0));
        // Path passes exactly through the wall's lower endpoint.
        assert!(!wall.blocks(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)));
    }
}
