//! Scene geometry: wall segments and their acoustic materials.

mod material;
mod wall;

pub use material::Material;
pub use wall::{transmission_between, wall_attenuation, walls_between, Wall};
