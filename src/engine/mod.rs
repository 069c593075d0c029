mod caster;
mod engine;
mod projection;
mod ray;

pub use caster::{cast_fan, cast_ray};
pub use engine::Engine;
pub use projection::{Projection, Strip};
pub use ray::{Facing, Ray, normalize_angle};
