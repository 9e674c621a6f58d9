//! Value types for light control parameters.

mod color;
mod dimming;
mod kelvin;
mod scene;
mod speed;

pub use color::Color;
pub use dimming::Dimming;
pub use kelvin::Kelvin;
pub use scene::{BAD_SCENE, Scene, scene_id};
pub use speed::Speed;
