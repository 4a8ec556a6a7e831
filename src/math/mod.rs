pub mod vec2;

/// A two-component vector. Positions and velocities of the field live in
/// `Vec2<f32>`, raster coordinates in `Vec2<i32>`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type P2 = Vec2<i32>;
