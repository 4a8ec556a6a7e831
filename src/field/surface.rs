use crate::graphics::Rgba;
use crate::math::Vec2;

/// The drawing port of the field.
///
/// [`Canvas`](crate::graphics::Canvas) is the real implementation; tests
/// substitute a recorder. Coordinates are in surface pixels and may lie
/// slightly outside the surface, implementations clip.
pub trait DrawSurface {
    fn size(&self) -> (usize, usize);

    /// Reshapes the surface. The previous contents are discarded.
    fn resize(&mut self, width: usize, height: usize);

    fn clear(&mut self);

    fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, width: f32, color: Rgba);
}
