use super::{blend::Pixel, Canvas, Rgba};
use crate::field::surface::DrawSurface;
use crate::math::{Vec2, P2};

impl Canvas {
    /// Fills a disc with per-pixel coverage, so sub-pixel radii still
    /// show up as faint dots instead of vanishing.
    pub fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }

        let reach = radius + 0.5;

        let xs = (center.x - reach).floor() as i32;
        let xe = (center.x + reach).ceil() as i32;
        let ys = (center.y - reach).floor() as i32;
        let ye = (center.y + reach).ceil() as i32;

        for y in ys..=ye {
            for x in xs..=xe {
                if !self.is_in_bound(x, y) {
                    continue;
                }

                let pixel_center = Vec2::<f32>::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (reach - pixel_center.dist(center)).clamp(0.0, 1.0);

                if coverage > 0.0 {
                    self.set_pixel_xy(x, y, color.to_argb(coverage));
                }
            }
        }
    }

    // Using Bresenham's line algorithm. Thin strokes are approximated
    // by scaling the opacity with the width.
    pub fn draw_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, width: f32, color: Rgba) {
        let c = color.to_argb(width.clamp(0.0, 1.0));

        if c.alpha() == 0 {
            return;
        }

        let ps = from.to_p2();
        let pe = to.to_p2();

        let dx = (pe.x - ps.x).abs();
        let sx = if ps.x < pe.x { 1 } else { -1 };
        let dy = -(pe.y - ps.y).abs();
        let sy = if ps.y < pe.y { 1 } else { -1 };
        let mut error = dx + dy;

        let mut p: P2 = ps;

        loop {
            self.set_pixel_xy(p.x, p.y, c);

            if p.x == pe.x && p.y == pe.y {
                return;
            }
            let e2 = error * 2;

            if e2 >= dy {
                if p.x == pe.x {
                    return;
                }
                error += dy;
                p.x += sx;
            }

            if e2 <= dx {
                if p.y == pe.y {
                    return;
                }
                error += dx;
                p.y += sy;
            }
        }
    }
}

impl DrawSurface for Canvas {
    fn size(&self) -> (usize, usize) {
        self.sizeu()
    }

    fn resize(&mut self, width: usize, height: usize) {
        Canvas::resize(self, width, height);
    }

    fn clear(&mut self) {
        Canvas::clear(self);
    }

    fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, color: Rgba) {
        Canvas::fill_disc(self, center, radius, color);
    }

    fn stroke_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, width: f32, color: Rgba) {
        Canvas::draw_line(self, from, to, width, color);
    }
}
