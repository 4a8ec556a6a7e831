pub mod blend;
pub mod draw;

use blend::Pixel;

pub type Argb = u32;

/// A colour with straight (non-premultiplied) channels and a
/// floating point opacity, as the field describes its strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb([r, g, b]: [u8; 3], a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Packs into ARGB, scaling the opacity by `coverage`.
    pub fn to_argb(self, coverage: f32) -> Argb {
        let a = (self.a * coverage).clamp(0.0, 1.0) * 255.0;
        Argb::compose([a.round() as u8, self.r, self.g, self.b])
    }
}

/// The CPU drawing surface the field renders into.
///
/// Pixels are straight-alpha ARGB and start fully transparent, so the
/// canvas can be layered over any background at presentation time.
pub struct Canvas {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    background: Argb,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            background: 0xFF_0A_0A_14,
        }
    }

    pub fn set_background(&mut self, bg: Argb) {
        self.background = bg | 0xFF_00_00_00;
    }

    pub fn sizeu(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer[..self.width * self.height]
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        let len = w * h;
        self.buffer.clear();
        self.buffer.resize(len, Argb::trans());
        self.width = w;
        self.height = h;
    }

    pub fn is_in_bound(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Argb {
        self.buffer[y * self.width + x]
    }

    pub fn set_pixel_xy(&mut self, x: i32, y: i32, c: Argb) {
        if !self.is_in_bound(x, y) {
            return;
        }

        let i = y as usize * self.width + x as usize;
        let p = &mut self.buffer[i];
        *p = p.mix(c);
    }

    /// Composites the canvas over the background into `dest`.
    ///
    /// `dest_width` is the row stride of the destination. Rows and
    /// columns outside the canvas are filled with the background.
    pub fn present_to(&self, dest: &mut [Argb], dest_width: usize) {
        if dest_width == 0 {
            return;
        }

        let bg = self.background;

        for (y, dst_row) in dest.chunks_exact_mut(dest_width).enumerate() {
            let src_row = match y < self.height {
                true => self.buffer.get(y * self.width..(y + 1) * self.width),
                false => None,
            };

            match src_row {
                Some(src_row) => {
                    let mut src = src_row.iter();
                    dst_row.iter_mut().for_each(|dst| {
                        *dst = src.next().map_or(bg, |&p| bg.mix(p)) & 0x00_FF_FF_FF
                    });
                }
                None => dst_row.fill(bg & 0x00_FF_FF_FF),
            }
        }
    }
}
