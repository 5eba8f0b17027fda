use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ScanpaintError, ScanpaintResult};
use crate::raster::blend::over_in_place;
use crate::raster::scanline::{crossing_spans, ellipse_span, polygon_crossings};

/// A fixed-size grid of straight-alpha RGBA8 pixels.
///
/// Pixels are stored row-major, top to bottom, in one flat buffer indexed by
/// `(y * width + x) * 4 + channel`. Every primitive composites with [`crate::over`]; none of
/// them fail on out-of-range geometry, they clip or do nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Create a surface filled with `background`. Zero width or height is rejected.
    pub fn new(width: u32, height: u32, background: Rgba8) -> ScanpaintResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScanpaintError::validation(format!(
                "surface width/height must be > 0 (got {width}x{height})"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                ScanpaintError::validation(format!("surface {width}x{height} is too large"))
            })?;

        let data = background.to_array().repeat(len / 4);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA bytes of row `y`. Panics when `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Iterate rows top to bottom, each `width * 4` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.stride())
    }

    /// Stored color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba8> {
        let idx = self.index(x, y)?;
        let (pixels, _) = self.data.as_chunks::<4>();
        Some(Rgba8::from_array(pixels[idx]))
    }

    /// Composite `color` onto the pixel at `(x, y)`. Out-of-bounds is a no-op.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba8) {
        if let Some(idx) = self.index(x, y) {
            let (pixels, _) = self.data.as_chunks_mut::<4>();
            over_in_place(&mut pixels[idx], color);
        }
    }

    /// Composite over the half-open box `[floor(x0), ceil(x1)) x [floor(y0), ceil(y1))`.
    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        let (cx0, cx1) = self.clip_x(x0.floor() as i64, x1.ceil() as i64);
        let (cy0, cy1) = self.clip_y(y0.floor() as i64, y1.ceil() as i64);
        for y in cy0..cy1 {
            self.blend_span(y, cx0, cx1, color);
        }
    }

    /// Fill the ellipse inscribed in the box `(x0, y0)..(x1, y1)`.
    ///
    /// Rows are tested at their pixel centre and the column span is solved analytically.
    pub fn fill_ellipse(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba8) {
        let cx = (x0 + x1) / 2.0;
        let cy = (y0 + y1) / 2.0;
        let rx = (x1 - x0) / 2.0;
        let ry = (y1 - y0) / 2.0;
        if !(rx > 0.0 && ry > 0.0) || color.a == 0 {
            return;
        }

        let (ry0, ry1) = self.clip_y(y0.floor() as i64, y1.ceil() as i64);
        for y in ry0..ry1 {
            if let Some((sx0, sx1)) = ellipse_span(cx, cy, rx, ry, y) {
                let (sx0, sx1) = self.clip_x(sx0, sx1);
                self.blend_span(y, sx0, sx1, color);
            }
        }
    }

    /// Thick line approximated by stamping a `width x width` square at evenly spaced samples.
    ///
    /// `max(|dx|, |dy|) + 1` samples are taken from `(x0, y0)` to `(x1, y1)` inclusive. Stamps
    /// overlap, so a translucent color accumulates where they do.
    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba8, width: u32) {
        if color.a == 0 {
            return;
        }
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = (dx.abs().max(dy.abs()) as i64).saturating_add(1);
        let half = f64::from(width / 2);
        let denom = (steps - 1).max(1) as f64;

        // Only samples whose stamp can touch the surface; the rest would clip to nothing.
        let reach = half + 1.0;
        let (ix0, ix1) = sample_window(x0, dx, denom, steps, -reach, f64::from(self.width) + reach);
        let (iy0, iy1) = sample_window(y0, dy, denom, steps, -reach, f64::from(self.height) + reach);
        for i in ix0.max(iy0)..ix1.min(iy1) {
            let t = i as f64 / denom;
            let x = x0 + dx * t;
            let y = y0 + dy * t;
            let (sy0, sy1) = self.clip_y((y - half) as i64, (y + half + 1.0) as i64);
            let (sx0, sx1) = self.clip_x((x - half) as i64, (x + half + 1.0) as i64);
            for yy in sy0..sy1 {
                self.blend_span(yy, sx0, sx1, color);
            }
        }
    }

    /// Even-odd scanline fill of the implicitly closed polygon `points`.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        if points.is_empty() || color.a == 0 {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        // Inclusive row range, clipped to the surface.
        let (ry0, ry1) = self.clip_y(min_y.floor() as i64, (max_y.ceil() as i64).saturating_add(1));

        let mut crossings = Vec::with_capacity(points.len());
        for y in ry0..ry1 {
            polygon_crossings(points, y as f64, &mut crossings);
            for (sx0, sx1) in crossing_spans(&crossings) {
                let (sx0, sx1) = self.clip_x(sx0, sx1.saturating_add(1));
                self.blend_span(y, sx0, sx1, color);
            }
        }
    }

    fn stride(&self) -> usize {
        self.width as usize * 4
    }

    // Pixel (not byte) index of an in-bounds coordinate.
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn clip_x(&self, x0: i64, x1: i64) -> (i64, i64) {
        clip(x0, x1, self.width)
    }

    fn clip_y(&self, y0: i64, y1: i64) -> (i64, i64) {
        clip(y0, y1, self.height)
    }

    // Callers pass an already clipped, in-bounds row and column range.
    fn blend_span(&mut self, y: i64, x0: i64, x1: i64, color: Rgba8) {
        if x0 >= x1 {
            return;
        }
        let row = y as usize * self.width as usize;
        let (pixels, _) = self.data.as_chunks_mut::<4>();
        for px in &mut pixels[row + x0 as usize..row + x1 as usize] {
            over_in_place(px, color);
        }
    }
}

/// Half-open range of sample indices in `0..steps` whose coordinate `a + d * i / denom` can fall
/// inside `[lo, hi]`, widened by one sample on each side.
///
/// Non-finite input makes every sample coordinate NaN or infinite, and such stamps are empty.
fn sample_window(a: f64, d: f64, denom: f64, steps: i64, lo: f64, hi: f64) -> (i64, i64) {
    if !a.is_finite() || !d.is_finite() {
        return (0, 0);
    }
    if d == 0.0 {
        return if (lo..=hi).contains(&a) { (0, steps) } else { (0, 0) };
    }
    let at = |v: f64| (v - a) * denom / d;
    let (i_lo, i_hi) = if d > 0.0 { (at(lo), at(hi)) } else { (at(hi), at(lo)) };
    let start = (i_lo.floor() as i64).saturating_sub(1).max(0);
    let end = (i_hi.ceil() as i64).saturating_add(2).min(steps);
    (start, end.max(start))
}

fn clip(lo: i64, hi: i64, extent: u32) -> (i64, i64) {
    let extent = i64::from(extent);
    let lo = lo.clamp(0, extent);
    let hi = hi.clamp(0, extent);
    (lo, hi.max(lo))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
