//! Scanpaint is a small CPU rasterizer with a self-contained PNG writer.
//!
//! # Pipeline overview
//!
//! 1. **Draw**: create a [`Surface`] and issue primitives (`set_pixel`, `fill_rect`,
//!    `fill_ellipse`, `line`, `fill_polygon`). Each one composites with the straight-alpha
//!    [`over`] operator; order matters wherever shapes overlap.
//! 2. **Encode**: [`encode_png`] turns a finished surface into signature, `IHDR`, one `IDAT` and
//!    `IEND`, with unfiltered rows and zlib-wrapped deflate data.
//!
//! A [`Scene`] carries the same primitives as JSON data, for callers that produce drawings
//! outside of Rust.
//!
//! Geometry never fails: coordinates outside the surface are clipped and degenerate shapes draw
//! nothing. Errors come only from zero-sized surfaces, invalid settings, scene parsing, the
//! compressor and IO.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod encode;
mod foundation;
mod raster;
mod scene;

pub use batch::{BatchJob, render_batch};
pub use encode::crc::{Crc32, crc32};
pub use encode::png::{
    CHUNK_IDAT, CHUNK_IEND, CHUNK_IHDR, EncodeConfig, PNG_SIGNATURE, encode_png, encode_png_with,
    ensure_parent_dir, save_png, write_chunk, write_png,
};
pub use foundation::core::{Point, Rgba8};
pub use foundation::error::{ScanpaintError, ScanpaintResult};
pub use raster::blend::{over, over_in_place};
pub use raster::scanline::{crossing_spans, ellipse_span, polygon_crossings};
pub use raster::surface::Surface;
pub use scene::model::{DrawCommand, Scene};
