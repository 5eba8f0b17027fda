use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ScanpaintError, ScanpaintResult};
use crate::raster::surface::Surface;

/// One drawing primitive, as data.
///
/// JSON form is tagged by `"op"`, e.g. `{"op": "rect", "x0": 1, "y0": 1, "x1": 4, "y1": 3,
/// "color": "#ff000080"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Blend one pixel; ignored outside the surface.
    Pixel {
        /// Column.
        x: i64,
        /// Row.
        y: i64,
        /// Source color.
        color: Rgba8,
    },
    /// Axis-aligned box covering `floor(x0)..ceil(x1)` by `floor(y0)..ceil(y1)`.
    Rect {
        /// Left edge.
        x0: f64,
        /// Top edge.
        y0: f64,
        /// Right edge.
        x1: f64,
        /// Bottom edge.
        y1: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// Ellipse inscribed in the given bounding box.
    Ellipse {
        /// Left edge.
        x0: f64,
        /// Top edge.
        y0: f64,
        /// Right edge.
        x1: f64,
        /// Bottom edge.
        y1: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// Square-stamped line between two points, endpoints included.
    Line {
        /// Start column.
        x0: f64,
        /// Start row.
        y0: f64,
        /// End column.
        x1: f64,
        /// End row.
        y1: f64,
        /// Stroke color.
        color: Rgba8,
        /// Stamp size; `0` and `1` both stamp single pixels. Defaults to `1`.
        #[serde(default = "default_line_width")]
        width: u32,
    },
    /// Even-odd fill of the implicitly closed outline.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Fill color.
        color: Rgba8,
    },
}

fn default_line_width() -> u32 {
    1
}

impl DrawCommand {
    /// Paint this command onto `surface`.
    pub fn apply(&self, surface: &mut Surface) {
        match self {
            Self::Pixel { x, y, color } => surface.set_pixel(*x, *y, *color),
            Self::Rect {
                x0,
                y0,
                x1,
                y1,
                color,
            } => surface.fill_rect(*x0, *y0, *x1, *y1, *color),
            Self::Ellipse {
                x0,
                y0,
                x1,
                y1,
                color,
            } => surface.fill_ellipse(*x0, *y0, *x1, *y1, *color),
            Self::Line {
                x0,
                y0,
                x1,
                y1,
                color,
                width,
            } => surface.line(*x0, *y0, *x1, *y1, *color, *width),
            Self::Polygon { points, color } => surface.fill_polygon(points, *color),
        }
    }
}

/// A canvas description plus the ordered commands painted onto it.
///
/// Commands are applied in list order; later commands composite over earlier ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Initial fill; transparent when omitted.
    #[serde(default)]
    pub background: Rgba8,
    /// Painted in order.
    #[serde(default)]
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Empty scene over `background`.
    pub fn new(width: u32, height: u32, background: Rgba8) -> Self {
        Self {
            width,
            height,
            background,
            commands: Vec::new(),
        }
    }

    /// Append a command, painted after all earlier ones.
    pub fn push(&mut self, cmd: DrawCommand) -> &mut Self {
        self.commands.push(cmd);
        self
    }

    /// Parse a scene from JSON text.
    pub fn from_json_str(s: &str) -> ScanpaintResult<Self> {
        serde_json::from_str(s).map_err(|e| ScanpaintError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON stream.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScanpaintResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScanpaintError::serde(format!("parse scene JSON: {e}")))
    }

    /// Read and parse a scene file.
    pub fn from_path(path: impl AsRef<Path>) -> ScanpaintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScanpaintError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize back to indented JSON.
    pub fn to_json_pretty(&self) -> ScanpaintResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanpaintError::serde(format!("serialize scene JSON: {e}")))
    }

    /// Only the canvas size can be invalid; any geometry is accepted and clipped at draw time.
    pub fn validate(&self) -> ScanpaintResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ScanpaintError::validation("scene width/height must be > 0"));
        }
        Ok(())
    }

    /// Paint every command, in order, onto a fresh surface.
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height, commands = self.commands.len()))]
    pub fn render(&self) -> ScanpaintResult<Surface> {
        self.validate()?;
        let mut surface = Surface::new(self.width, self.height, self.background)?;
        for cmd in &self.commands {
            cmd.apply(&mut surface);
        }
        tracing::debug!("scene rendered");
        Ok(surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
