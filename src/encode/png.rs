use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use miniz_oxide::deflate::core::{
    CompressorOxide, TDEFLFlush, TDEFLStatus, compress_to_output,
    create_comp_flags_from_zip_params,
};

use crate::encode::crc::Crc32;
use crate::foundation::error::{ScanpaintError, ScanpaintResult};
use crate::raster::surface::Surface;

/// The eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Image header chunk type.
pub const CHUNK_IHDR: [u8; 4] = *b"IHDR";
/// Compressed image data chunk type.
pub const CHUNK_IDAT: [u8; 4] = *b"IDAT";
/// Trailer chunk type.
pub const CHUNK_IEND: [u8; 4] = *b"IEND";

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const COMPRESSION_DEFLATE: u8 = 0;
const FILTER_METHOD_ADAPTIVE: u8 = 0;
const INTERLACE_NONE: u8 = 0;

/// Per-row filter tag; rows are always stored unfiltered.
const FILTER_NONE: u8 = 0;

const MAX_CHUNK_LEN: usize = 0x7FFF_FFFF;
const MAX_COMPRESSION_LEVEL: u8 = 10;

/// Encoder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncodeConfig {
    /// Deflate effort, `0` (stored) to `10`. Affects size only, never the decoded pixels.
    pub compression_level: u8,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            compression_level: 6,
        }
    }
}

impl EncodeConfig {
    /// Reject a compression level above `10`.
    pub fn validate(&self) -> ScanpaintResult<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(ScanpaintError::validation(format!(
                "compression_level must be in 0..={MAX_COMPRESSION_LEVEL} (got {})",
                self.compression_level
            )));
        }
        Ok(())
    }

    /// Replace the compression level. Not validated until encoding.
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }
}

/// Encode `surface` as an RGBA8 PNG with the default settings.
pub fn encode_png(surface: &Surface) -> ScanpaintResult<Vec<u8>> {
    encode_png_with(surface, &EncodeConfig::default())
}

/// Encode `surface` as signature, `IHDR`, a single `IDAT` and `IEND`.
///
/// Output is a pure function of the pixels and `cfg`.
#[tracing::instrument(skip(surface, cfg), fields(width = surface.width(), height = surface.height()))]
pub fn encode_png_with(surface: &Surface, cfg: &EncodeConfig) -> ScanpaintResult<Vec<u8>> {
    cfg.validate()?;

    let raw = filtered_scanlines(surface);
    let idat = deflate_zlib(&raw, cfg.compression_level)?;
    if idat.len() > MAX_CHUNK_LEN {
        return Err(ScanpaintError::validation(format!(
            "compressed image data ({} bytes) exceeds the PNG chunk limit",
            idat.len()
        )));
    }
    tracing::debug!(raw_len = raw.len(), idat_len = idat.len(), "deflated scanlines");

    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + 13 + idat.len());
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, CHUNK_IHDR, &ihdr_payload(surface));
    write_chunk(&mut out, CHUNK_IDAT, &idat);
    write_chunk(&mut out, CHUNK_IEND, &[]);
    Ok(out)
}

/// Encode and write the complete PNG to `w`.
pub fn write_png<W: Write>(surface: &Surface, cfg: &EncodeConfig, mut w: W) -> ScanpaintResult<()> {
    let bytes = encode_png_with(surface, cfg)?;
    w.write_all(&bytes).context("write png bytes")?;
    w.flush().context("flush png writer")?;
    Ok(())
}

/// Encode and write to `path`, creating missing parent directories.
pub fn save_png(
    surface: &Surface,
    cfg: &EncodeConfig,
    path: impl AsRef<Path>,
) -> ScanpaintResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let f = File::create(path)
        .with_context(|| format!("failed to create png file '{}'", path.display()))?;
    write_png(surface, cfg, BufWriter::new(f))
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> ScanpaintResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Append one chunk: big-endian length, tag, payload, CRC-32 of tag followed by payload.
pub fn write_chunk(out: &mut Vec<u8>, tag: [u8; 4], payload: &[u8]) {
    debug_assert!(payload.len() <= MAX_CHUNK_LEN);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&tag);
    out.extend_from_slice(payload);

    let mut crc = Crc32::new();
    crc.update(&tag);
    crc.update(payload);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}

fn ihdr_payload(surface: &Surface) -> [u8; 13] {
    let mut p = [0u8; 13];
    p[0..4].copy_from_slice(&surface.width().to_be_bytes());
    p[4..8].copy_from_slice(&surface.height().to_be_bytes());
    p[8] = BIT_DEPTH;
    p[9] = COLOR_TYPE_RGBA;
    p[10] = COMPRESSION_DEFLATE;
    p[11] = FILTER_METHOD_ADAPTIVE;
    p[12] = INTERLACE_NONE;
    p
}

fn filtered_scanlines(surface: &Surface) -> Vec<u8> {
    let stride = surface.width() as usize * 4;
    let mut raw = Vec::with_capacity((stride + 1) * surface.height() as usize);
    for row in surface.rows() {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

fn deflate_zlib(data: &[u8], level: u8) -> ScanpaintResult<Vec<u8>> {
    // Positive window bits select the zlib wrapper.
    let flags = create_comp_flags_from_zip_params(i32::from(level), 1, 0);
    let mut compressor = CompressorOxide::new(flags);

    let mut out = Vec::with_capacity(data.len() / 2 + 64);
    let (status, consumed) = compress_to_output(&mut compressor, data, TDEFLFlush::Finish, |chunk| {
        out.extend_from_slice(chunk);
        true
    });

    match status {
        TDEFLStatus::Done if consumed == data.len() => Ok(out),
        TDEFLStatus::Done => Err(ScanpaintError::compression(format!(
            "deflate consumed {consumed} of {} bytes",
            data.len()
        ))),
        other => Err(ScanpaintError::compression(format!(
            "deflate finished with status {other:?}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
