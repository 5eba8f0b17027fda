use super::*;
use crate::encode::crc::crc32;
use crate::foundation::core::Rgba8;

struct Chunk<'a> {
    tag: [u8; 4],
    payload: &'a [u8],
    crc: u32,
}

fn split_chunks(png: &[u8]) -> Vec<Chunk<'_>> {
    assert_eq!(&png[..8], &PNG_SIGNATURE);
    let mut out = Vec::new();
    let mut pos = 8;
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let payload = &png[pos + 8..pos + 8 + len];
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        out.push(Chunk { tag, payload, crc });
        pos += 12 + len;
    }
    assert_eq!(pos, png.len());
    out
}

fn checker(w: u32, h: u32) -> Surface {
    let mut s = Surface::new(w, h, Rgba8::TRANSPARENT).unwrap();
    for y in 0..i64::from(h) {
        for x in 0..i64::from(w) {
            if (x + y) % 2 == 0 {
                s.set_pixel(x, y, Rgba8::new((x * 10) as u8, (y * 10) as u8, 200, 255));
            }
        }
    }
    s
}

#[test]
fn layout_is_signature_ihdr_idat_iend() {
    let png = encode_png(&checker(5, 3)).unwrap();
    let chunks = split_chunks(&png);
    let tags: Vec<[u8; 4]> = chunks.iter().map(|c| c.tag).collect();
    assert_eq!(tags, vec![CHUNK_IHDR, CHUNK_IDAT, CHUNK_IEND]);
    assert!(chunks[2].payload.is_empty());
    assert_eq!(&png[png.len() - 4..], &[0xAE, 0x42, 0x60, 0x82]);
}

#[test]
fn ihdr_fields_are_fixed_rgba8() {
    let png = encode_png(&checker(300, 2)).unwrap();
    let ihdr = &split_chunks(&png)[0];
    assert_eq!(
        ihdr.payload,
        &[0, 0, 1, 44, 0, 0, 0, 2, 8, 6, 0, 0, 0][..]
    );
}

#[test]
fn every_chunk_crc_covers_tag_and_payload() {
    let png = encode_png(&checker(7, 7)).unwrap();
    for c in split_chunks(&png) {
        let mut covered = c.tag.to_vec();
        covered.extend_from_slice(c.payload);
        assert_eq!(c.crc, crc32(&covered), "{:?}", c.tag);
    }
}

#[test]
fn idat_inflates_to_unfiltered_rows() {
    let s = checker(4, 3);
    let png = encode_png(&s).unwrap();
    let idat = &split_chunks(&png)[1];
    let raw = miniz_oxide::inflate::decompress_to_vec_zlib(idat.payload).unwrap();

    assert_eq!(raw.len(), 3 * (1 + 4 * 4));
    for (y, line) in raw.chunks_exact(1 + 16).enumerate() {
        assert_eq!(line[0], 0);
        assert_eq!(&line[1..], s.row(y as u32));
    }
}

#[test]
fn every_level_decodes_to_the_same_rows() {
    let s = checker(9, 9);
    for level in 0..=10 {
        let cfg = EncodeConfig::default().with_compression_level(level);
        let png = encode_png_with(&s, &cfg).unwrap();
        let idat = &split_chunks(&png)[1];
        let raw = miniz_oxide::inflate::decompress_to_vec_zlib(idat.payload).unwrap();
        assert_eq!(raw.len(), 9 * (1 + 9 * 4), "level {level}");
    }
}

#[test]
fn encoding_is_deterministic() {
    let s = checker(16, 16);
    assert_eq!(encode_png(&s).unwrap(), encode_png(&s).unwrap());
}

#[test]
fn rejects_out_of_range_level() {
    let cfg = EncodeConfig::default().with_compression_level(11);
    assert!(matches!(cfg.validate(), Err(ScanpaintError::Validation(_))));
    assert!(encode_png_with(&checker(1, 1), &cfg).is_err());
}

#[test]
fn write_chunk_frames_empty_payload() {
    let mut out = Vec::new();
    write_chunk(&mut out, CHUNK_IEND, &[]);
    assert_eq!(
        out,
        vec![0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
    );
}

#[test]
fn write_png_matches_encode() {
    let s = checker(3, 3);
    let mut sink = Vec::new();
    write_png(&s, &EncodeConfig::default(), &mut sink).unwrap();
    assert_eq!(sink, encode_png(&s).unwrap());
}
