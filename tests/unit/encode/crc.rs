use super::*;

#[test]
fn known_check_values() {
    assert_eq!(crc32(b""), 0);
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    // Every PNG ends with this exact IEND trailer.
    assert_eq!(crc32(b"IEND"), 0xAE42_6082);
}

#[test]
fn running_update_matches_one_shot() {
    let mut h = Crc32::new();
    h.update(b"IHDR");
    h.update(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]);

    let mut joined = b"IHDR".to_vec();
    joined.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]);
    assert_eq!(h.finalize(), crc32(&joined));
    // Known IHDR crc for a 1x1 RGBA8 image.
    assert_eq!(crc32(&joined), 0x1F15_C489);
}
