use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScanpaintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScanpaintError::compression("x")
            .to_string()
            .contains("compression error:")
    );
    assert!(
        ScanpaintError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScanpaintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
