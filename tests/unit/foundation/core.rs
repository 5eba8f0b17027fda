use super::*;
use serde_json::json;

#[test]
fn parses_hex_short_long_and_alpha() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));

    let c: Rgba8 = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 255, 128));

    let c: Rgba8 = serde_json::from_value(json!("#1f8")).unwrap();
    assert_eq!(c, Rgba8::rgb(0x11, 0xff, 0x88));
}

#[test]
fn parses_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 10, "g": 20, "b": 30})).unwrap();
    assert_eq!(c, Rgba8::rgb(10, 20, 30));

    let c: Rgba8 = serde_json::from_value(json!([120, 200, 230, 180])).unwrap();
    assert_eq!(c, Rgba8::new(120, 200, 230, 180));
}

#[test]
fn rejects_bad_shapes() {
    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
    assert!(serde_json::from_value::<Rgba8>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<Rgba8>(json!("#zzzzzz")).is_err());
    assert!(serde_json::from_value::<Rgba8>(json!([1, 2, 300])).is_err());
}

#[test]
fn serializes_as_array() {
    let v = serde_json::to_value(Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(v, json!([1, 2, 3, 4]));
    let back: Rgba8 = serde_json::from_value(v).unwrap();
    assert_eq!(back, Rgba8::new(1, 2, 3, 4));
}
