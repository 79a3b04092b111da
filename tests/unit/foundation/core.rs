use super::*;
use serde_json::json;

#[test]
fn rgba8_parses_hex_rgb_and_rgba() {
    assert_eq!("#ffffff".parse::<Rgba8>().unwrap(), Rgba8::WHITE);
    assert_eq!(
        "12AbEf".parse::<Rgba8>().unwrap(),
        Rgba8::opaque(0x12, 0xab, 0xef)
    );
    let c: Rgba8 = "#0000ff80".parse().unwrap();
    assert_eq!(c.to_array(), [0, 0, 255, 128]);
}

#[test]
fn rgba8_rejects_malformed_hex() {
    for bad in ["", "#fff", "#gg0000", "#1234567", "#ffffff00ff", "#ééé"] {
        let err = bad.parse::<Rgba8>().unwrap_err();
        assert!(matches!(err, StackError::InvalidArgument(_)), "{bad}");
    }
}

#[test]
fn rgba8_serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_value(json!("#ff3366")).unwrap();
    assert_eq!(c, Rgba8::opaque(0xff, 0x33, 0x66));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#ff3366"));
    assert_eq!(
        serde_json::to_value(Rgba8::from_array([1, 2, 3, 4])).unwrap(),
        json!("#01020304")
    );
    assert!(serde_json::from_value::<Rgba8>(json!("red")).is_err());
}

#[test]
fn rgba8_defaults_to_opaque_white() {
    assert_eq!(Rgba8::default().to_array(), [255, 255, 255, 255]);
}

#[test]
fn aspect_ratio_parses_w_colon_h() {
    let r: AspectRatio = "16:9".parse().unwrap();
    assert_eq!((r.width(), r.height()), (16, 9));
    let r: AspectRatio = " 3 : 4 ".parse().unwrap();
    assert_eq!((r.width(), r.height()), (3, 4));
    assert_eq!(r.to_string(), "3:4");
}

#[test]
fn aspect_ratio_rejects_zero_negative_and_malformed() {
    for bad in ["0:1", "1:0", "-1:2", "1.5:1", "16x9", "16:", ":9", "a:b", "1:2:3"] {
        let err = bad.parse::<AspectRatio>().unwrap_err();
        assert!(matches!(err, StackError::InvalidArgument(_)), "{bad}");
    }
}

#[test]
fn aspect_ratio_serde_roundtrips_through_string() {
    let r: AspectRatio = serde_json::from_value(json!("4:3")).unwrap();
    assert_eq!(serde_json::to_value(r).unwrap(), json!("4:3"));
    assert!(serde_json::from_value::<AspectRatio>(json!("0:3")).is_err());
}

#[test]
fn size_rgba8_len_and_display() {
    assert_eq!(Size::new(3, 2).rgba8_len().unwrap(), 24);
    assert_eq!(Size::new(300, 490).to_string(), "300x490");
    assert!(Size::new(0, 5).is_empty());
    assert!(!Size::new(1, 1).is_empty());
}
