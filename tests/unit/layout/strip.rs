use super::*;

fn ratio(s: &str) -> Option<AspectRatio> {
    Some(s.parse().unwrap())
}

#[test]
fn three_pages_without_ratio() {
    let sizes = [Size::new(300, 100), Size::new(300, 200), Size::new(300, 150)];
    let layout = StripLayout::compute(&sizes, &StripLayoutSpec::new(20, Rgba8::WHITE)).unwrap();
    assert_eq!(layout.content, Size::new(300, 490));
    assert_eq!(layout.canvas, Size::new(300, 490));
    assert_eq!(layout.content_offset, Offset::new(0, 0));
    assert_eq!(
        layout.images,
        vec![Offset::new(0, 0), Offset::new(0, 120), Offset::new(0, 340)]
    );
}

#[test]
fn narrower_images_are_centered_over_content_width() {
    let sizes = [Size::new(300, 10), Size::new(101, 10), Size::new(200, 10)];
    let layout = StripLayout::compute(&sizes, &StripLayoutSpec::new(0, Rgba8::WHITE)).unwrap();
    assert_eq!(layout.content, Size::new(300, 30));
    assert_eq!(
        layout.images,
        vec![Offset::new(0, 0), Offset::new(100, 10), Offset::new(50, 20)]
    );
}

#[test]
fn wide_content_grows_height_only() {
    // 300x490 is wider than 1:2 (0.612 > 0.5): height becomes round(300 / 0.5) = 600.
    let canvas = canvas_for_aspect(Size::new(300, 490), ratio("1:2")).unwrap();
    assert_eq!(canvas, Size::new(300, 600));
}

#[test]
fn tall_content_grows_width_only() {
    // 300x490 is taller than 16:9: width becomes round(490 * 16 / 9) = 871.
    let canvas = canvas_for_aspect(Size::new(300, 490), ratio("16:9")).unwrap();
    assert_eq!(canvas, Size::new(871, 490));
}

#[test]
fn exact_ratio_skips_growth() {
    assert_eq!(
        canvas_for_aspect(Size::new(300, 400), ratio("3:4")).unwrap(),
        Size::new(300, 400)
    );
    // Same ratio expressed with non-reduced terms.
    assert_eq!(
        canvas_for_aspect(Size::new(300, 400), ratio("6:8")).unwrap(),
        Size::new(300, 400)
    );
    assert_eq!(
        canvas_for_aspect(Size::new(7, 3), None).unwrap(),
        Size::new(7, 3)
    );
}

#[test]
fn near_ratio_rounds_back_to_content() {
    // 1000x1001 is a hair taller than 1:1; the grown width is exactly 1001.
    assert_eq!(
        canvas_for_aspect(Size::new(1000, 1001), ratio("1:1")).unwrap(),
        Size::new(1001, 1001)
    );
    // A ratio a hair narrower than 3:1 grows height by under half a pixel.
    assert_eq!(
        canvas_for_aspect(Size::new(3, 1), ratio("2999999:1000000")).unwrap(),
        Size::new(3, 1)
    );
}

#[test]
fn content_block_is_centered_in_grown_canvas() {
    let sizes = [Size::new(300, 100), Size::new(300, 200), Size::new(300, 150)];
    let spec = StripLayoutSpec::new(20, Rgba8::WHITE).with_aspect_ratio(ratio("16:9"));
    let layout = StripLayout::compute(&sizes, &spec).unwrap();
    assert_eq!(layout.canvas, Size::new(871, 490));
    // (871 - 300) / 2 = 285.5 rounds to 286.
    assert_eq!(layout.content_offset, Offset::new(286, 0));
    assert_eq!(layout.images[1], Offset::new(286, 120));

    let spec = StripLayoutSpec::new(20, Rgba8::WHITE).with_aspect_ratio(ratio("1:2"));
    let layout = StripLayout::compute(&sizes, &spec).unwrap();
    assert_eq!(layout.canvas, Size::new(300, 600));
    assert_eq!(layout.content_offset, Offset::new(0, 55));
    assert_eq!(
        layout.images,
        vec![Offset::new(0, 55), Offset::new(0, 175), Offset::new(0, 395)]
    );
}

#[test]
fn empty_group_is_rejected() {
    let spec = StripLayoutSpec::new(0, Rgba8::WHITE);
    assert!(matches!(
        StripLayout::compute(&[], &spec),
        Err(StackError::InvalidArgument(_))
    ));
    assert!(matches!(
        compose_strip(&[], &spec),
        Err(StackError::InvalidArgument(_))
    ));
}

#[test]
fn huge_spacing_overflows_cleanly() {
    let sizes = [Size::new(1, 1), Size::new(1, 1)];
    let spec = StripLayoutSpec::new(u32::MAX, Rgba8::WHITE);
    assert!(matches!(
        StripLayout::compute(&sizes, &spec),
        Err(StackError::ResourceExhausted(_))
    ));
}
