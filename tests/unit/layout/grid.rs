use super::*;

fn spec(columns: u32, spacing: u32) -> GridLayoutSpec {
    GridLayoutSpec::new(columns, spacing, Rgba8::WHITE).unwrap()
}

#[test]
fn spec_rejects_zero_columns() {
    assert!(matches!(
        GridLayoutSpec::new(0, 0, Rgba8::WHITE),
        Err(StackError::InvalidArgument(_))
    ));
    let s = spec(3, 4).with_filter(FilterType::Nearest);
    assert_eq!(
        (s.columns(), s.spacing(), s.filter()),
        (3, 4, FilterType::Nearest)
    );
}

#[test]
fn four_squares_two_columns() {
    let sizes = [Size::new(100, 100); 4];
    let layout = GridLayout::compute(&sizes, &spec(2, 10)).unwrap();
    assert_eq!(layout.rows, 2);
    assert_eq!(layout.cell, Size::new(100, 100));
    assert_eq!(layout.canvas, Size::new(210, 210));
    assert_eq!(
        layout.cells,
        vec![
            Offset::new(0, 0),
            Offset::new(110, 0),
            Offset::new(0, 110),
            Offset::new(110, 110),
        ]
    );
}

#[test]
fn partial_group_still_rounds_rows_up() {
    let sizes = [Size::new(100, 100); 3];
    let layout = GridLayout::compute(&sizes, &spec(2, 10)).unwrap();
    assert_eq!(layout.rows, 2);
    assert_eq!(layout.canvas, Size::new(210, 210));
    assert_eq!(layout.cells.len(), 3);
}

#[test]
fn single_image_keeps_full_column_count() {
    let sizes = [Size::new(40, 30)];
    let layout = GridLayout::compute(&sizes, &spec(3, 5)).unwrap();
    assert_eq!(layout.rows, 1);
    assert_eq!(layout.canvas, Size::new(130, 30));
}

#[test]
fn mixed_sizes_use_per_axis_maximum() {
    let sizes = [Size::new(160, 90), Size::new(90, 160), Size::new(120, 120)];
    let layout = GridLayout::compute(&sizes, &spec(3, 0)).unwrap();
    assert_eq!(layout.cell, Size::new(160, 160));
    assert_eq!(layout.canvas, Size::new(480, 160));
    assert_eq!(layout.cells[2], Offset::new(320, 0));
}

#[test]
fn empty_group_is_rejected() {
    assert!(matches!(
        GridLayout::compute(&[], &spec(2, 0)),
        Err(StackError::InvalidArgument(_))
    ));
    assert!(matches!(
        compose_grid(&[], &spec(2, 0)),
        Err(StackError::InvalidArgument(_))
    ));
}

#[test]
fn compose_grid_centers_narrow_image_in_cell() {
    let red = Rgba8::opaque(255, 0, 0);
    let group = vec![
        RasterImage::solid(20, 10, Rgba8::BLACK).unwrap(),
        RasterImage::solid(10, 10, red).unwrap(),
    ];
    let out = compose_grid(&group, &spec(2, 2).with_filter(FilterType::Nearest)).unwrap();
    assert_eq!(out.size(), Size::new(42, 10));
    // Second cell spans x 22..42; the 10px image sits at 27..37.
    assert_eq!(out.pixel(21, 5), Some(Rgba8::WHITE));
    assert_eq!(out.pixel(26, 5), Some(Rgba8::WHITE));
    assert_eq!(out.pixel(27, 5), Some(red));
    assert_eq!(out.pixel(36, 5), Some(red));
    assert_eq!(out.pixel(37, 5), Some(Rgba8::WHITE));
    assert_eq!(out.pixel(0, 0), Some(Rgba8::BLACK));
    assert_eq!(out.pixel(19, 9), Some(Rgba8::BLACK));
}
