use super::*;

#[test]
fn defaults_match_service_defaults() {
    let opts = ComposeOpts::default();
    assert_eq!(opts.mode, ComposeMode::Single);
    assert_eq!(opts.spacing, 20);
    assert_eq!(opts.background, Rgba8::WHITE);
    assert_eq!(opts.aspect_ratio, None);
    assert_eq!(ComposeOpts::from_json_str("{}").unwrap(), opts);
}

#[test]
fn mode_parses_and_prints_stable_names() {
    for mode in [
        ComposeMode::Single,
        ComposeMode::Grid2x2,
        ComposeMode::Grid3x3,
        ComposeMode::Long,
    ] {
        assert_eq!(mode.as_str().parse::<ComposeMode>().unwrap(), mode);
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{mode}\""));
    }
    assert_eq!("GRID-2X2".parse::<ComposeMode>().unwrap(), ComposeMode::Grid2x2);
    assert!("mosaic".parse::<ComposeMode>().is_err());
}

#[test]
fn grid_modes_fix_columns_and_group_size() {
    assert_eq!(ComposeMode::Grid2x2.grid_columns(), Some(2));
    assert_eq!(ComposeMode::Grid2x2.fixed_group_size(), Some(4));
    assert_eq!(ComposeMode::Grid3x3.fixed_group_size(), Some(9));
    assert_eq!(ComposeMode::Long.fixed_group_size(), None);
}

#[test]
fn parses_full_json() {
    let opts = ComposeOpts::from_json_str(
        r##"{ "mode": "long", "group_size": 3, "spacing": 8, "background": "#000000", "aspect_ratio": "9:16" }"##,
    )
    .unwrap();
    assert_eq!(opts.mode, ComposeMode::Long);
    assert_eq!(opts.group_size, 3);
    assert_eq!(opts.spacing, 8);
    assert_eq!(opts.background, Rgba8::BLACK);
    assert_eq!(opts.aspect_ratio, Some(AspectRatio::new(9, 16).unwrap()));
}

#[test]
fn rejects_bad_json() {
    for bad in [
        r#"{ "mode": "mosaic" }"#,
        r#"{ "spacing": -1 }"#,
        r#"{ "background": "white" }"#,
        r#"{ "mode": "long", "group_size": 2, "aspect_ratio": "0:1" }"#,
        r##"{ "colour": "#ffffff" }"##,
    ] {
        let err = ComposeOpts::from_json_str(bad).unwrap_err();
        assert!(matches!(err, StackError::InvalidArgument(_)), "{bad}");
    }
}

#[test]
fn long_mode_requires_group_size() {
    let err = ComposeOpts::from_json_str(r#"{ "mode": "long" }"#).unwrap_err();
    assert!(err.to_string().contains("group_size"));
}

#[test]
fn aspect_ratio_is_long_only() {
    let opts = ComposeOpts {
        mode: ComposeMode::Grid2x2,
        aspect_ratio: Some(AspectRatio::new(1, 1).unwrap()),
        ..ComposeOpts::default()
    };
    assert!(matches!(
        opts.validate(),
        Err(StackError::InvalidArgument(_))
    ));
}

#[test]
fn plan_resolves_composers() {
    let grid = ComposeOpts {
        mode: ComposeMode::Grid3x3,
        group_size: 2,
        ..ComposeOpts::default()
    };
    let plan = grid.plan().unwrap().unwrap();
    assert_eq!(plan.group_size, 9);
    assert!(matches!(plan.composer, Composer::Grid(spec) if spec.columns() == 3));
    assert_eq!(plan.file_name(2), "grid-3x3-2.png");

    let long = ComposeOpts {
        mode: ComposeMode::Long,
        group_size: 3,
        ..ComposeOpts::default()
    };
    let plan = long.plan().unwrap().unwrap();
    assert_eq!(plan.group_size, 3);
    assert!(matches!(plan.composer, Composer::Strip(spec) if spec.spacing() == 20));
    assert_eq!(plan.file_name(1), "merged-1.png");
}

#[test]
fn nothing_to_merge_yields_no_plan() {
    assert_eq!(ComposeOpts::default().plan().unwrap(), None);
    let long_one = ComposeOpts {
        mode: ComposeMode::Long,
        group_size: 1,
        ..ComposeOpts::default()
    };
    assert_eq!(long_one.plan().unwrap(), None);
}
