use analysis::{load_image, AnalysisReport, ChainCode, Pipeline, Stage};
use image::{GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

/// Two dark squares on a bright background, far enough from the edges to
/// survive the morphological cleanup as separate objects.
fn two_objects() -> RgbImage {
    RgbImage::from_fn(200, 200, |x, y| {
        let first = (60..90).contains(&x) && (60..90).contains(&y);
        let second = (120..150).contains(&x) && (120..150).contains(&y);
        if first || second {
            Rgb([15, 40, 80])
        } else {
            Rgb([240, 200, 180])
        }
    })
}

#[test]
fn test_full_run_writes_every_output() {
    let dir = TempDir::new().expect("temp dir");
    let source_path = dir.path().join("source.png");
    two_objects().save(&source_path).expect("write source");

    let image = load_image(&source_path).expect("load source");
    let report = Pipeline::builder().build().unwrap().process(&image).unwrap();
    assert_eq!(report.object_count, 2);

    let out_dir = dir.path().join("out");
    let written = report.save(&out_dir).expect("save report");
    assert_eq!(written.len(), 10);

    for name in [
        "canny.png",
        "otsu.png",
        "marr_hildreth.png",
        "watershed.png",
        "filtered_2x2.png",
        "filtered_3x3.png",
        "filtered_5x5.png",
        "filtered_7x7.png",
        "segmented.png",
    ] {
        let reloaded = image::open(out_dir.join(name)).expect(name).to_luma8();
        assert_eq!(reloaded.dimensions(), (200, 200), "{name}");
    }

    let chain = std::fs::read_to_string(out_dir.join(AnalysisReport::CHAIN_CODE_FILE_NAME)).unwrap();
    assert_eq!(chain, report.chain_code.to_string());
    assert!(chain.chars().all(|c| ('0'..='7').contains(&c)));
    assert!(!chain.is_empty());
}

#[test]
fn test_box_filters_use_red_channel_of_colour_source() {
    let image = image::DynamicImage::ImageRgb8(two_objects());
    let report = Pipeline::builder()
        .with_box_sizes([1])
        .parallel(false)
        .build()
        .unwrap()
        .process(&image)
        .unwrap();

    let filtered = report.image(Stage::BoxFilter(1)).expect("box filter output");
    assert_eq!(filtered.get_pixel(0, 0)[0], 240);
    assert_eq!(filtered.get_pixel(70, 70)[0], 15);
}

#[test]
fn test_blank_image_has_no_objects() {
    let image = image::DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 30, Luma([255u8])));
    let report = Pipeline::builder().build().unwrap().process(&image).unwrap();

    assert_eq!(report.object_count, 0);
    assert_eq!(report.chain_code, ChainCode::NoObject);

    let dir = TempDir::new().unwrap();
    report.save(dir.path()).unwrap();
    let chain = std::fs::read_to_string(dir.path().join("freeman_chain.txt")).unwrap();
    assert_eq!(chain, "no object found");
}

#[test]
fn test_missing_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_image(dir.path().join("missing.png")).is_err());
}
