//! RLE codec, compositing, and export integration tests.

use serde_json::Map;

use cinemask::{
    composite_mask, to_base64, to_json, to_png, BinaryMask, Color, MaskJson, RgbaSurface,
    RunLengths,
};

// =============================================================================
// Decode Invariants
// =============================================================================

#[test]
fn test_foreground_count_equals_odd_run_sum() {
    // For any sequence summing to exactly width*height, the foreground
    // pixel count equals the sum of the odd-indexed runs.
    let cases: Vec<(Vec<u32>, u32, u32)> = vec![
        (vec![3, 4, 2], 3, 3),
        (vec![0, 9], 3, 3),
        (vec![9], 3, 3),
        (vec![1, 1, 1, 1, 1, 1, 1, 1, 1], 3, 3),
        (vec![10, 20, 5, 13], 6, 8),
    ];

    for (runs, w, h) in cases {
        let runs = RunLengths::new(runs);
        assert_eq!((w * h) as usize, runs.total());
        let mask = runs.decode(w, h);
        assert_eq!(mask.foreground_count(), runs.foreground_total());
    }
}

#[test]
fn test_single_full_run_is_all_background() {
    let mask = RunLengths::new(vec![48]).decode(8, 6);
    assert_eq!(mask.len(), 48);
    assert!(mask.data().iter().all(|&v| v == 0));
}

#[test]
fn test_zero_then_full_run_is_all_foreground() {
    let mask = RunLengths::new(vec![0, 48]).decode(8, 6);
    assert_eq!(mask.len(), 48);
    assert!(mask.data().iter().all(|&v| v == 1));
}

#[test]
fn test_lenient_decode_never_fails() {
    // Under-run, over-run, and empty input all decode without error.
    for runs in [vec![], vec![5], vec![100, 100], vec![0, 0, 0]] {
        let mask = RunLengths::new(runs).decode(4, 4);
        assert_eq!(mask.len(), 16);
    }
}

#[test]
fn test_strict_decode_rejects_mismatch() {
    assert!(RunLengths::new(vec![5]).decode_strict(4, 4).is_err());
    assert!(RunLengths::new(vec![100]).decode_strict(4, 4).is_err());
    assert!(RunLengths::new(vec![10, 6]).decode_strict(4, 4).is_ok());
}

#[test]
fn test_encode_decode_round_trip() {
    let original = RunLengths::parse("5, 3, 2, 4, 2").unwrap();
    let mask = original.decode(4, 4);
    let reencoded = mask.encode();
    assert_eq!(reencoded, original);
    assert_eq!(reencoded.decode(4, 4), mask);
}

// =============================================================================
// Compositing
// =============================================================================

#[test]
fn test_composite_half_opacity_red() {
    // Foreground rendered with #FF0000 at opacity 0.5 must produce
    // R=255, G=0, B=0, A=round(0.5*255)=128.
    let mask = RunLengths::new(vec![0, 1]).decode(1, 1);
    let color: Color = "#FF0000".parse().unwrap();
    let mut surface = RgbaSurface::new(1, 1);

    composite_mask(&mut surface, &mask, color, 0.5).unwrap();
    assert_eq!(surface.pixel(0, 0), Some([255, 0, 0, 128]));
}

#[test]
fn test_composite_clears_stale_pixels() {
    let color: Color = "#00FF00".parse().unwrap();
    let mut surface = RgbaSurface::new(3, 1);

    let wide = RunLengths::new(vec![0, 3]).decode(3, 1);
    composite_mask(&mut surface, &wide, color, 1.0).unwrap();

    let narrow = RunLengths::new(vec![1, 1, 1]).decode(3, 1);
    composite_mask(&mut surface, &narrow, color, 1.0).unwrap();

    assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(surface.pixel(1, 0), Some([0, 255, 0, 255]));
    assert_eq!(surface.pixel(2, 0), Some([0, 0, 0, 0]));
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_json_round_trip_is_bit_exact() {
    let mask = RunLengths::new(vec![7, 5, 4]).decode(4, 4);
    let record = to_json(&mask, Map::new());

    let text = serde_json::to_string(&record).unwrap();
    let parsed: MaskJson = serde_json::from_str(&text).unwrap();
    let reconstructed = BinaryMask::from_raw(parsed.data.clone(), parsed.width, parsed.height)
        .expect("data length must match dimensions");

    assert_eq!(reconstructed, mask);
}

#[test]
fn test_png_export_decodes_to_colorized_raster() {
    let mask = RunLengths::new(vec![2, 2]).decode(2, 2);
    let color: Color = "#0000FF".parse().unwrap();

    let png = to_png(&mask, color).unwrap();
    let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();

    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 0, 0]);
    assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 255, 255]);
    assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 255, 255]);
}

#[test]
fn test_base64_export_transcodes_png() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let mask = RunLengths::new(vec![1, 3]).decode(2, 2);
    let color: Color = "#FF0000".parse().unwrap();

    let uri = to_base64(&mask, color).unwrap();
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let decoded = STANDARD.decode(payload).unwrap();
    assert_eq!(decoded.as_slice(), to_png(&mask, color).unwrap().as_ref());
}
