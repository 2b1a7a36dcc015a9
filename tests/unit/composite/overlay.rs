use super::*;

#[test]
fn blend_zero_source_alpha_is_noop() {
    let dst = Pixel::rgba(10, 20, 30, 255);
    let src = Pixel::rgba(255, 255, 255, 0);
    assert_eq!(blend(dst, src, 255), dst);
}

#[test]
fn blend_zero_opacity_is_noop() {
    let dst = Pixel::rgb(1, 2, 3);
    let src = Pixel::rgb(200, 200, 200);
    assert_eq!(blend(dst, src, 0), dst);
}

#[test]
fn opaque_source_replaces_destination_in_both_modes() {
    let dst = Pixel::rgba(0, 0, 0, 255);
    let src = Pixel::rgba(255, 0, 0, 255);
    assert_eq!(blend(dst, src, 255), src);
    assert_eq!(composite(dst, src, OverlayMode::Overwrite, 255), src);
    assert_eq!(composite(dst, src, OverlayMode::Blend, 255), src);
}

#[test]
fn blend_half_alpha_over_opaque_matches_linear_formula() {
    let dst = Pixel::rgb(0, 0, 0);
    let src = Pixel::rgba(255, 100, 0, 128);
    // 255*128/255 = 128, 100*128/255 = 50.2
    assert_eq!(blend(dst, src, 255), Pixel::rgb(128, 50, 0));
}

#[test]
fn blend_over_transparent_keeps_source_color() {
    let dst = Pixel::rgba(0, 0, 0, 0);
    let src = Pixel::rgba(100, 110, 120, 200);
    assert_eq!(blend(dst, src, 255), Pixel::rgba(100, 110, 120, 200));
}

#[test]
fn overwrite_copies_alpha_as_is() {
    let dst = Pixel::rgba(9, 9, 9, 255);
    let src = Pixel::rgba(1, 2, 3, 4);
    assert_eq!(overwrite(dst, src), src);
}

#[test]
fn alpha_less_source_is_opaque() {
    let dst = Pixel::rgba(0, 0, 0, 10);
    let src = Pixel::rgb(7, 8, 9);
    assert_eq!(blend(dst, src, 255), Pixel::rgba(7, 8, 9, 255));
}

#[test]
fn result_keeps_destination_mode() {
    let dst = Pixel::l(0);
    let src = Pixel::rgba(255, 255, 255, 255);
    assert_eq!(blend(dst, src, 255), Pixel::l(255));

    let dst = Pixel::bit(false);
    assert_eq!(composite(dst, src, OverlayMode::Overwrite, 255), Pixel::bit(true));
}

#[test]
fn overwrite_respects_half_coverage_threshold() {
    let dst = Pixel::l(0);
    let src = Pixel::l(200);
    assert_eq!(composite(dst, src, OverlayMode::Overwrite, 127), dst);
    assert_eq!(composite(dst, src, OverlayMode::Overwrite, 128), src);
}

#[test]
fn partial_coverage_blends_gray() {
    let out = composite(Pixel::l(0), Pixel::l(255), OverlayMode::Blend, 51);
    assert_eq!(out, Pixel::l(51));
}
