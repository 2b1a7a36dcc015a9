use super::*;
use crate::pixel::model::{L, Rgb, Rgba};

const ALL: [ResizeAlgorithm; 7] = [
    ResizeAlgorithm::Nearest,
    ResizeAlgorithm::Box,
    ResizeAlgorithm::Bilinear,
    ResizeAlgorithm::Hamming,
    ResizeAlgorithm::Bicubic,
    ResizeAlgorithm::Mitchell,
    ResizeAlgorithm::Lanczos3,
];

fn gradient(width: u32, height: u32) -> Image {
    let pixels = (0..height).flat_map(|y| {
        (0..width).map(move |x| Pixel::rgba((x * 30) as u8, (y * 40) as u8, 90, 100 + x as u8))
    });
    Image::from_pixels(width, pixels).unwrap()
}

#[test]
fn nearest_upscale_of_flat_image() {
    let src = Image::new(2, 2, L(100)).unwrap();
    let out = resample(&src, 4, 4, ResizeAlgorithm::Nearest).unwrap();
    assert_eq!(out.dimensions(), (4, 4));
    assert!(out.data().iter().all(|p| *p == Pixel::l(100)));
}

#[test]
fn same_size_is_identity_for_every_filter() {
    let src = gradient(5, 4);
    for algo in ALL {
        assert_eq!(resample(&src, 5, 4, algo).unwrap(), src, "{algo:?}");
    }
}

#[test]
fn flat_images_stay_flat() {
    let src = Image::new(7, 5, Rgb::new(12, 200, 77)).unwrap();
    for algo in ALL {
        for (w, h) in [(3, 2), (14, 11), (7, 9)] {
            let out = resample(&src, w, h, algo).unwrap();
            assert_eq!(out.dimensions(), (w, h));
            assert!(
                out.data().iter().all(|p| *p == Pixel::rgb(12, 200, 77)),
                "{algo:?} {w}x{h}"
            );
        }
    }
}

#[test]
fn box_downscale_averages() {
    let src = Image::from_pixels(
        4,
        [0u8, 100, 200, 250].into_iter().map(Pixel::l),
    )
    .unwrap();
    let out = resample(&src, 2, 1, ResizeAlgorithm::Box).unwrap();
    assert_eq!(out.data(), &[Pixel::l(50), Pixel::l(225)][..]);
}

fn l_values(img: &Image) -> Vec<u8> {
    img.data().iter().map(|p| p.luminance()).collect()
}

#[test]
fn convolution_upscale_of_a_ramp() {
    let ramp = Image::from_pixels(2, [Pixel::l(0), Pixel::l(100)]).unwrap();
    let expected: [(ResizeAlgorithm, [u8; 4]); 5] = [
        (ResizeAlgorithm::Bilinear, [0, 25, 75, 100]),
        (ResizeAlgorithm::Bicubic, [0, 20, 80, 107]),
        (ResizeAlgorithm::Mitchell, [0, 24, 76, 102]),
        (ResizeAlgorithm::Hamming, [0, 8, 92, 100]),
        (ResizeAlgorithm::Lanczos3, [0, 21, 79, 110]),
    ];
    for (algorithm, values) in expected {
        let out = resample(&ramp, 4, 1, algorithm).unwrap();
        assert_eq!(l_values(&out), values, "{algorithm:?}");
    }
}

#[test]
fn bilinear_downscale_widens_the_kernel() {
    // weights 1/2, 3/8, 1/8 with the out-of-range tap folded onto the edge
    let row = Image::from_pixels(4, [8u8, 16, 64, 200].into_iter().map(Pixel::l)).unwrap();
    let out = resample(&row, 2, 1, ResizeAlgorithm::Bilinear).unwrap();
    assert_eq!(l_values(&out), vec![18, 126]);

    let column = Image::from_pixels(1, [8u8, 16, 64, 200].into_iter().map(Pixel::l)).unwrap();
    let out = resample(&column, 1, 2, ResizeAlgorithm::Bilinear).unwrap();
    assert_eq!(out.dimensions(), (1, 2));
    assert_eq!(l_values(&out), vec![18, 126]);
}

#[test]
fn transparent_pixels_do_not_bleed_color() {
    let src = Image::from_pixels(
        2,
        [Pixel::rgba(255, 0, 0, 255), Pixel::rgba(0, 255, 0, 0)],
    )
    .unwrap();
    let out = resample(&src, 1, 1, ResizeAlgorithm::Box).unwrap();
    assert_eq!(out.pixel(0, 0).unwrap(), Pixel::rgba(255, 0, 0, 128));
}

#[test]
fn bit_images_stay_binary() {
    let src = Image::from_pixels(
        4,
        [true, true, false, false].into_iter().map(Pixel::bit),
    )
    .unwrap();
    let out = resample(&src, 8, 2, ResizeAlgorithm::Bilinear).unwrap();
    assert_eq!(out.mode(), PixelMode::Bit);
    assert_eq!(out.pixel(0, 0).unwrap(), Pixel::bit(true));
    assert_eq!(out.pixel(7, 1).unwrap(), Pixel::bit(false));
}

#[test]
fn zero_area_inputs() {
    let src = Image::new(3, 3, L(1)).unwrap();
    let out = resample(&src, 0, 5, ResizeAlgorithm::Bicubic).unwrap();
    assert_eq!(out.dimensions(), (0, 5));
    assert!(out.is_empty());

    let empty = Image::empty(PixelMode::Rgba);
    let out = resample(&empty, 4, 4, ResizeAlgorithm::Lanczos3).unwrap();
    assert_eq!(out.dimensions(), (0, 0));
    assert_eq!(out.mode(), PixelMode::Rgba);
}

#[test]
fn parallel_matches_sequential() {
    let src = gradient(9, 7);
    let opts = ResampleOpts {
        threading: ResampleThreading {
            parallel: true,
            threads: Some(2),
            min_parallel_pixels: 0,
        },
    };
    for algo in ALL {
        let seq = resample(&src, 23, 4, algo).unwrap();
        let par = resample_with(&src, 23, 4, algo, &opts).unwrap();
        assert_eq!(seq, par, "{algo:?}");
    }
}

#[test]
fn zero_threads_is_rejected() {
    let src = Image::new(2, 2, Rgba::transparent()).unwrap();
    let opts = ResampleOpts {
        threading: ResampleThreading {
            threads: Some(0),
            ..ResampleThreading::default()
        },
    };
    assert!(matches!(
        resample_with(&src, 4, 4, ResizeAlgorithm::Nearest, &opts),
        Err(RastelError::Validation(_))
    ));
}

#[test]
fn resize_in_place_keeps_overlay_mode() {
    use crate::composite::overlay::OverlayMode;

    let mut img = Image::new(4, 4, L(9))
        .unwrap()
        .with_overlay_mode(OverlayMode::Overwrite);
    img.resize(2, 3, ResizeAlgorithm::Hamming).unwrap();
    assert_eq!(img.dimensions(), (2, 3));
    assert_eq!(img.overlay_mode(), OverlayMode::Overwrite);
}
