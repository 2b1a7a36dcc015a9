use super::*;
use crate::pixel::model::{BitPixel, L, Rgb, Rgba};

fn l_ramp(width: u32, height: u32) -> Image {
    Image::from_pixels(width, (0..width * height).map(|v| Pixel::l(v as u8))).unwrap()
}

fn values(img: &Image) -> Vec<u8> {
    img.data().iter().map(|p| p.luminance()).collect()
}

#[test]
fn crop_keeps_half_open_region() {
    let mut img = l_ramp(4, 3);
    img.crop(1, 1, 3, 3).unwrap();
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(values(&img), vec![5, 6, 9, 10]);
}

#[test]
fn crop_full_region_is_identity() {
    let mut img = l_ramp(3, 3);
    let before = img.clone();
    img.crop(0, 0, 3, 3).unwrap();
    assert_eq!(img, before);
}

#[test]
fn crop_validates_region() {
    let mut img = l_ramp(3, 3);
    assert!(matches!(
        img.crop(2, 0, 1, 3),
        Err(RastelError::OutOfBounds(_))
    ));
    assert!(matches!(
        img.crop(0, 0, 4, 3),
        Err(RastelError::OutOfBounds(_))
    ));
    assert_eq!(img.dimensions(), (3, 3));
}

#[test]
fn crop_to_empty_region_keeps_the_other_axis() {
    let mut img = l_ramp(3, 3);
    img.crop(1, 1, 1, 3).unwrap();
    assert!(img.is_empty());
    assert_eq!(img.dimensions(), (0, 2));
    assert_eq!(img.pixels(), vec![Vec::<Pixel>::new(); 2]);

    let mut img = l_ramp(3, 3);
    img.crop(0, 2, 3, 2).unwrap();
    assert_eq!(img.dimensions(), (3, 0));
    assert!(img.pixels().is_empty());

    img.mirror();
    img.flip();
    assert_eq!(img.dimensions(), (3, 0));
}

#[test]
fn mirror_and_flip_reflect() {
    let mut img = l_ramp(3, 2);
    img.mirror();
    assert_eq!(values(&img), vec![2, 1, 0, 5, 4, 3]);

    let mut img = l_ramp(2, 3);
    img.flip();
    assert_eq!(values(&img), vec![4, 5, 2, 3, 0, 1]);
}

#[test]
fn mirror_and_flip_are_involutions() {
    let original = l_ramp(5, 4);
    let mut img = original.clone();
    img.mirror();
    img.mirror();
    img.flip();
    img.flip();
    assert_eq!(img, original);
}

#[test]
fn invert_preserves_alpha_and_negates_bits() {
    let mut img = Image::new(1, 1, Rgba::new(0, 100, 255, 7)).unwrap();
    img.invert();
    assert_eq!(img.pixel(0, 0).unwrap(), Pixel::rgba(255, 155, 0, 7));

    let mut bits = Image::new(2, 1, BitPixel::ON).unwrap();
    bits.invert();
    assert!(bits.data().iter().all(|p| *p == Pixel::bit(false)));

    let mut twice = l_ramp(4, 4);
    twice.invert();
    twice.invert();
    assert_eq!(twice, l_ramp(4, 4));
}

#[test]
fn bands_split_and_merge() {
    let img = Image::from_pixels(
        2,
        [Pixel::rgba(1, 2, 3, 4), Pixel::rgba(5, 6, 7, 8)],
    )
    .unwrap();
    let bands = img.bands().unwrap();
    assert_eq!(bands.len(), 4);
    assert!(bands.iter().all(|b| b.mode() == PixelMode::L));
    assert_eq!(values(&bands[2]), vec![3, 7]);

    let merged = Image::from_bands(&bands).unwrap();
    assert_eq!(merged, img);

    let rgb = Image::from_bands(&bands[..3]).unwrap();
    assert_eq!(rgb.mode(), PixelMode::Rgb);
    assert_eq!(rgb.pixel(1, 0).unwrap(), Pixel::rgb(5, 6, 7));
}

#[test]
fn bands_rejects_single_channel_modes() {
    let img = Image::new(1, 1, L(0)).unwrap();
    assert!(matches!(img.bands(), Err(RastelError::UnsupportedMode(_))));
}

#[test]
fn from_bands_validates_inputs() {
    let band = Image::new(2, 2, L(0)).unwrap();
    let other = Image::new(3, 2, L(0)).unwrap();
    let color = Image::new(2, 2, Rgb::black()).unwrap();

    assert!(matches!(
        Image::from_bands(&[band.clone(), band.clone()]),
        Err(RastelError::InvalidBandCount(2))
    ));
    assert!(matches!(
        Image::from_bands(&[]),
        Err(RastelError::InvalidBandCount(0))
    ));
    assert!(matches!(
        Image::from_bands(&[band.clone(), band.clone(), other]),
        Err(RastelError::DimensionMismatch(_))
    ));
    assert!(matches!(
        Image::from_bands(&[band.clone(), color, band]),
        Err(RastelError::UnsupportedMode(_))
    ));
}
