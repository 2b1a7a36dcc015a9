use super::*;
use crate::pixel::model::{Rgb, Rgba};

fn gradient_rgba() -> Image {
    Image::from_pixels(
        3,
        (0..6u8).map(|i| Pixel::rgba(i * 40, 255 - i * 40, i, 128 + i)),
    )
    .unwrap()
}

#[test]
fn png_round_trip_is_lossless() {
    let codec = ImageCodec::default();
    let img = gradient_rgba();
    let bytes = codec.encode(Encodable::Image(&img), ImageFormat::Png).unwrap();
    let back = codec.decode(&bytes, None).unwrap().into_image().unwrap();
    assert_eq!(back, img);
    assert_eq!(back.format(), Some(ImageFormat::Png));
}

#[test]
fn decoded_modes_follow_the_stored_colour_type() {
    let codec = ImageCodec::default();
    let gray = Image::new(2, 2, Pixel::l(77)).unwrap();
    let bytes = codec.encode(Encodable::Image(&gray), ImageFormat::Png).unwrap();
    let back = codec.decode(&bytes, None).unwrap().into_image().unwrap();
    assert_eq!(back.mode(), PixelMode::L);
    assert_eq!(back, gray);

    let rgb = Image::new(2, 1, Rgb::new(9, 8, 7)).unwrap();
    let bytes = codec.encode(Encodable::Image(&rgb), ImageFormat::Bmp).unwrap();
    let back = codec.decode(&bytes, Some(ImageFormat::Bmp)).unwrap().into_image().unwrap();
    assert_eq!(back.mode(), PixelMode::Rgb);
    assert_eq!(back, rgb);
}

#[test]
fn bit_images_encode_as_grayscale() {
    let codec = ImageCodec::default();
    let img = Image::from_pixels(2, [Pixel::bit(true), Pixel::bit(false)]).unwrap();
    let bytes = codec.encode(Encodable::Image(&img), ImageFormat::Png).unwrap();
    let back = codec.decode(&bytes, None).unwrap().into_image().unwrap();
    assert_eq!(back.data(), &[Pixel::l(255), Pixel::l(0)]);
}

#[test]
fn unrecognized_signature_without_hint() {
    let codec = ImageCodec::default();
    assert!(matches!(
        codec.decode(b"definitely not an image", None),
        Err(RastelError::UnknownFormat)
    ));
}

#[test]
fn malformed_data_is_a_decode_error() {
    let codec = ImageCodec::default();
    assert!(matches!(
        codec.decode(b"\x89PNG\r\n\x1a\ngarbage", Some(ImageFormat::Png)),
        Err(RastelError::Decode(_))
    ));
}

#[test]
fn jpeg_quality_is_validated() {
    let img = Image::new(4, 4, Rgb::new(10, 20, 30)).unwrap();
    let codec = ImageCodec::new(CodecOpts { jpeg_quality: 0 });
    assert!(matches!(
        codec.encode(Encodable::Image(&img), ImageFormat::Jpeg),
        Err(RastelError::Validation(_))
    ));

    let codec = ImageCodec::new(CodecOpts { jpeg_quality: 75 });
    let bytes = codec.encode(Encodable::Image(&img), ImageFormat::Jpeg).unwrap();
    let back = codec.decode(&bytes, None).unwrap().into_image().unwrap();
    assert_eq!(back.dimensions(), (4, 4));
    assert_eq!(back.format(), Some(ImageFormat::Jpeg));
}

#[test]
fn zero_area_image_cannot_be_encoded() {
    let codec = ImageCodec::default();
    let img = Image::empty(PixelMode::Rgba);
    assert!(matches!(
        codec.encode(Encodable::Image(&img), ImageFormat::Png),
        Err(RastelError::Encode(_))
    ));
}

#[test]
fn sequences_need_an_animated_format_for_many_frames() {
    let codec = ImageCodec::default();
    let frame = || Frame::new(Image::new(2, 2, Rgba::new(1, 2, 3, 255)).unwrap());

    let empty = ImageSequence::new();
    assert!(matches!(
        codec.encode(Encodable::Sequence(&empty), ImageFormat::Gif),
        Err(RastelError::Encode(_))
    ));

    let single = ImageSequence::from_frames(vec![frame()]);
    let bytes = codec.encode(Encodable::Sequence(&single), ImageFormat::Png).unwrap();
    assert!(matches!(codec.decode(&bytes, None).unwrap(), Decoded::Image(_)));

    let many = ImageSequence::from_frames(vec![frame(), frame()]);
    assert!(matches!(
        codec.encode(Encodable::Sequence(&many), ImageFormat::Png),
        Err(RastelError::Encode(_))
    ));
    let gif = codec.encode(Encodable::Sequence(&many), ImageFormat::Gif).unwrap();
    match codec.decode(&gif, Some(ImageFormat::Gif)).unwrap() {
        Decoded::Sequence(seq) => assert_eq!(seq.len(), 2),
        Decoded::Image(_) => panic!("expected an animation"),
    }
}

#[test]
fn gif_loop_count_must_fit_the_format() {
    let codec = ImageCodec::default();
    let frame = || Frame::new(Image::new(2, 2, Rgba::new(9, 9, 9, 255)).unwrap());
    let seq = ImageSequence::from_frames(vec![frame(), frame()])
        .with_loop_count(LoopCount::Exactly(u32::from(u16::MAX)));
    assert!(codec.encode(Encodable::Sequence(&seq), ImageFormat::Gif).is_ok());

    let seq = seq.with_loop_count(LoopCount::Exactly(u32::from(u16::MAX) + 1));
    assert!(matches!(
        codec.encode(Encodable::Sequence(&seq), ImageFormat::Gif),
        Err(RastelError::Encode(_))
    ));
}

#[test]
fn decoded_conversions() {
    let img = Image::new(1, 1, Pixel::l(3)).unwrap();
    let seq = Decoded::Image(img.clone()).into_sequence();
    assert_eq!(seq.len(), 1);
    assert_eq!(Decoded::Sequence(seq).into_image().unwrap(), img);
    assert!(matches!(
        Decoded::Sequence(ImageSequence::new()).into_image(),
        Err(RastelError::Decode(_))
    ));
}

#[test]
fn codec_opts_serde_defaults() {
    let opts: CodecOpts = serde_json::from_str(r#"{"jpeg_quality": 60}"#).unwrap();
    assert_eq!(opts.jpeg_quality, 60);
    assert_eq!(CodecOpts::default().jpeg_quality, 90);
}
