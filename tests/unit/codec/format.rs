use super::*;

#[test]
fn names_and_aliases_resolve_case_insensitively() {
    assert_eq!(ImageFormat::from_name("PNG").unwrap(), ImageFormat::Png);
    assert_eq!(ImageFormat::from_name("jpg").unwrap(), ImageFormat::Jpeg);
    assert_eq!(ImageFormat::from_name("Jpeg").unwrap(), ImageFormat::Jpeg);
    assert_eq!(ImageFormat::from_name(".tif").unwrap(), ImageFormat::Tiff);
    assert_eq!(ImageFormat::from_name("ppm").unwrap(), ImageFormat::Pnm);
    assert_eq!("webp".parse::<ImageFormat>().unwrap(), ImageFormat::WebP);
}

#[test]
fn unknown_name_is_unsupported_format() {
    assert!(matches!(
        ImageFormat::from_name("psd"),
        Err(RastelError::UnsupportedFormat(name)) if name == "psd"
    ));
}

#[test]
fn unknown_extension_is_invalid_extension() {
    assert!(matches!(
        ImageFormat::from_extension("xyz"),
        Err(RastelError::InvalidExtension(_))
    ));
    assert!(matches!(
        ImageFormat::from_path("picture"),
        Err(RastelError::InvalidExtension(_))
    ));
    assert!(matches!(
        ImageFormat::from_path("picture.doc"),
        Err(RastelError::InvalidExtension(_))
    ));
}

#[test]
fn path_uses_last_extension() {
    assert_eq!(
        ImageFormat::from_path("out/frames.v2.GIF").unwrap(),
        ImageFormat::Gif
    );
}

#[test]
fn display_is_canonical_name() {
    assert_eq!(ImageFormat::Jpeg.to_string(), "jpeg");
    assert_eq!(ImageFormat::Pnm.to_string(), "pnm");
    for format in ImageFormat::ALL {
        assert_eq!(ImageFormat::from_name(format.name()).unwrap(), format);
    }
}

#[test]
fn every_format_maps_to_the_image_crate() {
    for format in ImageFormat::ALL {
        assert_eq!(ImageFormat::from_image(format.to_image()), Some(format));
    }
    assert_eq!(ImageFormat::from_image(image::ImageFormat::Hdr), None);
}

#[test]
fn animation_capable_formats() {
    let animated: Vec<_> = ImageFormat::ALL
        .into_iter()
        .filter(|f| f.supports_animation())
        .collect();
    assert_eq!(
        animated,
        vec![ImageFormat::Png, ImageFormat::Gif, ImageFormat::WebP]
    );
}
