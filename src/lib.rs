//! Rastel is a raster image engine.
//!
//! Everything works on an owned [`Image`] buffer of a single [`PixelMode`]:
//!
//! - Composite pixels with an [`OverlayMode`] and paste images through masks
//! - Resize with the filters of [`ResizeAlgorithm`]
//! - Draw [`Rectangle`]s, [`Ellipse`]s and text ([`TextSegment`], [`TextLayout`])
//! - Decode and encode still images and animated [`ImageSequence`]s
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod buffer;
pub(crate) mod codec;
pub(crate) mod composite;
pub(crate) mod draw;
pub(crate) mod pixel;
pub(crate) mod resample;
pub(crate) mod sequence;
pub(crate) mod text;

pub use crate::foundation::error::{RastelError, RastelResult};

pub use crate::buffer::image::Image;
pub use crate::buffer::ops::Bands;
pub use crate::codec::format::ImageFormat;
pub use crate::codec::image_codec::{
    CodecOpts, Decoded, Decoder, Encodable, Encoder, ImageCodec,
};
pub use crate::composite::overlay::{OverlayMode, blend, composite, overwrite};
pub use crate::draw::raster::Draw;
pub use crate::draw::shape::{Border, BorderPosition, Ellipse, Rectangle};
pub use crate::pixel::model::{BitPixel, L, Pixel, PixelMode, Rgb, Rgba};
pub use crate::resample::{
    ResampleOpts, ResampleThreading, ResizeAlgorithm, resample, resample_with,
};
pub use crate::sequence::frame::{DisposalMethod, Frame};
pub use crate::sequence::image_sequence::{ImageSequence, LoopCount};
pub use crate::text::flow::WrapStyle;
pub use crate::text::font::{Font, FontFace, GlyphBitmap, LineMetrics};
pub use crate::text::layout::{HorizontalAnchor, TextLayout, VerticalAnchor};
pub use crate::text::parley_face::ParleyFace;
pub use crate::text::segment::TextSegment;
