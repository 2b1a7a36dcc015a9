pub(crate) mod frame;
pub(crate) mod image_sequence;
