use std::time::Duration;

use crate::buffer::image::Image;

/// What happens to a frame's area before the next frame is drawn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum DisposalMethod {
    /// Leave the frame in place.
    #[default]
    Keep,
    /// Clear the frame's area to transparent.
    Background,
    /// Restore the canvas to what it was before the frame.
    Previous,
}

/// One image of an animation with its display delay and disposal.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    image: Image,
    delay: Duration,
    disposal: DisposalMethod,
}

impl Frame {
    pub fn new(image: Image) -> Self {
        Self {
            image,
            delay: Duration::ZERO,
            disposal: DisposalMethod::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_disposal(mut self, disposal: DisposalMethod) -> Self {
        self.disposal = disposal;
        self
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut Image {
        &mut self.image
    }

    pub fn into_image(self) -> Image {
        self.image
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn disposal(&self) -> DisposalMethod {
        self.disposal
    }

    pub fn set_disposal(&mut self, disposal: DisposalMethod) {
        self.disposal = disposal;
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
