use chrono::{DateTime, Utc};
use image::{Rgb, RgbImage};

/// A single RGB8 image pulled from a [`crate::FrameSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixel data in RGB order.
    pub image: RgbImage,
    /// Wall-clock time the frame was read.
    pub captured_at: DateTime<Utc>,
}

impl Frame {
    /// Wrap an image read just now.
    pub fn new(image: RgbImage) -> Self {
        Self {
            image,
            captured_at: Utc::now(),
        }
    }

    /// A black frame of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbImage::from_pixel(width, height, Rgb([0, 0, 0])))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
