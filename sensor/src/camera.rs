use image::RgbImage;
use opencv::{core::CV_8UC3, prelude::*, videoio};

use crate::{Capture, Frame, FrameSource, SourceError};

/// A local capture device read through OpenCV.
pub struct OpenCvCamera {
    capture: videoio::VideoCapture,
    index: i32,
    released: bool,
}

impl OpenCvCamera {
    /// Open device `index` with whatever backend OpenCV picks.
    pub fn open(index: i32) -> Result<Self, SourceError> {
        let capture = videoio::VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|e| SourceError::Open(format!("device {index}: {e}")))?;
        let opened = capture
            .is_opened()
            .map_err(|e| SourceError::Open(format!("device {index}: {e}")))?;
        if !opened {
            return Err(SourceError::Open(format!("device {index}")));
        }
        log::info!("camera {index} opened");
        Ok(Self {
            capture,
            index,
            released: false,
        })
    }
}

impl FrameSource for OpenCvCamera {
    fn read_next(&mut self) -> Result<Capture, SourceError> {
        if self.released {
            return Ok(Capture::EndOfStream);
        }
        let mut mat = Mat::default();
        let ok = self
            .capture
            .read(&mut mat)
            .map_err(|e| SourceError::Read(e.to_string()))?;
        if !ok || mat.empty() {
            return Ok(Capture::EndOfStream);
        }
        if mat.typ() != CV_8UC3 {
            return Err(SourceError::Read(format!(
                "unexpected pixel type {}",
                mat.typ()
            )));
        }
        let width = mat.cols() as u32;
        let height = mat.rows() as u32;
        let bgr = mat
            .data_bytes()
            .map_err(|e| SourceError::Read(e.to_string()))?;
        let mut rgb = Vec::with_capacity(bgr.len());
        for px in bgr.chunks_exact(3) {
            rgb.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        let image = RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| SourceError::Read("frame buffer size mismatch".into()))?;
        Ok(Capture::Frame(Frame::new(image)))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.capture.release() {
            log::error!("camera {} release failed: {e}", self.index);
        } else {
            log::info!("camera {} released", self.index);
        }
    }
}
