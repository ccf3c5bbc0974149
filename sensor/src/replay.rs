use glob::glob;
use std::path::PathBuf;

use crate::{Capture, Frame, FrameSource, SourceError};

/// Reads image files from disk as simulated camera frames.
pub struct ReplaySource {
    paths: Vec<PathBuf>,
    index: usize,
    released: bool,
}

impl ReplaySource {
    /// Create a source that cycles files matching `pattern`.
    pub fn open(pattern: &str) -> Result<Self, SourceError> {
        let paths: Vec<PathBuf> = glob(pattern)
            .map_err(|e| SourceError::Open(format!("{pattern}: {}", e.msg)))?
            .filter_map(Result::ok)
            .collect();
        if paths.is_empty() {
            return Err(SourceError::Open(format!("no images match {pattern}")));
        }
        log::info!("replaying {} images from {pattern}", paths.len());
        Ok(Self {
            paths,
            index: 0,
            released: false,
        })
    }

    /// Number of files in the cycle.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ReplaySource {
    fn read_next(&mut self) -> Result<Capture, SourceError> {
        if self.released {
            return Ok(Capture::EndOfStream);
        }
        if self.index >= self.paths.len() {
            self.index = 0;
        }
        let path = &self.paths[self.index];
        self.index += 1;
        let image = image::open(path)
            .map_err(|e| SourceError::Read(format!("{}: {e}", path.display())))?;
        Ok(Capture::Frame(Frame::new(image.to_rgb8())))
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            log::debug!("replay source released");
        }
    }
}
