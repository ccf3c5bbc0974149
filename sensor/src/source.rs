use std::ops::{Deref, DerefMut};
use thiserror::Error;

use crate::{Frame, ReplaySource};

/// Failures raised while opening or reading a frame source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The device or image set could not be opened at all.
    #[error("camera_open_failed: {0}")]
    Open(String),
    /// A read failed for a reason other than the device not being ready.
    #[error("frame read failed: {0}")]
    Read(String),
    /// The requested kind of source was compiled out.
    #[error("camera_open_failed: {0} needs the `opencv` feature")]
    Unsupported(&'static str),
}

/// Result of a single read.
#[derive(Clone, Debug, PartialEq)]
pub enum Capture {
    Frame(Frame),
    /// Nothing available right now. Not an error; back off and try again.
    EndOfStream,
}

/// Anything that yields frames until released.
pub trait FrameSource: Send {
    /// Pull the next frame.
    fn read_next(&mut self) -> Result<Capture, SourceError>;

    /// Let go of the underlying device. Calling it twice is harmless.
    fn release(&mut self);
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read_next(&mut self) -> Result<Capture, SourceError> {
        (**self).read_next()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Owns a source and releases it when dropped.
pub struct Released<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> Released<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: FrameSource> Deref for Released<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.source
    }
}

impl<S: FrameSource> DerefMut for Released<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: FrameSource> Drop for Released<S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

/// Where frames come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    /// A capture device by index.
    Device(i32),
    /// Still images matching a glob pattern, cycled forever.
    Replay(String),
}

/// Open the source described by `spec`.
pub fn open_source(spec: &SourceSpec) -> Result<Box<dyn FrameSource>, SourceError> {
    match spec {
        SourceSpec::Replay(pattern) => Ok(Box::new(ReplaySource::open(pattern)?)),
        SourceSpec::Device(index) => open_device(*index),
    }
}

#[cfg(feature = "opencv")]
fn open_device(index: i32) -> Result<Box<dyn FrameSource>, SourceError> {
    Ok(Box::new(crate::camera::OpenCvCamera::open(index)?))
}

#[cfg(not(feature = "opencv"))]
fn open_device(index: i32) -> Result<Box<dyn FrameSource>, SourceError> {
    log::error!("device {index} requested without camera support");
    Err(SourceError::Unsupported("camera capture"))
}
