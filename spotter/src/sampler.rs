use sensor::{Capture, FrameSource, Released, SourceError};
use std::{io, thread, time::Duration};
use thiserror::Error;
use tracing::{debug, info, trace, warn};
use vision::Detector;

use crate::{
    config::LoopConfig,
    event::{DetectionEvent, Event, EventSink},
    reduce::select_best,
    shutdown::ShutdownToken,
};

/// Lifecycle of a [`Sampler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopping,
    Stopped,
}

/// Counters for one run of the loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames successfully read.
    pub frames_read: u64,
    /// Frames handed to the detector.
    pub frames_admitted: u64,
    pub events_emitted: u64,
    pub inference_failures: u64,
    pub read_failures: u64,
}

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("camera lost after {failures} consecutive read failures: {source}")]
    SourceLost {
        failures: u32,
        #[source]
        source: SourceError,
    },
    #[error("event sink failed: {0}")]
    Sink(#[from] io::Error),
}

/// Drives a frame source through a detector, one frame at a time.
pub struct Sampler {
    config: LoopConfig,
    shutdown: ShutdownToken,
    state: LoopState,
}

impl Sampler {
    pub fn new(config: LoopConfig, shutdown: ShutdownToken) -> Self {
        Self {
            config,
            shutdown,
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether the `frame_number`-th successfully read frame (counting from 1)
    /// goes to the detector.
    pub fn admits(&self, frame_number: u64) -> bool {
        frame_number % self.config.frame_skip.get() == 0
    }

    /// Run until a stop is requested or a fatal error occurs.
    ///
    /// `source` is released exactly once before this returns, on every path.
    pub fn run<S, D, K>(
        &mut self,
        source: S,
        detector: &mut D,
        sink: &mut K,
    ) -> Result<RunSummary, SamplerError>
    where
        S: FrameSource,
        D: Detector + ?Sized,
        K: EventSink + ?Sized,
    {
        let mut source = Released::new(source);
        let mut summary = RunSummary::default();
        self.state = LoopState::Running;
        info!(
            frame_skip = self.config.frame_skip.get(),
            threshold = self.config.confidence_threshold,
            targets = ?self.config.targets.iter().collect::<Vec<_>>(),
            "sampling started"
        );

        let result = self.drive(&mut source, detector, sink, &mut summary);

        drop(source);
        self.state = LoopState::Stopped;
        info!(
            frames = summary.frames_read,
            inferred = summary.frames_admitted,
            events = summary.events_emitted,
            "sampling stopped"
        );
        result.map(|()| summary)
    }

    fn drive<S, D, K>(
        &mut self,
        source: &mut Released<S>,
        detector: &mut D,
        sink: &mut K,
        summary: &mut RunSummary,
    ) -> Result<(), SamplerError>
    where
        S: FrameSource,
        D: Detector + ?Sized,
        K: EventSink + ?Sized,
    {
        let mut frame_counter: u64 = 0;
        let mut consecutive_failures: u32 = 0;
        loop {
            if self.shutdown.is_stop_requested() {
                self.state = LoopState::Stopping;
                return Ok(());
            }

            let frame = match source.read_next() {
                Ok(Capture::Frame(frame)) => {
                    consecutive_failures = 0;
                    frame
                }
                Ok(Capture::EndOfStream) => {
                    trace!("no frame ready");
                    pause(self.config.backoff);
                    continue;
                }
                Err(err) => {
                    summary.read_failures += 1;
                    consecutive_failures += 1;
                    let limit = self.config.max_read_failures;
                    if limit > 0 && consecutive_failures >= limit {
                        self.state = LoopState::Stopping;
                        return Err(SamplerError::SourceLost {
                            failures: consecutive_failures,
                            source: err,
                        });
                    }
                    warn!(error = %err, consecutive_failures, "frame read failed, retrying");
                    pause(self.config.backoff);
                    continue;
                }
            };

            frame_counter += 1;
            summary.frames_read += 1;
            if !self.admits(frame_counter) {
                continue;
            }
            summary.frames_admitted += 1;

            match detector.infer(&frame) {
                Ok(observations) => {
                    let best = select_best(
                        &observations,
                        &self.config.targets,
                        self.config.confidence_threshold,
                    );
                    if let Some(best) = best {
                        let event = DetectionEvent::now(best);
                        debug!(
                            label = %event.label,
                            confidence = event.confidence,
                            frame = frame_counter,
                            age_ms = (event.timestamp - frame.captured_at).num_milliseconds(),
                            "detection"
                        );
                        sink.emit(&Event::Detection(event))?;
                        summary.events_emitted += 1;
                    }
                }
                Err(err) => {
                    summary.inference_failures += 1;
                    warn!(error = %err, frame = frame_counter, "inference failed, skipping frame");
                }
            }

            pause(self.config.idle);
        }
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
