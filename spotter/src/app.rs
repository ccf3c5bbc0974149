use sensor::open_source;
use std::{fmt::Display, io, process::ExitCode};
use tracing::info;
use vision::Detector;

use crate::{
    config::LoopConfig,
    event::{Event, EventSink},
    sampler::Sampler,
    shutdown::ShutdownToken,
};

/// Open the configured source and sample it until stopped.
///
/// A source that will not open, or a fatal loop error, is written to `sink`
/// as a single error event and yields [`ExitCode::FAILURE`].
pub fn serve<D, K>(
    config: LoopConfig,
    shutdown: ShutdownToken,
    detector: &mut D,
    sink: &mut K,
) -> io::Result<ExitCode>
where
    D: Detector + ?Sized,
    K: EventSink + ?Sized,
{
    let source = match open_source(&config.source) {
        Ok(source) => source,
        Err(e) => return report_fatal(sink, e),
    };
    let mut sampler = Sampler::new(config, shutdown);
    match sampler.run(source, detector, sink) {
        Ok(summary) => {
            info!(?summary, "exiting");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report_fatal(sink, e),
    }
}

/// Write `err` as the one error event of this run.
pub fn report_fatal<K: EventSink + ?Sized>(
    sink: &mut K,
    err: impl Display,
) -> io::Result<ExitCode> {
    sink.emit(&Event::error(err.to_string()))?;
    Ok(ExitCode::FAILURE)
}
