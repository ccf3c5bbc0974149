use sensor::{Capture, Frame, FrameSource, Released, SourceError};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

struct CountingSource {
    releases: Arc<AtomicUsize>,
}

impl FrameSource for CountingSource {
    fn read_next(&mut self) -> Result<Capture, SourceError> {
        Ok(Capture::Frame(Frame::blank(2, 2)))
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn drop_releases_once() {
    let releases = Arc::new(AtomicUsize::new(0));
    {
        let mut guard = Released::new(CountingSource {
            releases: releases.clone(),
        });
        assert!(matches!(guard.read_next(), Ok(Capture::Frame(_))));
        assert_eq!(releases.load(Ordering::SeqCst), 0);
    }
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[test]
fn boxed_sources_release_through_the_guard() {
    let releases = Arc::new(AtomicUsize::new(0));
    let boxed: Box<dyn FrameSource> = Box::new(CountingSource {
        releases: releases.clone(),
    });
    drop(Released::new(boxed));
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[test]
fn guard_releases_when_unwinding() {
    let releases = Arc::new(AtomicUsize::new(0));
    let counter = releases.clone();
    let result = std::panic::catch_unwind(move || {
        let _guard = Released::new(CountingSource { releases: counter });
        panic!("inference blew up");
    });
    assert!(result.is_err());
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}
