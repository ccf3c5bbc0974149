use image::{Rgb, RgbImage};
use sensor::{open_source, Capture, FrameSource, ReplaySource, SourceError, SourceSpec};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sensor-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &PathBuf, name: &str, shade: u8) {
    RgbImage::from_pixel(4, 3, Rgb([shade, 0, 0]))
        .save(dir.join(name))
        .unwrap();
}

#[test]
fn cycles_matching_images() {
    let dir = scratch_dir("cycle");
    write_png(&dir, "a.png", 10);
    write_png(&dir, "b.png", 20);
    let pattern = format!("{}/*.png", dir.display());
    let mut source = ReplaySource::open(&pattern).unwrap();
    assert_eq!(source.len(), 2);

    let mut shades = Vec::new();
    for _ in 0..3 {
        match source.read_next().unwrap() {
            Capture::Frame(frame) => {
                assert_eq!((frame.width(), frame.height()), (4, 3));
                shades.push(frame.image.get_pixel(0, 0)[0]);
            }
            Capture::EndOfStream => panic!("expected frame"),
        }
    }
    assert_eq!(shades, vec![10, 20, 10]);
}

#[test]
fn released_source_stops_producing() {
    let dir = scratch_dir("release");
    write_png(&dir, "a.png", 1);
    let mut source = ReplaySource::open(&format!("{}/*.png", dir.display())).unwrap();
    source.release();
    source.release();
    assert_eq!(source.read_next().unwrap(), Capture::EndOfStream);
}

#[test]
fn undecodable_file_is_a_read_error() {
    let dir = scratch_dir("garbage");
    std::fs::write(dir.join("bad.png"), b"not an image").unwrap();
    let mut source = ReplaySource::open(&format!("{}/*.png", dir.display())).unwrap();
    assert!(matches!(source.read_next(), Err(SourceError::Read(_))));
}

#[test]
fn empty_pattern_fails_to_open() {
    let err = open_source(&SourceSpec::Replay("/definitely/not/here/*.png".into()))
        .err()
        .expect("open should fail");
    assert!(matches!(err, SourceError::Open(_)));
    assert!(err.to_string().starts_with("camera_open_failed"));
}

#[cfg(not(feature = "opencv"))]
#[test]
fn device_needs_opencv() {
    let err = open_source(&SourceSpec::Device(0)).err().expect("open should fail");
    assert!(matches!(err, SourceError::Unsupported(_)));
    assert!(err.to_string().starts_with("camera_open_failed"));
}
