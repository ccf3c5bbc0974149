use chrono::DateTime;
use serde_json::Value;
use spotter::{DetectionEvent, Event, EventSink, JsonLines};
use vision::Observation;

fn lines(sink: JsonLines<Vec<u8>>) -> Vec<String> {
    String::from_utf8(sink.into_inner())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn detection_is_one_json_line() {
    let mut sink = JsonLines::new(Vec::new());
    let event = DetectionEvent::now(&Observation::new("cell phone", 0.875));
    sink.emit(&Event::Detection(event)).unwrap();

    let out = lines(sink);
    assert_eq!(out.len(), 1);
    let value: Value = serde_json::from_str(&out[0]).unwrap();
    assert_eq!(value["type"], "detection");
    assert_eq!(value["label"], "cell phone");
    assert_eq!(value["confidence"].as_f64(), Some(0.875));
    let stamp = value["timestamp"].as_str().expect("timestamp is a string");
    assert!(DateTime::parse_from_rfc3339(stamp).is_ok(), "{stamp}");
}

#[test]
fn error_event_shape() {
    let mut sink = JsonLines::new(Vec::new());
    sink.emit(&Event::error("camera_open_failed: device 3")).unwrap();

    let out = lines(sink);
    assert_eq!(
        out,
        vec![r#"{"type":"error","message":"camera_open_failed: device 3"}"#.to_string()]
    );
}

#[test]
fn events_parse_back() {
    let event = Event::Detection(DetectionEvent::now(&Observation::new("camera", 0.5)));
    let json = serde_json::to_string(&event).unwrap();
    assert_eq!(serde_json::from_str::<Event>(&json).unwrap(), event);
}

#[test]
fn announcements_follow_known_kinds() {
    let mut sink = JsonLines::new(Vec::new()).announcing(true);
    for label in ["phone", "camcorder", "laptop"] {
        let event = DetectionEvent::now(&Observation::new(label, 0.9));
        sink.emit(&Event::Detection(event)).unwrap();
    }

    let out = lines(sink);
    assert_eq!(out.len(), 5);
    assert_eq!(out[1], "Phone detected");
    assert_eq!(out[3], "Camera detected");
    assert!(out[4].starts_with('{'));
}

#[test]
fn announcements_are_off_by_default() {
    let mut sink = JsonLines::new(Vec::new());
    let event = DetectionEvent::now(&Observation::new("phone", 0.9));
    sink.emit(&Event::Detection(event)).unwrap();
    assert_eq!(lines(sink).len(), 1);
}
