use testlog::{CaptureBuffer, Level, Logger, TestLogger};

fn capture(level: Level) -> (TestLogger, CaptureBuffer) {
    let buffer = CaptureBuffer::new();
    let log = TestLogger::builder().level(level).capture(&buffer).build();
    (log, buffer)
}

#[test]
fn leveled_writes_point_at_the_test() {
    let (log, out) = capture(Level::Trace);
    let line = line!() + 1;
    log.warn("careful", &[]);
    assert!(out.contents().contains(&format!("caller={}:{}", file!(), line)));
}

#[test]
fn unguarded_log_points_at_the_test() {
    let (log, out) = capture(Level::Trace);
    let line = line!() + 1;
    log.log(Level::Debug, "raw", &[]);
    assert!(out.contents().contains(&format!("{}:{}", file!(), line)));
}

#[test]
fn derived_concrete_logger_points_at_the_test() {
    let (log, out) = capture(Level::Info);
    let child = log.derive(&[&"module", &"sync"]);
    let line = line!() + 1;
    child.info("synced", &[&"blocks", &128]);

    let rendered = out.contents();
    assert!(rendered.contains("synced module=sync blocks=128"));
    assert!(rendered.contains(&format!("{}:{}", file!(), line)));
}

#[test]
fn odd_context_is_rendered_with_a_placeholder_key() {
    let (log, out) = capture(Level::Info);
    log.info("lopsided", &[&"id", &7, &"orphan"]);
    assert!(out.contents().contains("lopsided id=7 !BADKEY=orphan"));
}
