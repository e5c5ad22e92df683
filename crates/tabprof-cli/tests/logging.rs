//! The installed subscriber filters and formats workspace events.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use tabprof_cli::logging::{LogConfig, LogFormat, init_logging_with_writer};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn json_logging_respects_level() {
    let logs = CapturedLogs::default();
    let config = LogConfig::default()
        .with_level_filter(LevelFilter::INFO)
        .with_env_filter(false)
        .with_format(LogFormat::Json)
        .with_target(true);
    init_logging_with_writer(&config, logs.clone()).unwrap();

    tracing::info!(target: "tabprof_report", rows = 3, "loaded table");
    tracing::debug!(target: "tabprof_report", "hidden");
    tracing::info!(target: "other_crate", "hidden");

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1, "{output}");
    assert!(lines[0].contains("\"message\":\"loaded table\""));
    assert!(lines[0].contains("\"rows\":3"));
    assert!(lines[0].contains("\"level\":\"INFO\""));

    assert!(init_logging_with_writer(&config, logs).is_err());
}
