//! Append-only diagnostic log file
//!
//! One timestamped line per exceptional condition, mirrored to the `log`
//! facade. Game logic writes it and never reads it back. Opened once at
//! startup, closed once at teardown.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct DiagnosticLog {
    sink: Option<BufWriter<File>>,
}

impl DiagnosticLog {
    /// Open (truncate) the log file and write the opening line. When the
    /// file cannot be created the log downgrades to facade-only mirroring.
    pub fn open(path: &str) -> Self {
        let sink = match File::create(path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(err) => {
                log::warn!("diagnostic log {path} unavailable: {err}");
                None
            }
        };
        let mut diag = Self { sink };
        diag.lifecycle("game started");
        diag
    }

    /// A log that only mirrors to the facade; used by tests
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// One exceptional-condition line, mirrored at warn level
    pub fn line(&mut self, message: &str) {
        log::warn!("{message}");
        self.write_line(message);
    }

    /// Closing line, then flush; further lines go to the facade only
    pub fn close(&mut self) {
        self.lifecycle("game ended");
        if let Some(sink) = &mut self.sink {
            let _ = sink.flush();
        }
        self.sink = None;
    }

    fn lifecycle(&mut self, message: &str) {
        log::info!("{message}");
        self.write_line(message);
    }

    fn write_line(&mut self, message: &str) {
        if let Some(sink) = &mut self.sink {
            let stamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let _ = writeln!(sink, "[{stamp}] {message}");
        }
    }
}
