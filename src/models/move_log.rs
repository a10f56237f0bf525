//! Move log - the append-only record of one game.
//!
//! Records are kept in memory (for the move list) and handed to a
//! [`LogSink`] running on its own writer thread, so appending never waits
//! on disk I/O.
//!
//! Architecture:
//! - `append*` pushes the record to the in-memory list and a channel
//! - the writer thread owns the sink, writes each record and flushes once
//!   the channel is drained
//! - write failures travel back on a second channel and are collected with
//!   [`MoveLog::take_failures`]
//! - [`MoveLog::close`] (or drop) hangs up the channel and joins the thread,
//!   which flushes whatever is still buffered

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{PieceColor, ResultCode};
use crate::error::MoveLogError;

/// Header date format (local time, seconds precision)
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp part of log file names
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// How many numbered variants to try when a file name is taken
const MAX_NAME_ATTEMPTS: u32 = 100;

/// One entry of the move log
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum MoveLogRecord {
    Header {
        timestamp: NaiveDateTime,
        white: String,
        black: String,
    },
    MoveEntry {
        /// Fullmove number before the move was applied
        move_number: u32,
        side_to_move: PieceColor,
        san: String,
        uci: String,
    },
    ResultEntry {
        code: ResultCode,
        reason: String,
    },
}

/// The text block written to the log file for each record
impl fmt::Display for MoveLogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveLogRecord::Header {
                timestamp,
                white,
                black,
            } => {
                writeln!(f, "Date: {}", timestamp.format(DATE_FORMAT))?;
                writeln!(f, "White: {white}")?;
                writeln!(f, "Black: {black}")?;
                writeln!(f)
            }
            MoveLogRecord::MoveEntry {
                move_number,
                side_to_move,
                san,
                uci,
            } => {
                let separator = match side_to_move {
                    PieceColor::White => ".",
                    PieceColor::Black => "...",
                };
                writeln!(f, "{move_number}{separator} {san}   [{uci}]")
            }
            MoveLogRecord::ResultEntry { code, reason } => {
                writeln!(f)?;
                writeln!(f, "Result: {code} ({reason})")
            }
        }
    }
}

/// Destination for log records. Runs on the writer thread.
pub trait LogSink: Send + 'static {
    fn write_record(&mut self, record: &MoveLogRecord) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

impl LogSink for Box<dyn LogSink> {
    fn write_record(&mut self, record: &MoveLogRecord) -> io::Result<()> {
        (**self).write_record(record)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Builds a fresh sink for each game
pub type SinkFactory = Arc<dyn Fn() -> Box<dyn LogSink> + Send + Sync>;

/// Plain text log file
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileSink {
    /// Create `chess_moves_<stamp>.log` in `dir`, never overwriting an existing file
    pub fn create_in(dir: &Path, timestamp: NaiveDateTime) -> Result<Self, MoveLogError> {
        fs::create_dir_all(dir).map_err(|source| MoveLogError::Create {
            path: dir.to_path_buf(),
            source,
        })?;

        let stamp = timestamp.format(FILE_STAMP_FORMAT).to_string();
        let mut last_error = None;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("chess_moves_{stamp}.log")
            } else {
                format!("chess_moves_{stamp}_{attempt}.log")
            };
            let path = dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    return Ok(Self {
                        writer: BufWriter::new(file),
                        path,
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    last_error = Some((path, e));
                }
                Err(source) => return Err(MoveLogError::Create { path, source }),
            }
        }

        let (path, source) = last_error.unwrap_or_else(|| {
            (
                dir.to_path_buf(),
                io::Error::new(io::ErrorKind::AlreadyExists, "no free log file name"),
            )
        });
        Err(MoveLogError::Create { path, source })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_record(&mut self, record: &MoveLogRecord) -> io::Result<()> {
        write!(self.writer, "{record}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Shared in-memory text buffer, for tests and headless runs
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LogSink for MemorySink {
    fn write_record(&mut self, record: &MoveLogRecord) -> io::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        buffer.push_str(&record.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Discards everything (logging disabled)
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write_record(&mut self, _record: &MoveLogRecord) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where a new game's log goes
#[derive(Clone)]
pub enum LogDestination {
    /// A fresh timestamped file in this directory per game
    Directory(PathBuf),
    /// A shared in-memory buffer
    Memory(MemorySink),
    /// Any other sink, built once per game
    Custom(SinkFactory),
    Disabled,
}

impl fmt::Debug for LogDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogDestination::Directory(dir) => f.debug_tuple("Directory").field(dir).finish(),
            LogDestination::Memory(sink) => f.debug_tuple("Memory").field(sink).finish(),
            LogDestination::Custom(_) => f.write_str("Custom"),
            LogDestination::Disabled => f.write_str("Disabled"),
        }
    }
}

impl LogDestination {
    /// Open the log for a new game, writing its header
    pub fn open(
        &self,
        white: &str,
        black: &str,
        timestamp: NaiveDateTime,
    ) -> Result<MoveLog, MoveLogError> {
        match self {
            LogDestination::Directory(dir) => {
                let sink = FileSink::create_in(dir, timestamp)?;
                let path = sink.path().to_path_buf();
                let mut log = MoveLog::open(sink, white, black, timestamp);
                log.path = Some(path);
                Ok(log)
            }
            LogDestination::Memory(sink) => Ok(MoveLog::open(sink.clone(), white, black, timestamp)),
            LogDestination::Custom(factory) => Ok(MoveLog::open(factory(), white, black, timestamp)),
            LogDestination::Disabled => Ok(MoveLog::open(NullSink, white, black, timestamp)),
        }
    }
}

/// Append-only, ordered log of one game
pub struct MoveLog {
    records: Vec<MoveLogRecord>,
    /// File being written, if the sink is a file
    path: Option<PathBuf>,
    /// Channel to the writer thread (None once closed)
    record_sender: Option<Sender<MoveLogRecord>>,
    failure_receiver: Receiver<MoveLogError>,
    writer: Option<JoinHandle<()>>,
    /// Failures noticed on the caller's side (writer gone, spawn failure)
    local_failures: Vec<MoveLogError>,
}

impl MoveLog {
    /// Start a log on `sink` and write its header
    pub fn open<S: LogSink>(
        sink: S,
        white: &str,
        black: &str,
        timestamp: NaiveDateTime,
    ) -> Self {
        let (record_tx, record_rx) = mpsc::channel::<MoveLogRecord>();
        let (failure_tx, failure_rx) = mpsc::channel::<MoveLogError>();

        let mut local_failures = Vec::new();
        let spawned = thread::Builder::new()
            .name("move-log".to_string())
            .spawn(move || run_writer(sink, record_rx, failure_tx));

        let (record_sender, writer) = match spawned {
            Ok(handle) => (Some(record_tx), Some(handle)),
            Err(e) => {
                warn!(error = %e, "could not start move log writer");
                local_failures.push(MoveLogError::Io(e));
                (None, None)
            }
        };

        let mut log = Self {
            records: Vec::new(),
            path: None,
            record_sender,
            failure_receiver: failure_rx,
            writer,
            local_failures,
        };
        log.push(MoveLogRecord::Header {
            timestamp,
            white: white.to_string(),
            black: black.to_string(),
        });
        log
    }

    /// Record an applied move
    pub fn append(
        &mut self,
        move_number: u32,
        side_to_move: PieceColor,
        san: &str,
        uci: &str,
    ) -> Result<(), MoveLogError> {
        if self.has_result() {
            return Err(MoveLogError::MoveAfterResult);
        }
        self.push(MoveLogRecord::MoveEntry {
            move_number,
            side_to_move,
            san: san.to_string(),
            uci: uci.to_string(),
        });
        Ok(())
    }

    /// Record how the game ended. Allowed once.
    pub fn append_result(&mut self, code: ResultCode, reason: &str) -> Result<(), MoveLogError> {
        if self.has_result() {
            return Err(MoveLogError::ResultAlreadyRecorded);
        }
        self.push(MoveLogRecord::ResultEntry {
            code,
            reason: reason.to_string(),
        });
        Ok(())
    }

    pub fn records(&self) -> &[MoveLogRecord] {
        &self.records
    }

    /// Number of move entries so far
    pub fn move_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, MoveLogRecord::MoveEntry { .. }))
            .count()
    }

    pub fn has_result(&self) -> bool {
        matches!(self.records.last(), Some(MoveLogRecord::ResultEntry { .. }))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Drain the write failures reported so far
    pub fn take_failures(&mut self) -> Vec<MoveLogError> {
        let mut failures = std::mem::take(&mut self.local_failures);
        while let Ok(failure) = self.failure_receiver.try_recv() {
            failures.push(failure);
        }
        failures
    }

    /// Flush buffered records and stop the writer thread.
    /// Returns any failures not yet taken.
    pub fn close(&mut self) -> Vec<MoveLogError> {
        // hanging up makes the writer drain, flush and exit
        self.record_sender = None;
        if let Some(handle) = self.writer.take() {
            if handle.join().is_err() {
                self.local_failures.push(MoveLogError::WriterGone);
            }
        }
        self.take_failures()
    }

    pub fn is_closed(&self) -> bool {
        self.record_sender.is_none()
    }

    fn push(&mut self, record: MoveLogRecord) {
        let sent = match &self.record_sender {
            Some(tx) => tx.send(record.clone()).is_ok(),
            None => false,
        };
        if !sent {
            self.local_failures.push(MoveLogError::WriterGone);
        }
        self.records.push(record);
    }
}

impl Drop for MoveLog {
    fn drop(&mut self) {
        for failure in self.close() {
            warn!(%failure, "move log failure at close");
        }
    }
}

/// Writer thread body: write records as they arrive, flush when idle
fn run_writer<S: LogSink>(
    mut sink: S,
    records: Receiver<MoveLogRecord>,
    failures: Sender<MoveLogError>,
) {
    while let Ok(record) = records.recv() {
        let mut batch = vec![record];
        while let Ok(more) = records.try_recv() {
            batch.push(more);
        }

        for record in &batch {
            if let Err(e) = sink.write_record(record) {
                let _ = failures.send(MoveLogError::Io(e));
            }
        }
        if let Err(e) = sink.flush() {
            let _ = failures.send(MoveLogError::Io(e));
        }
        debug!(count = batch.len(), "move log records written");
    }

    if let Err(e) = sink.flush() {
        let _ = failures.send(MoveLogError::Io(e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    /// Sink that fails every write
    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn write_record(&mut self, _record: &MoveLogRecord) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_record_text() {
        let header = MoveLogRecord::Header {
            timestamp: stamp(),
            white: "Ann".to_string(),
            black: "Bob".to_string(),
        };
        assert_eq!(
            header.to_string(),
            "Date: 2026-10-19 14:05:09\nWhite: Ann\nBlack: Bob\n\n"
        );

        let white_move = MoveLogRecord::MoveEntry {
            move_number: 1,
            side_to_move: PieceColor::White,
            san: "e4".to_string(),
            uci: "e2e4".to_string(),
        };
        assert_eq!(white_move.to_string(), "1. e4   [e2e4]\n");

        let black_move = MoveLogRecord::MoveEntry {
            move_number: 1,
            side_to_move: PieceColor::Black,
            san: "e5".to_string(),
            uci: "e7e5".to_string(),
        };
        assert_eq!(black_move.to_string(), "1... e5   [e7e5]\n");

        let result = MoveLogRecord::ResultEntry {
            code: ResultCode::BlackWins,
            reason: "Checkmate".to_string(),
        };
        assert_eq!(result.to_string(), "\nResult: 0-1 (Checkmate)\n");
    }

    #[test]
    fn test_memory_log_contents() {
        let sink = MemorySink::new();
        let mut log = MoveLog::open(sink.clone(), "Ann", "Bob", stamp());
        log.append(1, PieceColor::White, "e4", "e2e4").unwrap();
        log.append(1, PieceColor::Black, "e5", "e7e5").unwrap();
        log.append_result(ResultCode::Draw, "Stalemate").unwrap();
        assert!(log.close().is_empty());

        assert_eq!(
            sink.contents(),
            "Date: 2026-10-19 14:05:09\nWhite: Ann\nBlack: Bob\n\n\
             1. e4   [e2e4]\n\
             1... e5   [e7e5]\n\
             \nResult: 1/2-1/2 (Stalemate)\n"
        );
        assert_eq!(log.records().len(), 4);
        assert_eq!(log.move_count(), 2);
    }

    #[test]
    fn test_result_only_once() {
        let mut log = MoveLog::open(NullSink, "Ann", "Bob", stamp());
        log.append_result(ResultCode::WhiteWins, "Checkmate").unwrap();
        assert!(matches!(
            log.append_result(ResultCode::Draw, "Stalemate"),
            Err(MoveLogError::ResultAlreadyRecorded)
        ));
        assert!(matches!(
            log.append(5, PieceColor::White, "Kf1", "e1f1"),
            Err(MoveLogError::MoveAfterResult)
        ));
        assert_eq!(log.records().len(), 2);
    }

    #[test]
    fn test_write_failures_are_reported_not_fatal() {
        let mut log = MoveLog::open(BrokenSink, "Ann", "Bob", stamp());
        log.append(1, PieceColor::White, "e4", "e2e4").unwrap();
        let failures = log.close();
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| matches!(f, MoveLogError::Io(_))));
        // in-memory record survives
        assert_eq!(log.move_count(), 1);
    }

    #[test]
    fn test_append_after_close_reports_writer_gone() {
        let mut log = MoveLog::open(NullSink, "Ann", "Bob", stamp());
        log.close();
        assert!(log.is_closed());
        log.append(1, PieceColor::White, "e4", "e2e4").unwrap();
        let failures = log.take_failures();
        assert!(matches!(failures.as_slice(), [MoveLogError::WriterGone]));
    }

    #[test]
    fn test_file_sink_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let first = LogDestination::Directory(dir.path().to_path_buf())
            .open("Ann", "Bob", stamp())
            .unwrap();
        let second = LogDestination::Directory(dir.path().to_path_buf())
            .open("Ann", "Bob", stamp())
            .unwrap();

        let first_path = first.path().unwrap().to_path_buf();
        let second_path = second.path().unwrap().to_path_buf();
        assert_eq!(
            first_path.file_name().unwrap(),
            "chess_moves_20261019_140509.log"
        );
        assert_eq!(
            second_path.file_name().unwrap(),
            "chess_moves_20261019_140509_1.log"
        );

        drop(first);
        drop(second);
        let text = fs::read_to_string(&first_path).unwrap();
        assert!(text.starts_with("Date: 2026-10-19 14:05:09\nWhite: Ann\n"));
    }

    #[test]
    fn test_file_sink_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let result = FileSink::create_in(&blocker, stamp());
        assert!(matches!(result, Err(MoveLogError::Create { .. })));
    }
}
