//! Application layer - the match controller and its move log.

pub mod game;
pub mod move_log;

pub use game::{EventOutcome, GameModel, InputEvent, MatchSnapshot, PlayedMove};
pub use move_log::{
    FileSink, LogDestination, LogSink, MemorySink, MoveLog, MoveLogRecord, NullSink, SinkFactory,
};
