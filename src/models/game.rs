//! Game model - the match controller.
//!
//! Owns the rules engine, the selection state and the move log, and runs the
//! event-dispatch procedure: one input event is processed completely (state
//! transition, rules-engine call, lifecycle check, log append) before the
//! next one. The presentation layer only reads [`MatchSnapshot`]s.

use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{MatchConfig, Players};
use crate::domain::lifecycle;
use crate::domain::resolver::{self, Resolution};
use crate::domain::{
    BoardGeometry, GameOutcome, Move, Piece, PieceColor, PieceKind, RulesEngine, SelectionState,
    ShakmatyRules, Square, pixel_to_square,
};
use crate::error::{InputRejection, MatchError, MoveLogError};
use crate::models::move_log::{LogDestination, MoveLog, MoveLogRecord, NullSink};

/// Input the controller understands
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer click in presentation coordinates
    Click { x: f32, y: f32 },
    /// Click already mapped to a square
    ClickSquare(Square),
    PromotionChoice(PieceKind),
    /// Key press by name ("q", "r", "escape", ...)
    Key(String),
    Restart,
    Quit,
}

/// A move that was applied and logged
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayedMove {
    /// Fullmove number before the move
    pub move_number: u32,
    pub side: PieceColor,
    pub mv: Move,
    pub san: String,
    pub uci: String,
}

/// What handling one event did
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum EventOutcome {
    Selected,
    Deselected,
    Reselected,
    Moved(PlayedMove),
    PromotionPending,
    /// The move just applied ended the game
    GameOver(GameOutcome),
    Restarted,
    Quit,
    /// State is unchanged
    #[serde(skip)]
    Ignored(InputRejection),
}

/// Read-only view of the match for rendering
#[derive(Clone, Debug, Serialize)]
pub struct MatchSnapshot {
    /// Pieces indexed by `rank * 8 + file`
    pub board: Vec<Option<Piece>>,
    pub selection: SelectionState,
    pub outcome: Option<GameOutcome>,
    pub turn: PieceColor,
    pub in_check: bool,
    pub fullmove_number: u32,
    pub players: Players,
    pub log_path: Option<PathBuf>,
    pub records: Vec<MoveLogRecord>,
    pub last_warning: Option<String>,
    pub geometry: BoardGeometry,
}

impl MatchSnapshot {
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board
            .get(square.rank() as usize * 8 + square.file() as usize)
            .copied()
            .flatten()
    }
}

/// The match controller
pub struct GameModel<R: RulesEngine = ShakmatyRules> {
    rules: R,
    selection: SelectionState,
    log: MoveLog,
    players: Players,
    destination: LogDestination,
    geometry: BoardGeometry,
    last_warning: Option<String>,
    /// Set by a rules-engine inconsistency; cleared by restart
    aborted: bool,
    quit_requested: bool,
}

impl GameModel<ShakmatyRules> {
    /// Start a match from the standard position as configured
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::with_rules(
            ShakmatyRules::new(),
            config.players(),
            config.log_destination(),
            config.geometry(),
        )
    }
}

impl<R: RulesEngine> GameModel<R> {
    /// Start a match on `rules`. Opens the first game's log.
    pub fn with_rules(
        rules: R,
        players: Players,
        destination: LogDestination,
        geometry: BoardGeometry,
    ) -> Self {
        let (log, warning) = open_log(&destination, &players);
        info!(white = %players.white, black = %players.black, "match started");
        Self {
            rules,
            selection: SelectionState::Idle,
            log,
            players,
            destination,
            geometry,
            last_warning: warning,
            aborted: false,
            quit_requested: false,
        }
    }

    /// Process one input event to completion
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: InputEvent) -> Result<EventOutcome, MatchError> {
        let result = self.dispatch(event);
        self.drain_log_failures();

        match &result {
            Ok(EventOutcome::Ignored(reason)) => debug!(%reason, "input ignored"),
            Ok(outcome) => debug!(?outcome, "event handled"),
            Err(_) => {}
        }
        result
    }

    pub fn click(&mut self, x: f32, y: f32) -> Result<EventOutcome, MatchError> {
        self.handle_event(InputEvent::Click { x, y })
    }

    pub fn click_square(&mut self, square: Square) -> Result<EventOutcome, MatchError> {
        self.handle_event(InputEvent::ClickSquare(square))
    }

    pub fn promotion_choice(&mut self, kind: PieceKind) -> Result<EventOutcome, MatchError> {
        self.handle_event(InputEvent::PromotionChoice(kind))
    }

    pub fn key(&mut self, name: &str) -> Result<EventOutcome, MatchError> {
        self.handle_event(InputEvent::Key(name.to_string()))
    }

    pub fn restart(&mut self) -> Result<EventOutcome, MatchError> {
        self.handle_event(InputEvent::Restart)
    }

    /// Flush and close the log. Accepted in every state, including after an abort.
    pub fn quit(&mut self) -> EventOutcome {
        let outcome = self.on_quit();
        self.drain_log_failures();
        outcome
    }

    /// Replace the board geometry (panel resized)
    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.selection.outcome()
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut board = vec![None; 64];
        for square in Square::all() {
            board[square.rank() as usize * 8 + square.file() as usize] =
                self.rules.piece_at(square);
        }

        MatchSnapshot {
            board,
            selection: self.selection.clone(),
            outcome: self.selection.outcome().cloned(),
            turn: self.rules.turn(),
            in_check: self.rules.is_check(),
            fullmove_number: self.rules.fullmove_number(),
            players: self.players.clone(),
            log_path: self.log.path().map(|p| p.to_path_buf()),
            records: self.log.records().to_vec(),
            last_warning: self.last_warning.clone(),
            geometry: self.geometry,
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> Result<EventOutcome, MatchError> {
        match event {
            InputEvent::Quit => Ok(self.on_quit()),
            InputEvent::Restart => Ok(self.on_restart()),
            InputEvent::Key(name) => match self.key_event(&name) {
                Ok(event) => self.dispatch(event),
                Err(rejection) => Ok(EventOutcome::Ignored(rejection)),
            },
            InputEvent::Click { x, y } => {
                self.ensure_live()?;
                match pixel_to_square(x, y, &self.geometry) {
                    Some(square) => self.on_square(square),
                    None => Ok(EventOutcome::Ignored(
                        InputRejection::CoordinateOutOfBounds { x, y },
                    )),
                }
            }
            InputEvent::ClickSquare(square) => {
                self.ensure_live()?;
                self.on_square(square)
            }
            InputEvent::PromotionChoice(kind) => {
                self.ensure_live()?;
                self.on_promotion(kind)
            }
        }
    }

    fn ensure_live(&self) -> Result<(), MatchError> {
        if self.aborted {
            Err(MatchError::Aborted)
        } else {
            Ok(())
        }
    }

    /// Map a key name onto a controller event
    fn key_event(&self, name: &str) -> Result<InputEvent, InputRejection> {
        let name = name.to_ascii_lowercase();
        if name == "escape" || name == "esc" {
            return Ok(InputEvent::Quit);
        }

        let promotion = PieceKind::from_promotion_key(&name);
        if matches!(self.selection, SelectionState::AwaitingPromotion { .. }) {
            return promotion
                .map(InputEvent::PromotionChoice)
                .ok_or(InputRejection::InvalidPromotionChoice);
        }

        match (name.as_str(), promotion) {
            ("r", _) => Ok(InputEvent::Restart),
            (_, Some(kind)) => Ok(InputEvent::PromotionChoice(kind)),
            _ => Err(InputRejection::UnboundKey),
        }
    }

    fn on_square(&mut self, square: Square) -> Result<EventOutcome, MatchError> {
        let selected = match &self.selection {
            SelectionState::Terminal(_) => {
                return Ok(EventOutcome::Ignored(InputRejection::GameOver));
            }
            SelectionState::AwaitingPromotion { .. } => {
                return Ok(EventOutcome::Ignored(InputRejection::PromotionPending));
            }
            SelectionState::Idle => None,
            SelectionState::Selected { square, .. } => Some(*square),
        };

        let Some(selected) = selected else {
            if self.is_own_piece(square) {
                self.select(square);
                return Ok(EventOutcome::Selected);
            }
            return Ok(EventOutcome::Ignored(InputRejection::InvalidTarget(square)));
        };

        if square == selected {
            self.selection = SelectionState::Idle;
            return Ok(EventOutcome::Deselected);
        }

        if self.is_own_piece(square) {
            self.select(square);
            return Ok(EventOutcome::Reselected);
        }

        match resolver::resolve(&self.rules, &self.selection, square) {
            Ok(Resolution::Move(mv)) => self.play(mv),
            Ok(Resolution::RequiresPromotion {
                from,
                to,
                moving_color,
            }) => {
                self.selection = SelectionState::AwaitingPromotion {
                    from,
                    to,
                    moving_color,
                };
                Ok(EventOutcome::PromotionPending)
            }
            Err(rejection) => Ok(EventOutcome::Ignored(rejection)),
        }
    }

    fn on_promotion(&mut self, kind: PieceKind) -> Result<EventOutcome, MatchError> {
        match &self.selection {
            SelectionState::Terminal(_) => Ok(EventOutcome::Ignored(InputRejection::GameOver)),
            SelectionState::AwaitingPromotion { .. } => {
                match resolver::complete_promotion(&self.selection, kind) {
                    Ok(mv) => self.play(mv),
                    Err(rejection) => Ok(EventOutcome::Ignored(rejection)),
                }
            }
            _ => Ok(EventOutcome::Ignored(
                InputRejection::InvalidPromotionChoice,
            )),
        }
    }

    fn is_own_piece(&self, square: Square) -> bool {
        self.rules
            .piece_at(square)
            .is_some_and(|piece| piece.color == self.rules.turn())
    }

    /// Select `square` with destinations fresh from the rules engine
    fn select(&mut self, square: Square) {
        let destinations = self
            .rules
            .legal_moves()
            .into_iter()
            .filter(|m| m.from == square)
            .map(|m| m.to)
            .collect();
        self.selection = SelectionState::Selected {
            square,
            destinations,
        };
    }

    /// Apply, log, then check the lifecycle once
    fn play(&mut self, mv: Move) -> Result<EventOutcome, MatchError> {
        let side = self.rules.turn();
        let move_number = self.rules.fullmove_number();

        let applied = match resolver::apply(&mut self.rules, mv) {
            Ok(applied) => applied,
            Err(e) => {
                self.aborted = true;
                self.selection = SelectionState::Idle;
                return Err(e);
            }
        };
        info!(move_number, %side, san = %applied.san, uci = %applied.uci, "move applied");

        if let Err(e) = self
            .log
            .append(move_number, side, &applied.san, &applied.uci)
        {
            self.note_log_failure(e);
        }

        let played = PlayedMove {
            move_number,
            side,
            mv,
            san: applied.san,
            uci: applied.uci,
        };

        match lifecycle::evaluate(&self.rules) {
            Some(outcome) => {
                info!(%outcome, "game over");
                if let Err(e) = self.log.append_result(outcome.code, &outcome.reason) {
                    self.note_log_failure(e);
                }
                self.selection = SelectionState::Terminal(outcome.clone());
                Ok(EventOutcome::GameOver(outcome))
            }
            None => {
                self.selection = SelectionState::Idle;
                Ok(EventOutcome::Moved(played))
            }
        }
    }

    fn on_restart(&mut self) -> EventOutcome {
        for failure in self.log.close() {
            self.note_log_failure(failure);
        }

        self.rules.reset();
        self.selection = SelectionState::Idle;
        self.aborted = false;
        self.quit_requested = false;

        let (log, warning) = open_log(&self.destination, &self.players);
        self.log = log;
        if warning.is_some() {
            self.last_warning = warning;
        }
        info!("match restarted");
        EventOutcome::Restarted
    }

    fn on_quit(&mut self) -> EventOutcome {
        for failure in self.log.close() {
            self.note_log_failure(failure);
        }
        self.quit_requested = true;
        info!("quit requested");
        EventOutcome::Quit
    }

    fn drain_log_failures(&mut self) {
        for failure in self.log.take_failures() {
            self.note_log_failure(failure);
        }
    }

    fn note_log_failure(&mut self, failure: MoveLogError) {
        warn!(%failure, "move log failure");
        self.last_warning = Some(failure.to_string());
    }
}

/// Open a game's log, falling back to a discarding log if the file cannot be created
fn open_log(destination: &LogDestination, players: &Players) -> (MoveLog, Option<String>) {
    let timestamp = Local::now().naive_local();
    match destination.open(&players.white, &players.black, timestamp) {
        Ok(log) => {
            if let Some(path) = log.path() {
                info!(path = %path.display(), "move log opened");
            }
            (log, None)
        }
        Err(e) => {
            warn!(error = %e, "move log unavailable, moves will not be saved");
            let log = MoveLog::open(NullSink, &players.white, &players.black, timestamp);
            (log, Some(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppliedMove;
    use crate::error::RulesError;
    use crate::models::{LogSink, MemorySink, SinkFactory};
    use std::collections::BTreeSet;
    use std::io;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    fn model() -> GameModel {
        model_on(ShakmatyRules::new())
    }

    fn model_on<R: RulesEngine>(rules: R) -> GameModel<R> {
        GameModel::with_rules(
            rules,
            Players::default(),
            LogDestination::Disabled,
            BoardGeometry::new(20.0, 20.0, 80.0),
        )
    }

    /// Rules engine that lists a move it then refuses to play
    struct LyingRules(ShakmatyRules);

    impl RulesEngine for LyingRules {
        fn legal_moves(&self) -> Vec<Move> {
            let mut moves = self.0.legal_moves();
            moves.push(Move::new(sq("e2"), sq("e5")));
            moves
        }
        fn apply(&mut self, mv: &Move) -> Result<AppliedMove, RulesError> {
            self.0.apply(mv)
        }
        fn piece_at(&self, square: Square) -> Option<Piece> {
            self.0.piece_at(square)
        }
        fn turn(&self) -> PieceColor {
            self.0.turn()
        }
        fn fullmove_number(&self) -> u32 {
            self.0.fullmove_number()
        }
        fn is_check(&self) -> bool {
            self.0.is_check()
        }
        fn is_checkmate(&self) -> bool {
            self.0.is_checkmate()
        }
        fn is_stalemate(&self) -> bool {
            self.0.is_stalemate()
        }
        fn is_insufficient_material(&self) -> bool {
            self.0.is_insufficient_material()
        }
        fn can_claim_fifty_moves(&self) -> bool {
            self.0.can_claim_fifty_moves()
        }
        fn can_claim_threefold_repetition(&self) -> bool {
            self.0.can_claim_threefold_repetition()
        }
        fn reset(&mut self) {
            self.0.reset()
        }
    }

    #[test]
    fn test_select_and_move() {
        let mut game = model();
        assert_eq!(game.click_square(sq("e2")).unwrap(), EventOutcome::Selected);
        let expected: BTreeSet<_> = [sq("e3"), sq("e4")].into_iter().collect();
        assert_eq!(
            game.selection(),
            &SelectionState::Selected {
                square: sq("e2"),
                destinations: expected,
            }
        );

        let outcome = game.click_square(sq("e4")).unwrap();
        let EventOutcome::Moved(played) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!(played.move_number, 1);
        assert_eq!(played.side, PieceColor::White);
        assert_eq!(played.san, "e4");
        assert_eq!(played.uci, "e2e4");
        assert_eq!(game.selection(), &SelectionState::Idle);
    }

    #[test]
    fn test_pixel_click_goes_through_geometry() {
        let mut game = model();
        // e2: column 4, row 6
        let outcome = game.click(20.0 + 4.5 * 80.0, 20.0 + 6.5 * 80.0).unwrap();
        assert_eq!(outcome, EventOutcome::Selected);
        assert_eq!(
            game.click(5.0, 5.0).unwrap(),
            EventOutcome::Ignored(InputRejection::CoordinateOutOfBounds { x: 5.0, y: 5.0 })
        );
        assert_eq!(game.selection().selected_square(), Some(sq("e2")));

        game.set_geometry(BoardGeometry::new(0.0, 0.0, 10.0));
        // e4: column 4, row 4
        assert!(matches!(game.click(45.0, 45.0).unwrap(), EventOutcome::Moved(_)));
    }

    #[test]
    fn test_deselect_and_reselect() {
        let mut game = model();
        game.click_square(sq("g1")).unwrap();
        assert_eq!(game.click_square(sq("g1")).unwrap(), EventOutcome::Deselected);
        assert_eq!(game.selection(), &SelectionState::Idle);

        game.click_square(sq("g1")).unwrap();
        assert_eq!(game.click_square(sq("b1")).unwrap(), EventOutcome::Reselected);
        assert_eq!(game.selection().selected_square(), Some(sq("b1")));
    }

    #[test]
    fn test_invalid_target_keeps_selection() {
        let mut game = model();
        game.click_square(sq("e2")).unwrap();
        let before = game.selection().clone();
        assert_eq!(
            game.click_square(sq("e6")).unwrap(),
            EventOutcome::Ignored(InputRejection::InvalidTarget(sq("e6")))
        );
        assert_eq!(game.selection(), &before);
    }

    #[test]
    fn test_opponent_piece_not_selectable() {
        let mut game = model();
        assert_eq!(
            game.click_square(sq("e7")).unwrap(),
            EventOutcome::Ignored(InputRejection::InvalidTarget(sq("e7")))
        );
        assert_eq!(game.selection(), &SelectionState::Idle);
    }

    #[test]
    fn test_promotion_flow() {
        let rules = ShakmatyRules::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let mut game = model_on(rules);
        game.click_square(sq("a7")).unwrap();
        assert_eq!(game.click_square(sq("a8")).unwrap(), EventOutcome::PromotionPending);

        // board clicks and bad keys are ignored while pending
        assert_eq!(
            game.click_square(sq("e1")).unwrap(),
            EventOutcome::Ignored(InputRejection::PromotionPending)
        );
        assert_eq!(
            game.key("x").unwrap(),
            EventOutcome::Ignored(InputRejection::InvalidPromotionChoice)
        );
        assert_eq!(
            game.promotion_choice(PieceKind::King).unwrap(),
            EventOutcome::Ignored(InputRejection::InvalidPromotionChoice)
        );

        // "r" means rook here, not restart
        let outcome = game.key("R").unwrap();
        let EventOutcome::Moved(played) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!(played.uci, "a7a8r");
        assert_eq!(played.san, "a8=R");
        assert_eq!(game.rules().piece_at(sq("a8")).unwrap().kind, PieceKind::Rook);
    }

    #[test]
    fn test_keys_outside_promotion() {
        let mut game = model();
        assert_eq!(
            game.key("q").unwrap(),
            EventOutcome::Ignored(InputRejection::InvalidPromotionChoice)
        );
        assert_eq!(
            game.key("z").unwrap(),
            EventOutcome::Ignored(InputRejection::UnboundKey)
        );
        assert_eq!(game.key("r").unwrap(), EventOutcome::Restarted);
        assert_eq!(game.key("Escape").unwrap(), EventOutcome::Quit);
        assert!(game.quit_requested());
    }

    #[test]
    fn test_checkmate_is_terminal() {
        let mut game = model();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            game.click_square(sq(from)).unwrap();
            game.click_square(sq(to)).unwrap();
        }

        let outcome = game.outcome().unwrap().clone();
        assert_eq!(outcome.code.as_str(), "0-1");
        assert_eq!(outcome.reason, "Checkmate");

        assert_eq!(
            game.click_square(sq("e1")).unwrap(),
            EventOutcome::Ignored(InputRejection::GameOver)
        );
        assert_eq!(
            game.promotion_choice(PieceKind::Queen).unwrap(),
            EventOutcome::Ignored(InputRejection::GameOver)
        );
        assert_eq!(game.outcome(), Some(&outcome));
        assert!(game.log().has_result());
    }

    #[test]
    fn test_restart_resets_everything() {
        let sink = MemorySink::new();
        let mut game = GameModel::with_rules(
            ShakmatyRules::new(),
            Players::new("Ann", "Bob"),
            LogDestination::Memory(sink.clone()),
            BoardGeometry::new(20.0, 20.0, 80.0),
        );
        game.click_square(sq("e2")).unwrap();
        game.click_square(sq("e4")).unwrap();
        game.click_square(sq("e7")).unwrap();

        assert_eq!(game.restart().unwrap(), EventOutcome::Restarted);
        assert_eq!(game.selection(), &SelectionState::Idle);
        assert_eq!(game.rules().turn(), PieceColor::White);
        assert_eq!(game.log().records().len(), 1);

        game.quit();
        assert_eq!(sink.contents().matches("White: Ann").count(), 2);
        assert!(sink.contents().contains("1. e4   [e2e4]\n"));
    }

    #[test]
    fn test_inconsistency_aborts_until_restart() {
        let mut game = model_on(LyingRules(ShakmatyRules::new()));
        game.click_square(sq("e2")).unwrap();
        let result = game.click_square(sq("e5"));
        assert!(matches!(
            result,
            Err(MatchError::RulesEngineInconsistency { .. })
        ));
        assert!(game.is_aborted());
        assert_eq!(game.log().move_count(), 0);

        assert!(matches!(game.click_square(sq("d2")), Err(MatchError::Aborted)));
        assert_eq!(game.quit(), EventOutcome::Quit);
        assert!(game.quit_requested());
        assert_eq!(game.restart().unwrap(), EventOutcome::Restarted);
        assert!(!game.is_aborted());
        assert_eq!(game.click_square(sq("d2")).unwrap(), EventOutcome::Selected);
    }

    #[test]
    fn test_unwritable_log_dir_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let mut game = GameModel::with_rules(
            ShakmatyRules::new(),
            Players::default(),
            LogDestination::Directory(blocker),
            BoardGeometry::new(20.0, 20.0, 80.0),
        );
        assert!(game.last_warning().is_some());
        assert!(game.log().path().is_none());

        game.click_square(sq("e2")).unwrap();
        assert!(matches!(game.click_square(sq("e4")).unwrap(), EventOutcome::Moved(_)));
        assert_eq!(game.log().move_count(), 1);
    }

    /// Sink that fails every write
    struct FailingSink;

    impl LogSink for FailingSink {
        fn write_record(&mut self, _record: &MoveLogRecord) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_write_failure_is_a_warning() {
        let factory: SinkFactory = Arc::new(|| Box::new(FailingSink) as Box<dyn LogSink>);
        let mut game = GameModel::with_rules(
            ShakmatyRules::new(),
            Players::default(),
            LogDestination::Custom(factory),
            BoardGeometry::new(20.0, 20.0, 80.0),
        );
        assert!(game.last_warning().is_none());

        game.click_square(sq("e2")).unwrap();
        assert!(matches!(game.click_square(sq("e4")).unwrap(), EventOutcome::Moved(_)));

        // failures arrive from the writer thread and surface on a later event
        for _ in 0..200 {
            if game.last_warning().is_some() {
                break;
            }
            game.key("x").unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        assert!(game.last_warning().unwrap().contains("disk full"));

        game.click_square(sq("e7")).unwrap();
        assert!(matches!(game.click_square(sq("e5")).unwrap(), EventOutcome::Moved(_)));
        assert_eq!(game.log().move_count(), 2);
        assert_eq!(game.rules().turn(), PieceColor::White);

        assert_eq!(game.quit(), EventOutcome::Quit);
        assert!(game.last_warning().is_some());
    }

    #[test]
    fn test_snapshot() {
        let mut game = model();
        game.click_square(sq("e2")).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.turn, PieceColor::White);
        assert!(!snapshot.in_check);
        assert_eq!(snapshot.fullmove_number, 1);
        assert_eq!(snapshot.piece_at(sq("e1")).unwrap().kind, PieceKind::King);
        assert!(snapshot.piece_at(sq("e4")).is_none());
        assert_eq!(snapshot.selection.destinations().count(), 2);
        assert_eq!(snapshot.records.len(), 1);
        assert!(snapshot.outcome.is_none());
        assert_eq!(snapshot.players.white, "White");
    }
}
