//! Display generation for the side panel and board overlay.
//!
//! This module transforms match snapshots into display-ready view models.
//! It lives in the UI layer and depends on domain + models, not vice versa.

use crate::domain::{Piece, PieceColor, PieceKind, SelectionState};
use crate::models::{MatchSnapshot, MoveLogRecord};
use crate::ui::view_models::{MoveRow, PromotionPrompt, SidePanelDisplay};

/// Key help lines, in display order
pub const KEY_HELP: [&str; 3] = [
    "Promotion: Q / R / B / N",
    "R: restart",
    "Esc: quit",
];

/// Pair up the logged moves into numbered rows.
pub fn move_rows(records: &[MoveLogRecord]) -> Vec<MoveRow> {
    let mut rows: Vec<MoveRow> = Vec::new();

    for record in records {
        let MoveLogRecord::MoveEntry {
            move_number,
            side_to_move,
            san,
            ..
        } = record
        else {
            continue;
        };

        match side_to_move {
            PieceColor::White => rows.push(MoveRow {
                move_num: *move_number,
                white: Some(san.clone()),
                black: None,
            }),
            PieceColor::Black => match rows.last_mut() {
                Some(row) if row.move_num == *move_number && row.black.is_none() => {
                    row.black = Some(san.clone());
                }
                // game started with Black to move
                _ => rows.push(MoveRow {
                    move_num: *move_number,
                    white: None,
                    black: Some(san.clone()),
                }),
            },
        }
    }

    rows
}

pub fn side_panel_display(snapshot: &MatchSnapshot) -> SidePanelDisplay {
    let turn_line = match snapshot.turn {
        PieceColor::White => format!("Turn: {}", snapshot.players.white),
        PieceColor::Black => format!("Turn: {}", snapshot.players.black),
    };
    let status_line = if snapshot.in_check {
        "Status: Check".to_string()
    } else {
        "Status: OK".to_string()
    };

    SidePanelDisplay {
        white_name: snapshot.players.white.clone(),
        black_name: snapshot.players.black.clone(),
        turn_line,
        in_check: snapshot.in_check,
        status_line,
        move_number_line: format!("Move: {}", snapshot.fullmove_number),
        log_file: snapshot
            .log_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned()),
        rows: move_rows(&snapshot.records),
        result_line: snapshot
            .outcome
            .as_ref()
            .map(|outcome| format!("Result: {outcome}")),
        warning: snapshot.last_warning.clone(),
    }
}

/// The promotion prompt, if one is pending
pub fn promotion_prompt(selection: &SelectionState) -> Option<PromotionPrompt> {
    let SelectionState::AwaitingPromotion { moving_color, .. } = selection else {
        return None;
    };

    let choices = PieceKind::PROMOTIONS
        .iter()
        .map(|&kind| {
            let key = kind.uci_char().to_ascii_uppercase();
            (
                key,
                Piece {
                    kind,
                    color: *moving_color,
                },
            )
        })
        .collect();

    Some(PromotionPrompt {
        color: *moving_color,
        choices,
    })
}
