//! Render-facing views of the game
//!
//! A [`Snapshot`] is the full per-cell picture after an event. Front ends
//! that redraw incrementally consume the [`Frame`] built from the difference
//! between two snapshots.

use crate::board::Cell;
use crate::game::GameState;
use serde::Serialize;

/// What a front end should draw in one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellView {
    Empty,
    Filled,
    /// Covered by the falling piece
    Active,
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => CellView::Empty,
            Cell::Filled => CellView::Filled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` entries
    pub cells: Vec<CellView>,
    pub score: u64,
    pub lines: u32,
    pub state: GameState,
}

/// One cell that changed between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellChange {
    pub index: usize,
    pub cell: CellView,
}

/// Everything a front end needs after one handled event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub changes: Vec<CellChange>,
    pub score: u64,
    pub lines: u32,
    /// Final score, present only on the event that ended the game
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<u64>,
}

impl Snapshot {
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.width)
    }

    /// Cells whose view differs from `previous`
    pub fn diff(&self, previous: &Snapshot) -> Vec<CellChange> {
        self.cells
            .iter()
            .zip(&previous.cells)
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(index, (&cell, _))| CellChange { index, cell })
            .collect()
    }

    /// Frame for the transition `previous` -> `self`
    pub fn frame_since(&self, previous: &Snapshot) -> Frame {
        let ended = previous.state == GameState::Running && self.state == GameState::GameOver;
        Frame {
            changes: self.diff(previous),
            score: self.score,
            lines: self.lines,
            game_over: ended.then_some(self.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cells: Vec<CellView>) -> Snapshot {
        Snapshot {
            width: 2,
            height: cells.len() / 2,
            cells,
            score: 0,
            lines: 0,
            state: GameState::Running,
        }
    }

    #[test]
    fn test_diff_lists_changed_cells() {
        use CellView::*;
        let before = snapshot(vec![Active, Empty, Empty, Filled]);
        let after = snapshot(vec![Empty, Empty, Active, Filled]);
        assert_eq!(
            after.diff(&before),
            vec![
                CellChange { index: 0, cell: Empty },
                CellChange { index: 2, cell: Active },
            ]
        );
        assert!(after.diff(&after).is_empty());
    }

    #[test]
    fn test_rows() {
        use CellView::*;
        let view = snapshot(vec![Empty, Filled, Active, Empty]);
        let rows: Vec<_> = view.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[Active, Empty]);
        assert_eq!(rows[0], &[Empty, Filled]);
    }

    #[test]
    fn test_frame_reports_game_over_once() {
        let before = snapshot(vec![CellView::Empty; 4]);
        let mut after = before.clone();
        after.score = 30;
        after.state = GameState::GameOver;

        let frame = after.frame_since(&before);
        assert_eq!(frame.game_over, Some(30));
        assert_eq!(frame.score, 30);
        assert_eq!(after.frame_since(&after).game_over, None);
    }

    #[test]
    fn test_frame_serializes_without_game_over() {
        let view = snapshot(vec![CellView::Empty; 4]);
        let mut after = view.clone();
        after.cells[3] = CellView::Filled;
        let json = serde_json::to_value(after.frame_since(&view)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "changes": [{ "index": 3, "cell": "filled" }],
                "score": 0,
                "lines": 0,
            })
        );
    }
}
