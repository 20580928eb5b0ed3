//! Scoring: a flat award per cleared row

/// Points awarded per cleared row unless configured otherwise
pub const DEFAULT_SCORE_PER_ROW: u64 = 10;

/// Score tracking for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total rows cleared
    pub lines: u32,
    per_row: u64,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_PER_ROW)
    }
}

impl Score {
    pub fn new(per_row: u64) -> Self {
        Self {
            points: 0,
            lines: 0,
            per_row,
        }
    }

    /// Credit rows cleared by one lock. Returns the points awarded.
    /// Both counters saturate instead of wrapping.
    pub fn add_rows(&mut self, rows: usize) -> u64 {
        let rows = u64::try_from(rows).unwrap_or(u64::MAX);
        let awarded = self.per_row.saturating_mul(rows);
        self.points = self.points.saturating_add(awarded);
        self.lines = self
            .lines
            .saturating_add(u32::try_from(rows).unwrap_or(u32::MAX));
        awarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let mut score = Score::default();
        assert_eq!(score.add_rows(1), 10);
        assert_eq!(score.points, 10);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_multiple_rows_are_linear() {
        let mut score = Score::default();
        assert_eq!(score.add_rows(4), 40);
        assert_eq!(score.add_rows(2), 20);
        assert_eq!(score.points, 60);
        assert_eq!(score.lines, 6);
    }

    #[test]
    fn test_no_rows_no_points() {
        let mut score = Score::default();
        assert_eq!(score.add_rows(0), 0);
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_custom_award() {
        let mut score = Score::new(0);
        score.add_rows(3);
        assert_eq!(score.points, 0);
        assert_eq!(score.lines, 3);
    }

    #[test]
    fn test_huge_award_saturates() {
        let mut score = Score::new(i64::MAX as u64);
        assert_eq!(score.add_rows(4), u64::MAX);
        assert_eq!(score.points, u64::MAX);
        score.add_rows(1);
        assert_eq!(score.points, u64::MAX);
        assert_eq!(score.lines, 5);
    }

    #[test]
    fn test_line_count_saturates() {
        let mut score = Score::new(1);
        score.lines = u32::MAX - 1;
        score.add_rows(3);
        assert_eq!(score.lines, u32::MAX);
    }
}
