/// Running total of merge values for the current game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    total: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one move's merge total into the score.
    #[inline]
    pub fn record(&mut self, merged: u64) {
        self.total = self.total.saturating_add(merged);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.total = 0;
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }
}
