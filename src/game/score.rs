// Score keeping

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    points: u32,
    best: u32,
}

impl Score {
    pub fn add_point(&mut self) -> u32 {
        self.points += 1;
        self.best = self.best.max(self.points);
        self.points
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Highest score seen since the game started
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Start a new round, keeping the best score
    pub fn reset(&mut self) {
        self.points = 0;
    }
}
