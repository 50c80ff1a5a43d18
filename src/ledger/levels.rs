//! Level thresholds and XP math
//!
//! Levels derive from a tiered requirement table: `thresholds[i]` is the XP
//! needed to climb from level `i` to `i + 1`. The table length is the
//! maximum attainable level; whoever clears every threshold stops earning.

/// Tiered XP requirement table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

/// Where a total XP value lands in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: usize,
    /// XP accumulated past the last completed threshold
    pub xp_into_level: u64,
    /// XP still needed to reach the next level; `None` at max level
    pub xp_to_next: Option<u64>,
}

impl LevelTable {
    pub fn new(thresholds: Vec<u64>) -> Self {
        Self { thresholds }
    }

    /// Walk the table from level 0, consuming thresholds while they fit
    pub fn progress_for(&self, total_xp: u64) -> LevelProgress {
        let mut level = 0;
        let mut remaining = total_xp;
        while level < self.thresholds.len() && remaining >= self.thresholds[level] {
            remaining -= self.thresholds[level];
            level += 1;
        }
        LevelProgress {
            level,
            xp_into_level: remaining,
            // The walk stopped here, so remaining is below the next threshold
            xp_to_next: self.thresholds.get(level).map(|t| t - remaining),
        }
    }

    pub fn is_max_level(&self, level: usize) -> bool {
        level >= self.thresholds.len()
    }

    /// Maximum attainable level
    pub fn max_level(&self) -> usize {
        self.thresholds.len()
    }
}
