//! Per-index delays across a collection of targets

/// Where the stagger wave starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerFrom {
    /// Animate first to last
    #[default]
    Start,
    /// Animate last to first
    End,
    /// Animate from center outward
    Center,
}

/// Configuration for stagger delays
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    /// Delay between consecutive items (seconds)
    pub each: f32,
    pub from: StaggerFrom,
    /// Optional: stop growing the delay after N items
    pub limit: Option<usize>,
}

impl Stagger {
    /// Stagger items `each` seconds apart, first to last
    pub fn each(each: f32) -> Self {
        Self {
            each,
            from: StaggerFrom::Start,
            limit: None,
        }
    }

    /// Stagger from last to first
    pub fn reverse(mut self) -> Self {
        self.from = StaggerFrom::End;
        self
    }

    /// Stagger from center outward
    pub fn from_center(mut self) -> Self {
        self.from = StaggerFrom::Center;
        self
    }

    /// Limit stagger to first N items
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Calculate delay for a specific item index
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        let effective_index = match self.from {
            StaggerFrom::Start => index,
            StaggerFrom::End => total.saturating_sub(1).saturating_sub(index),
            StaggerFrom::Center => {
                let center = total / 2;
                index.abs_diff(center)
            }
        };

        let capped_index = match self.limit {
            Some(limit) => effective_index.min(limit),
            None => effective_index,
        };

        self.each * capped_index as f32
    }

    /// Largest delay handed out across `total` items
    pub fn max_delay(&self, total: usize) -> f32 {
        (0..total)
            .map(|i| self.delay_for_index(i, total))
            .fold(0.0, f32::max)
    }
}
