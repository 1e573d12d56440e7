//! Engine configuration.

/// Tuning for fluid (pointer driven) auto scrolling.
///
/// Thresholds are fractions of the scroll container's size on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    /// Distance from an edge where scrolling starts.
    pub start_from_percentage: f32,
    /// Distance from an edge where the maximum speed is reached.
    pub max_speed_at_percentage: f32,
    /// Pixels per frame at full speed.
    pub max_scroll_speed: f32,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            start_from_percentage: 0.25,
            max_speed_at_percentage: 0.05,
            max_scroll_speed: 28.0,
        }
    }
}

impl AutoScrollConfig {
    /// Quadratic ease applied to how far into the acceleration zone the item is.
    pub fn ease(&self, percentage: f32) -> f32 {
        percentage.powi(2)
    }
}

/// Configuration for a [`DragDropContext`](crate::DragDropContext).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DndConfig {
    pub auto_scroll: AutoScrollConfig,
}

impl DndConfig {
    pub fn with_auto_scroll(mut self, auto_scroll: AutoScrollConfig) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    pub fn with_max_scroll_speed(mut self, speed: f32) -> Self {
        self.auto_scroll.max_scroll_speed = speed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll_speed_keeps_thresholds() {
        let config = DndConfig::default().with_max_scroll_speed(12.0);
        assert_eq!(config.auto_scroll.max_scroll_speed, 12.0);
        assert_eq!(config.auto_scroll.start_from_percentage, 0.25);
    }

    #[test]
    fn test_with_auto_scroll_replaces_everything() {
        let auto_scroll = AutoScrollConfig {
            start_from_percentage: 0.5,
            max_speed_at_percentage: 0.1,
            max_scroll_speed: 40.0,
        };
        let config = DndConfig::default().with_auto_scroll(auto_scroll);
        assert_eq!(config.auto_scroll, auto_scroll);
    }
}
