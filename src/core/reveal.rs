/// Visible fraction at which an element counts as revealed.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.2;

/// One-shot visibility flag: flips to visible the first time the observed
/// fraction reaches the threshold and never flips back.
#[derive(Debug, Clone)]
pub struct RevealOnce {
    threshold: f64,
    visible: bool,
    disposed: bool,
}

impl RevealOnce {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: false,
            disposed: false,
        }
    }

    /// Feeds one intersection update. Returns true only on the update that
    /// reveals the element.
    pub fn observe(&mut self, visible_ratio: f64) -> bool {
        if self.disposed || self.visible {
            return false;
        }
        if visible_ratio >= self.threshold && visible_ratio > 0.0 {
            self.visible = true;
            self.disposed = true;
            return true;
        }
        false
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Stops observing. The current visibility is kept.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Default for RevealOnce {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_THRESHOLD)
    }
}
