use std::collections::HashSet;

/// ICAO24 addresses already alerted that are still inside the radius.
///
/// An aircraft alerts once on entry; it becomes eligible again only after a
/// cycle in which it was not seen in range.
#[derive(Debug, Clone, Default)]
pub struct AlertTracker {
    active: HashSet<String>,
}

impl AlertTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, icao24: &str) -> bool {
        self.active.contains(icao24)
    }

    /// Returns `false` if the aircraft was already active.
    pub fn mark_active(&mut self, icao24: &str) -> bool {
        self.active.insert(icao24.to_string())
    }

    /// Forget every aircraft not present in `current`.
    pub fn retain_only(&mut self, current: &HashSet<String>) {
        self.active.retain(|icao24| current.contains(icao24));
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_retain() {
        let mut tracker = AlertTracker::new();
        assert!(tracker.mark_active("43c6f1"));
        assert!(!tracker.mark_active("43c6f1"));
        assert!(tracker.mark_active("ae04d2"));
        assert_eq!(tracker.len(), 2);

        let current: HashSet<String> = ["ae04d2".to_string()].into_iter().collect();
        tracker.retain_only(&current);

        assert!(!tracker.is_active("43c6f1"));
        assert!(tracker.is_active("ae04d2"));

        tracker.retain_only(&HashSet::new());
        assert!(tracker.is_empty());
    }
}
