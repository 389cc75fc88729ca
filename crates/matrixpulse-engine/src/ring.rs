//! Bounded FIFO alert buffer

use matrixpulse_core::Alert;
use std::collections::VecDeque;

/// Append-only alert buffer with FIFO eviction
///
/// Holds at most `capacity` alerts; appending to a full ring drops the
/// oldest entry first. Iteration order is chronological (oldest first).
#[derive(Debug)]
pub struct AlertRing {
    buffer: VecDeque<Alert>,
    capacity: usize,
}

impl AlertRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an alert, evicting the oldest entry when full
    pub fn push(&mut self, alert: Alert) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(alert);
    }

    /// Chronological copy of the current contents
    pub fn snapshot(&self) -> Vec<Alert> {
        self.buffer.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matrixpulse_core::AlertLevel;

    fn alert(seq: usize) -> Alert {
        Alert {
            level: AlertLevel::High,
            symbol: "A-B".to_string(),
            message: format!("alert {seq}"),
            value: seq as f64,
            threshold: 0.5,
            time: Utc::now(),
        }
    }

    #[test]
    fn starts_empty() {
        let ring = AlertRing::new(100);
        assert!(ring.is_empty());
        assert!(ring.snapshot().is_empty());
    }

    #[test]
    fn holds_up_to_capacity() {
        let mut ring = AlertRing::new(100);
        for i in 0..100 {
            ring.push(alert(i));
        }
        assert_eq!(ring.len(), 100);
        let snapshot = ring.snapshot();
        assert_eq!(snapshot.first().unwrap().value, 0.0);
        assert_eq!(snapshot.last().unwrap().value, 99.0);
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut ring = AlertRing::new(100);
        for i in 0..101 {
            ring.push(alert(i));
        }
        assert_eq!(ring.len(), 100);

        let snapshot = ring.snapshot();
        // The first-ever alert is gone; the newest is present.
        assert_eq!(snapshot.first().unwrap().value, 1.0);
        assert_eq!(snapshot.last().unwrap().value, 100.0);
    }

    #[test]
    fn order_stays_chronological_across_many_overflows() {
        let mut ring = AlertRing::new(10);
        for i in 0..73 {
            ring.push(alert(i));
        }
        assert_eq!(ring.len(), 10);

        let values: Vec<f64> = ring.snapshot().iter().map(|a| a.value).collect();
        let expected: Vec<f64> = (63..73).map(|i| i as f64).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn snapshot_is_a_defensive_copy() {
        let mut ring = AlertRing::new(10);
        ring.push(alert(0));
        let snapshot = ring.snapshot();
        ring.push(alert(1));
        assert_eq!(snapshot.len(), 1);
    }
}
