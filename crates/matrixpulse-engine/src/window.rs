//! Fixed-capacity rolling sample window
//!
//! One writer (the ingest path for the owning symbol) and any number of
//! readers (the compute path). Each window carries its own lock so that
//! ingesting one symbol never blocks ingesting or snapshotting another.

use parking_lot::RwLock;

/// Circular buffer of the most recent `capacity` samples
#[derive(Debug)]
pub struct RollingWindow {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    data: Vec<f64>,
    idx: usize,
    filled: bool,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                data: vec![0.0; capacity],
                idx: 0,
                filled: false,
            }),
        }
    }

    /// Overwrite the oldest slot with `value`
    ///
    /// Once the buffer has wrapped, `filled` stays set for the lifetime of
    /// the window.
    pub fn push(&self, value: f64) {
        let mut inner = self.inner.write();
        let capacity = inner.data.len();
        let idx = inner.idx;
        inner.data[idx] = value;
        inner.idx += 1;
        if inner.idx == capacity {
            inner.idx = 0;
            inner.filled = true;
        }
    }

    /// Copy out the current contents in chronological order
    pub fn snapshot(&self) -> Vec<f64> {
        let inner = self.inner.read();
        if !inner.filled {
            return inner.data[..inner.idx].to_vec();
        }

        let mut out = Vec::with_capacity(inner.data.len());
        out.extend_from_slice(&inner.data[inner.idx..]);
        out.extend_from_slice(&inner.data[..inner.idx]);
        out
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        if inner.filled {
            inner.data.len()
        } else {
            inner.idx
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_snapshots_empty() {
        let window = RollingWindow::new(10);
        assert!(window.is_empty());
        assert!(window.snapshot().is_empty());
    }

    #[test]
    fn partial_fill_preserves_insertion_order() {
        let window = RollingWindow::new(10);
        for v in [1.0, 2.0, 3.0] {
            window.push(v);
        }
        assert_eq!(window.len(), 3);
        assert_eq!(window.snapshot(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn exact_fill_is_chronological() {
        let window = RollingWindow::new(4);
        for v in 0..4 {
            window.push(v as f64);
        }
        assert_eq!(window.len(), 4);
        assert_eq!(window.snapshot(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn wrap_around_evicts_oldest() {
        let window = RollingWindow::new(4);
        for v in 0..6 {
            window.push(v as f64);
        }
        assert_eq!(window.len(), 4);
        assert_eq!(window.snapshot(), vec![2.0, 3.0, 4.0, 5.0]);
    }

    // Property: for any push sequence of length L, the snapshot is the last
    // min(L, W) values in chronological order.
    #[test]
    fn snapshot_is_last_min_l_w_values() {
        for capacity in [1usize, 3, 10, 17] {
            for pushes in [0usize, 1, 5, 10, 23, 40] {
                let window = RollingWindow::new(capacity);
                for i in 0..pushes {
                    window.push(i as f64);
                }

                let kept = pushes.min(capacity);
                let expected: Vec<f64> =
                    ((pushes - kept)..pushes).map(|i| i as f64).collect();
                assert_eq!(
                    window.snapshot(),
                    expected,
                    "capacity={capacity} pushes={pushes}"
                );
            }
        }
    }

    #[test]
    fn filled_flag_is_permanent() {
        let window = RollingWindow::new(3);
        for v in 0..3 {
            window.push(v as f64);
        }
        assert_eq!(window.len(), 3);
        window.push(99.0);
        assert_eq!(window.len(), 3);
        assert_eq!(window.snapshot(), vec![1.0, 2.0, 99.0]);
    }
}
