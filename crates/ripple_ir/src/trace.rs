//! Per-signal time series of boolean values.
//!
//! A [`Trace`] pairs a signal name with one value per simulation cycle.
//! Input traces arrive fully populated from the parser; output traces are
//! allocated empty by the simulator and filled in one cycle at a time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered, fixed-length sequence of boolean values for one signal.
///
/// A `None` entry means the value has not been computed yet; input traces
/// never contain `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// The signal this trace belongs to.
    pub signal: String,
    /// One value per cycle, `None` until computed.
    pub values: Vec<Option<bool>>,
}

impl Trace {
    /// Creates an all-unknown trace of the given length.
    pub fn new(signal: impl Into<String>, len: usize) -> Self {
        Self {
            signal: signal.into(),
            values: vec![None; len],
        }
    }

    /// Creates a fully-populated trace from a bit slice.
    pub fn from_bits(signal: impl Into<String>, bits: &[bool]) -> Self {
        Self {
            signal: signal.into(),
            values: bits.iter().map(|&b| Some(b)).collect(),
        }
    }

    /// Returns the number of cycles this trace covers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the trace covers no cycles.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at the given cycle, or `None` if out of range or
    /// not yet computed.
    pub fn get(&self, cycle: usize) -> Option<bool> {
        self.values.get(cycle).copied().flatten()
    }

    /// Sets the value at the given cycle.
    ///
    /// # Panics
    ///
    /// Panics if `cycle` is out of range.
    pub fn set(&mut self, cycle: usize, value: bool) {
        self.values[cycle] = Some(value);
    }
}

impl fmt::Display for Trace {
    /// Renders the bit string followed by the signal name, e.g. `0101 = out`.
    /// Holes render as `x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.values {
            match v {
                Some(true) => write!(f, "1")?,
                Some(false) => write!(f, "0")?,
                None => write!(f, "x")?,
            }
        }
        write!(f, " = {}", self.signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_all_unknown() {
        let t = Trace::new("out", 4);
        assert_eq!(t.len(), 4);
        assert!(t.values.iter().all(Option::is_none));
    }

    #[test]
    fn from_bits_is_populated() {
        let t = Trace::from_bits("clk", &[true, false, true]);
        assert_eq!(t.get(0), Some(true));
        assert_eq!(t.get(1), Some(false));
        assert_eq!(t.get(2), Some(true));
        assert_eq!(t.get(3), None);
    }

    #[test]
    fn set_then_get() {
        let mut t = Trace::new("out", 2);
        t.set(1, true);
        assert_eq!(t.get(0), None);
        assert_eq!(t.get(1), Some(true));
    }

    #[test]
    fn empty_trace() {
        let t = Trace::new("out", 0);
        assert!(t.is_empty());
    }

    #[test]
    fn display_format() {
        let mut t = Trace::new("out", 4);
        t.set(0, false);
        t.set(1, true);
        t.set(2, false);
        assert_eq!(t.to_string(), "010x = out");
    }

    #[test]
    fn serde_roundtrip() {
        let t = Trace::from_bits("x", &[true, true, false]);
        let json = serde_json::to_string(&t).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
