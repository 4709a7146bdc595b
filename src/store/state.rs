//! The application state record and its getters.

use serde::{Deserialize, Serialize};

/// Process-wide application state. Only [`Mutation`](super::Mutation)s
/// applied through a [`Store`](super::Store) change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub count: i64,
}

impl State {
    pub fn new(count: i64) -> Self {
        Self { count }
    }

    /// Getter: twice the current count, recomputed on every call.
    /// Saturates at the `i64` bounds.
    pub fn double(&self) -> i64 {
        self.count.saturating_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_zero() {
        let state = State::default();
        assert_eq!(state.count, 0);
        assert_eq!(state.double(), 0);
    }

    #[test]
    fn test_double_follows_count() {
        assert_eq!(State::new(21).double(), 42);
        assert_eq!(State::new(-3).double(), -6);
    }

    #[test]
    fn test_double_saturates() {
        assert_eq!(State::new(i64::MAX / 2).double(), i64::MAX - 1);
        assert_eq!(State::new(i64::MAX / 2 + 1).double(), i64::MAX);
        assert_eq!(State::new(i64::MIN / 2 - 1).double(), i64::MIN);
    }
}
