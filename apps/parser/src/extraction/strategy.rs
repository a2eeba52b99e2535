use tracing::debug;

/// A named extraction pass. Ranked lists of these are tried in order and the
/// first one that produces a value wins.
pub struct Strategy<C: ?Sized, T> {
    pub name: &'static str,
    pub run: fn(&C) -> Option<T>,
}

impl<C: ?Sized, T> Strategy<C, T> {
    pub const fn new(name: &'static str, run: fn(&C) -> Option<T>) -> Self {
        Self { name, run }
    }
}

/// Applies `strategies` in order, returning the first hit.
pub fn run_ranked<C: ?Sized, T>(field: &str, strategies: &[Strategy<C, T>], ctx: &C) -> Option<T> {
    for strategy in strategies {
        if let Some(value) = (strategy.run)(ctx) {
            debug!(field, strategy = strategy.name, "strategy matched");
            return Some(value);
        }
    }
    debug!(field, "no strategy matched");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &str) -> Option<usize> {
        None
    }

    fn length(s: &str) -> Option<usize> {
        Some(s.len())
    }

    fn always_zero(_: &str) -> Option<usize> {
        Some(0)
    }

    #[test]
    fn test_first_hit_wins() {
        let strategies = [
            Strategy::new("never", never as fn(&str) -> Option<usize>),
            Strategy::new("length", length),
            Strategy::new("zero", always_zero),
        ];
        assert_eq!(run_ranked("test", &strategies, "abcd"), Some(4));
    }

    #[test]
    fn test_no_hit() {
        let strategies = [Strategy::new("never", never as fn(&str) -> Option<usize>)];
        assert_eq!(run_ranked("test", &strategies, "abcd"), None);
    }
}
