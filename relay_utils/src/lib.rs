mod macros;

/// Returns the version of the contact relay.
pub fn relay_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builder helpers for optional steps in method chains.
pub trait Apply: Sized {
    /// Passes `self` through `f` if `value` is set, otherwise returns it
    /// unchanged.
    ///
    /// ```rust
    /// # use relay_utils::Apply;
    /// let greeting = String::from("Hello").apply_map(Some("World"), |s, name| s + ", " + name);
    /// assert_eq!(greeting, "Hello, World");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_map() {
        let skipped = 1.apply_map(None::<i32>, |a, b| a + b);
        let applied = 1.apply_map(Some(2), |a, b| a + b);

        assert_eq!(skipped, 1);
        assert_eq!(applied, 3);
    }

    #[test]
    fn assert_matches_guard() {
        assert_matches!(Some(3), Some(x) if *x > 2);
    }

    #[test]
    #[should_panic(expected = "did not match")]
    fn assert_matches_mismatch() {
        assert_matches!(None::<i32>, Some(_));
    }

    #[test]
    #[should_panic(expected = "did not match")]
    fn assert_matches_guard_fails() {
        assert_matches!(Some(1), Some(x) if *x > 2);
    }
}
