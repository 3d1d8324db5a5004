/// Asserts that an expression matches a pattern, optionally with a guard.
///
/// The value is matched by reference, so bindings in the guard are borrowed.
/// Used for error variants that don't implement `PartialEq`.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $guard:expr)? $(,)?) => {{
        let value = $expr;
        #[allow(unused_variables, reason = "bindings are only read by the guard")]
        let matched = ::core::matches!(&value, $pat $(if $guard)?);
        if !matched {
            ::core::panic!(
                "assertion failed: {:?} did not match `{}`",
                value,
                ::core::stringify!($pat $(if $guard)?),
            );
        }
    }};
}
