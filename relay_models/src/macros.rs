/// Declares a free-text form field that is sanitized on construction and
/// capped at the given number of characters.
macro_rules! sanitized_text {
    ($(#[$meta:meta])* $ident:ident, $max_len:literal) => {
        $(#[$meta])*
        #[::nutype::nutype(
            sanitize(with = |s: String| crate::sanitize::sanitize_text(&s, $max_len)),
            derive(Debug, Clone, PartialEq, Eq, From, Deref, AsRef, Display)
        )]
        pub struct $ident(String);

        impl $ident {
            pub const MAX_LEN: usize = $max_len;
        }
    };
}

pub(crate) use sanitized_text;
