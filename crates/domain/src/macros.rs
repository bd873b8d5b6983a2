//! Macro for implementing Display and FromStr for state enums
//!
//! Duty and slot states travel through logs, CLI arguments and the REST API
//! as strings. This macro keeps the string form of each variant in one place
//! and gives case-insensitive parsing for free.
//!
//! # Example
//!
//! ```rust
//! use logchecker_domain::impl_state_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Day,
//!     Night,
//! }
//!
//! impl_state_conversions!(Shift {
//!     Day => "Day",
//!     Night => "Night",
//! });
//!
//! assert_eq!("NIGHT".parse::<Shift>().unwrap(), Shift::Night);
//! assert_eq!(Shift::Day.to_string(), "Day");
//! ```

/// Implements Display and FromStr traits for state enums
///
/// This macro generates:
/// - Display trait: writes the declared string for each variant
/// - FromStr trait: case-insensitive parse, failing with
///   [`LogCheckerError::InvalidInput`](crate::LogCheckerError::InvalidInput)
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_state_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::errors::LogCheckerError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::errors::LogCheckerError::InvalidInput(format!(
                    "Invalid {}: {}",
                    stringify!($enum_name),
                    s
                )))
            }
        }
    };
}
