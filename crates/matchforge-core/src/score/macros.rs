//! Declarative macros for score type boilerplate.
//!
//! Field-based score types share their arithmetic and their
//! slash-separated text format; these macros generate both.

/// Generates `PartialOrd`, `Add`, `Sub`, and `Neg` for a field-based score type.
///
/// The constructor must accept fields in the order they are listed.
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                $type::$ctor( $(self.$field + other.$field),+ )
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                $type::$ctor( $(self.$field - other.$field),+ )
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::$ctor( $(-self.$field),+ )
            }
        }
    };
}

/// Generates `ParseableScore` for scores using the `"Xsuffix/Ysuffix"` format.
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl $crate::score::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::ScoreParseError> {
                let s = s.trim();
                let parts: Vec<&str> = s.split('/').collect();
                let suffixes: &[&str] = &[ $($suffix),+ ];

                if parts.len() != suffixes.len() {
                    return Err($crate::score::ScoreParseError {
                        message: format!(
                            "Invalid {} format '{}': expected {} parts separated by '/'",
                            stringify!($type), s, suffixes.len()
                        ),
                    });
                }

                let mut parts = parts.into_iter();
                $(
                    let $field = {
                        let part = parts.next().unwrap_or_default().trim();
                        let num_str = part.strip_suffix($suffix).ok_or_else(|| {
                            $crate::score::ScoreParseError {
                                message: format!(
                                    "{} part '{}' must end with '{}'",
                                    stringify!($field), part, $suffix
                                ),
                            }
                        })?;
                        num_str.parse::<i64>().map_err(|e| $crate::score::ScoreParseError {
                            message: format!("Invalid {} score '{}': {}", $suffix, num_str, e),
                        })?
                    };
                )+

                Ok($type::$ctor( $($field),+ ))
            }

            fn to_string_repr(&self) -> String {
                let parts: Vec<String> = vec![ $(format!("{}{}", self.$field, $suffix)),+ ];
                parts.join("/")
            }
        }
    };
}
