//! Error types for URI building.

use std::fmt;

/// Errors produced by builder mutation and build operations.
///
/// Every failure falls into one of two categories: an argument rejected at
/// the call that supplied it, or a template placeholder left without a bound
/// value at build time. A failing operation never leaves the builder in a
/// partially mutated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Input to a setter or build call was rejected.
    InvalidArgument(InvalidArgument),
    /// A template placeholder had no bound value at build time.
    MissingTemplateValue {
        /// Name of the unbound placeholder.
        name: String,
    },
}

/// Specific reasons an argument was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    /// A seed URI string could not be parsed.
    UnparsableUri {
        /// The input that failed to parse.
        input: String,
        /// What made it unparsable.
        reason: &'static str,
    },
    /// A scheme is not a valid scheme token.
    InvalidScheme {
        /// The rejected scheme.
        scheme: String,
    },
    /// The host was set to an empty string.
    EmptyHost,
    /// The port is outside the valid range (`-1` clears, `0` and up set).
    InvalidPort {
        /// The rejected port.
        port: i32,
    },
    /// A query or matrix parameter name is empty.
    EmptyParamName,
    /// No path template is registered for the resource.
    NoPathTemplate {
        /// The resource that was looked up.
        resource: String,
    },
    /// More than one path template matches the resource.
    AmbiguousPathTemplate {
        /// The resource that was looked up.
        resource: String,
        /// How many templates matched.
        count: usize,
    },
    /// The resource has no member operation with the given name.
    NoSuchMember {
        /// The resource that was looked up.
        resource: String,
        /// The member that does not exist.
        member: String,
    },
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(arg) => write!(f, "invalid argument: {arg}"),
            Self::MissingTemplateValue { name } => {
                write!(f, "no value bound for template placeholder '{{{name}}}'")
            }
        }
    }
}

impl std::error::Error for BuilderError {}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsableUri { input, reason } => {
                write!(f, "cannot parse URI '{input}': {reason}")
            }
            Self::InvalidScheme { scheme } => {
                write!(
                    f,
                    "invalid scheme '{scheme}'; expected a letter followed by \
                     letters, digits, '+', '-', or '.'"
                )
            }
            Self::EmptyHost => write!(f, "host cannot be empty; unset it instead"),
            Self::InvalidPort { port } => {
                write!(f, "invalid port {port}; use -1 to unset or a non-negative value")
            }
            Self::EmptyParamName => write!(f, "parameter name cannot be empty"),
            Self::NoPathTemplate { resource } => {
                write!(f, "no path template registered for resource '{resource}'")
            }
            Self::AmbiguousPathTemplate { resource, count } => {
                write!(f, "{count} path templates match resource '{resource}'")
            }
            Self::NoSuchMember { resource, member } => {
                write!(f, "resource '{resource}' has no member '{member}'")
            }
        }
    }
}

impl std::error::Error for InvalidArgument {}

impl From<InvalidArgument> for BuilderError {
    fn from(arg: InvalidArgument) -> Self {
        Self::InvalidArgument(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_value_names_the_placeholder() {
        let err = BuilderError::MissingTemplateValue { name: "id".to_string() };
        assert_eq!(err.to_string(), "no value bound for template placeholder '{id}'");
    }

    #[test]
    fn unparsable_uri_includes_input_and_reason() {
        let err = BuilderError::from(InvalidArgument::UnparsableUri {
            input: "http://".to_string(),
            reason: "missing host",
        });
        let msg = err.to_string();
        assert!(msg.contains("http://"));
        assert!(msg.contains("missing host"));
    }

    #[test]
    fn invalid_port_message_mentions_sentinel() {
        let err = InvalidArgument::InvalidPort { port: -10 };
        assert!(err.to_string().contains("-1"));
    }
}
