//! HTTP verbs dispatched by a Hermes client.
//!
//! The verb set is closed: a client exposes some subset of these eight
//! methods, and the dispatch layer uses [`Method::allows_body`] to reject
//! request bodies on verbs that must not carry one. Keeping the trait of a
//! verb ("does it take a body?") on the enum keeps the verb contract in one
//! place instead of spreading it across per-verb entry points.

use crate::error::HermesError;
use std::str::FromStr;

/// An HTTP method supported by the dispatch layer.
///
/// # Example
///
/// ```
/// use hermes_core::Method;
///
/// assert!(Method::Post.allows_body());
/// assert!(!Method::Get.allows_body());
/// assert_eq!(Method::Delete.as_str(), "DELETE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - retrieve a resource. Body-less.
    Get,
    /// HEAD - retrieve headers only. Body-less.
    Head,
    /// DELETE - delete a resource. Body-less.
    Delete,
    /// TRACE - diagnostic loop-back. Body-less.
    Trace,
    /// OPTIONS - query supported methods. Body-less.
    Options,
    /// POST - submit a payload.
    Post,
    /// PUT - replace a resource.
    Put,
    /// PATCH - partially update a resource.
    Patch,
}

impl Method {
    /// Returns the canonical upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Delete => "DELETE",
            Self::Trace => "TRACE",
            Self::Options => "OPTIONS",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }

    /// Returns `true` if requests with this method may carry a body.
    ///
    /// Dispatching a body-less verb with a pre-populated request body is a
    /// configuration error, caught before the pipeline runs.
    #[must_use]
    pub const fn allows_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns all supported methods in dispatch-table order.
    #[must_use]
    pub const fn all() -> [Method; 8] {
        [
            Self::Get,
            Self::Head,
            Self::Delete,
            Self::Trace,
            Self::Options,
            Self::Post,
            Self::Put,
            Self::Patch,
        ]
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = HermesError;

    /// Parses a canonical method name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "DELETE" => Ok(Self::Delete),
            "TRACE" => Ok(Self::Trace),
            "OPTIONS" => Ok(Self::Options),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            other => Err(HermesError::configuration(format!(
                "invalid method name: '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodyless_methods() {
        for method in [
            Method::Get,
            Method::Head,
            Method::Delete,
            Method::Trace,
            Method::Options,
        ] {
            assert!(!method.allows_body(), "{method} must be body-less");
        }
    }

    #[test]
    fn test_body_methods() {
        for method in [Method::Post, Method::Put, Method::Patch] {
            assert!(method.allows_body(), "{method} must allow a body");
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for method in Method::all() {
            let parsed: Method = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed: Method = "patch".parse().unwrap();
        assert_eq!(parsed, Method::Patch);
    }

    #[test]
    fn test_parse_rejects_unknown_method() {
        let result = "BREW".parse::<Method>();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("BREW"));
    }

    #[test]
    fn test_all_covers_every_verb() {
        assert_eq!(Method::all().len(), 8);
    }
}
