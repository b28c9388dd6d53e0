//! HTTP methods the dispatcher routes.

use axum::http::Method;
use std::fmt;

/// A routable request method.
///
/// Anything else is rejected by the dispatcher before a handler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Head,
    Put,
    Delete,
}

impl Verb {
    #[must_use]
    pub fn from_method(method: &Method) -> Option<Verb> {
        if method == Method::GET {
            Some(Verb::Get)
        } else if method == Method::HEAD {
            Some(Verb::Head)
        } else if method == Method::PUT {
            Some(Verb::Put)
        } else if method == Method::DELETE {
            Some(Verb::Delete)
        } else {
            None
        }
    }

    /// PUT and DELETE change the model; GET and HEAD only read it.
    #[inline]
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Verb::Put | Verb::Delete)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_method() {
        assert_eq!(Verb::from_method(&Method::GET), Some(Verb::Get));
        assert_eq!(Verb::from_method(&Method::HEAD), Some(Verb::Head));
        assert_eq!(Verb::from_method(&Method::PUT), Some(Verb::Put));
        assert_eq!(Verb::from_method(&Method::DELETE), Some(Verb::Delete));
        assert_eq!(Verb::from_method(&Method::POST), None);
        assert_eq!(Verb::from_method(&Method::PATCH), None);
    }

    #[test]
    fn test_is_mutation() {
        assert!(Verb::Put.is_mutation());
        assert!(Verb::Delete.is_mutation());
        assert!(!Verb::Get.is_mutation());
        assert!(!Verb::Head.is_mutation());
    }
}
