//! Cookie assertions.
//!
//! Cookies are read from the `Set-Cookie` headers of the response. When the
//! same name is set more than once, the last one wins.

use crate::combinators::assert_that;
use crate::error::AssertionError;
use http::header::{self, HeaderMap};
use probe_core::{assertion, BoxError, BoxedAssertion, ResponseView};
use std::fmt;

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Cookie is sent with cross-site requests.
    None,
    /// Cookie is sent with same-site and cross-site top-level navigations.
    Lax,
    /// Cookie is only sent with same-site requests.
    Strict,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Lax => write!(f, "Lax"),
            Self::Strict => write!(f, "Strict"),
        }
    }
}

/// A cookie set by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    name: String,
    value: String,
    domain: Option<String>,
    path: Option<String>,
    max_age: Option<i64>,
    expires: Option<String>,
    secure: bool,
    http_only: bool,
    same_site: Option<SameSite>,
}

impl SetCookie {
    /// Parses a `Set-Cookie` header value.
    ///
    /// Returns `None` when the value has no `name=value` pair or the name is
    /// empty. Unknown attributes are ignored.
    ///
    /// ```rust
    /// use probe_assertions::{SameSite, SetCookie};
    ///
    /// let cookie = SetCookie::parse("session=abc123; Path=/; HttpOnly; SameSite=Strict").unwrap();
    /// assert_eq!(cookie.name(), "session");
    /// assert_eq!(cookie.value(), "abc123");
    /// assert_eq!(cookie.path(), Some("/"));
    /// assert!(cookie.http_only());
    /// assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    /// ```
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let mut parts = header_value.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Self {
            name: name.to_string(),
            value: value.trim().trim_matches('"').to_string(),
            domain: None,
            path: None,
            max_age: None,
            expires: None,
            secure: false,
            http_only: false,
            same_site: None,
        };

        for attribute in parts {
            let (key, val) = match attribute.split_once('=') {
                Some((key, val)) => (key.trim(), Some(val.trim())),
                None => (attribute.trim(), None),
            };
            match (key.to_ascii_lowercase().as_str(), val) {
                ("domain", Some(val)) => cookie.domain = Some(val.trim_start_matches('.').to_string()),
                ("path", Some(val)) => cookie.path = Some(val.to_string()),
                ("max-age", Some(val)) => cookie.max_age = val.parse().ok(),
                ("expires", Some(val)) => cookie.expires = Some(val.to_string()),
                ("secure", _) => cookie.secure = true,
                ("httponly", _) => cookie.http_only = true,
                ("samesite", Some(val)) => {
                    cookie.same_site = match val.to_ascii_lowercase().as_str() {
                        "strict" => Some(SameSite::Strict),
                        "lax" => Some(SameSite::Lax),
                        "none" => Some(SameSite::None),
                        _ => None,
                    };
                }
                _ => {}
            }
        }

        Some(cookie)
    }

    /// Returns every cookie set by `headers`, in header order.
    pub fn from_headers(headers: &HeaderMap) -> Vec<Self> {
        headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(Self::parse)
            .collect()
    }

    /// Get the cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the Domain attribute.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Get the Path attribute.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the Max-Age attribute in seconds.
    #[must_use]
    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    /// Get the raw Expires attribute.
    #[must_use]
    pub fn expires(&self) -> Option<&str> {
        self.expires.as_deref()
    }

    /// Whether the Secure attribute is set.
    #[must_use]
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Whether the `HttpOnly` attribute is set.
    #[must_use]
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// Get the `SameSite` attribute.
    #[must_use]
    pub fn same_site(&self) -> Option<SameSite> {
        self.same_site
    }
}

/// Passes the last cookie named `name` to `handler`, or `None` if unset.
pub fn with_cookie<F>(name: impl Into<String>, handler: F) -> BoxedAssertion
where
    F: Fn(Option<&SetCookie>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    let name = name.into();
    assertion(move |response: &mut ResponseView<'_>| {
        let cookie = SetCookie::from_headers(response.headers())
            .into_iter()
            .rev()
            .find(|cookie| cookie.name == name);
        handler(cookie.as_ref()).map_err(|e| AssertionError::Cookie(e).into())
    })
}

/// Checks that a cookie named `name` was set.
pub fn have_cookie(name: impl Into<String>) -> BoxedAssertion {
    let name = name.into();
    let message = format!("cookie with name '{name}' not set");
    with_cookie(name, move |cookie| assert_that(cookie.is_some(), message.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, StatusCode};
    use probe_core::{Assertion, BufferedResponse, Response};

    fn response(set_cookies: &[&'static str]) -> BufferedResponse {
        let mut headers = HeaderMap::new();
        for value in set_cookies {
            headers.append(header::SET_COOKIE, HeaderValue::from_static(*value));
        }
        BufferedResponse::capture(Response::from_bytes(StatusCode::OK, headers, "")).unwrap()
    }

    #[test]
    fn test_parse_attributes() {
        let cookie = SetCookie::parse(
            "id=42; Domain=.example.com; Path=/api; Max-Age=3600; Expires=Wed, 21 Oct 2026 07:28:00 GMT; Secure",
        )
        .unwrap();
        assert_eq!(cookie.name(), "id");
        assert_eq!(cookie.value(), "42");
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.path(), Some("/api"));
        assert_eq!(cookie.max_age(), Some(3600));
        assert_eq!(cookie.expires(), Some("Wed, 21 Oct 2026 07:28:00 GMT"));
        assert!(cookie.secure());
        assert!(!cookie.http_only());
        assert_eq!(cookie.same_site(), None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(SetCookie::parse("no-equals-sign").is_none());
        assert!(SetCookie::parse("=value").is_none());
    }

    #[test]
    fn test_parse_quoted_value() {
        let cookie = SetCookie::parse("token=\"abc\"").unwrap();
        assert_eq!(cookie.value(), "abc");
    }

    #[test]
    fn test_last_cookie_wins() {
        let response = response(&["session=first", "theme=dark", "session=second"]);
        let check = with_cookie("session", |cookie| {
            let value = cookie.map(SetCookie::value);
            assert_that(value == Some("second"), format!("got {value:?}"))
        });
        assert!(check.check(&mut response.view()).is_ok());
    }

    #[test]
    fn test_with_cookie_absent() {
        let response = response(&["theme=dark"]);
        let check = with_cookie("session", |cookie| {
            assert_that(cookie.is_none(), "expected no cookie")
        });
        assert!(check.check(&mut response.view()).is_ok());
    }

    #[test]
    fn test_have_cookie() {
        let response = response(&["session=abc; HttpOnly"]);
        assert!(have_cookie("session").check(&mut response.view()).is_ok());

        let err = have_cookie("token").check(&mut response.view()).unwrap_err();
        assert_eq!(err.to_string(), "cookie: cookie with name 'token' not set");
    }
}
