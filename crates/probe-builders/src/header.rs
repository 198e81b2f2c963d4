//! Header, authorization and host builders.

use crate::error::BuildError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http::header::{self, HeaderName, HeaderValue};
use probe_core::{builder, BoxedBuilder, Request};

fn header_name(name: &str) -> Result<HeaderName, BuildError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|source| BuildError::InvalidHeaderName {
        name: name.to_string(),
        source,
    })
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue, BuildError> {
    HeaderValue::from_str(value).map_err(|source| BuildError::InvalidHeaderValue {
        name: name.to_string(),
        source,
    })
}

/// Sets header `name` to `value`, replacing any existing values.
///
/// # Example
///
/// ```rust
/// use probe_builders::with_header;
/// use probe_core::{Body, Request, RequestBuilder};
///
/// let mut request = Request::new("GET", "http://localhost/", Body::empty()).unwrap();
/// with_header("content-type", "application/json").apply(&mut request).unwrap();
/// assert_eq!(request.headers()["content-type"], "application/json");
/// ```
pub fn with_header(name: impl Into<String>, value: impl Into<String>) -> BoxedBuilder {
    let name = name.into();
    let value = value.into();
    builder(move |request: &mut Request| {
        let name = header_name(&name)?;
        let value = header_value(&name, &value)?;
        request.headers_mut().insert(name, value);
        Ok(())
    })
}

/// Sets header `name` to `first`, then appends each of `rest`.
///
/// Nothing is written if any name or value is invalid.
pub fn with_header_values<I, V>(
    name: impl Into<String>,
    first: impl Into<String>,
    rest: I,
) -> BoxedBuilder
where
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    let name = name.into();
    let values: Vec<String> = std::iter::once(first.into())
        .chain(rest.into_iter().map(Into::into))
        .collect();
    builder(move |request: &mut Request| {
        let name = header_name(&name)?;
        let parsed = values
            .iter()
            .map(|value| header_value(&name, value))
            .collect::<Result<Vec<_>, _>>()?;

        let headers = request.headers_mut();
        let mut parsed = parsed.into_iter();
        if let Some(first) = parsed.next() {
            headers.insert(name.clone(), first);
        }
        for value in parsed {
            headers.append(name.clone(), value);
        }
        Ok(())
    })
}

/// Sets the `User-Agent` header.
pub fn with_user_agent(agent: impl Into<String>) -> BoxedBuilder {
    with_header(header::USER_AGENT.as_str(), agent)
}

/// Sets the `Content-Type` header.
pub fn with_content_type(content_type: impl Into<String>) -> BoxedBuilder {
    with_header(header::CONTENT_TYPE.as_str(), content_type)
}

/// Sets the `Accept` header.
pub fn with_accept(accept: impl Into<String>) -> BoxedBuilder {
    with_header(header::ACCEPT.as_str(), accept)
}

/// Sets `Authorization: <scheme> <credentials>`.
pub fn with_authorization(scheme: impl AsRef<str>, credentials: impl AsRef<str>) -> BoxedBuilder {
    with_header(
        header::AUTHORIZATION.as_str(),
        format!("{} {}", scheme.as_ref(), credentials.as_ref()),
    )
}

/// Sets `Authorization: Bearer <token>`.
pub fn with_bearer_token(token: impl AsRef<str>) -> BoxedBuilder {
    with_authorization("Bearer", token)
}

/// Sets HTTP Basic authentication.
pub fn with_basic_auth(username: impl AsRef<str>, password: impl AsRef<str>) -> BoxedBuilder {
    let encoded = STANDARD.encode(format!("{}:{}", username.as_ref(), password.as_ref()));
    with_authorization("Basic", encoded)
}

/// Overrides the host the request is addressed to.
///
/// By default the `Host` header comes from the target URL; executors send
/// this value instead.
pub fn with_host(host: impl Into<String>) -> BoxedBuilder {
    let host = host.into();
    builder(move |request: &mut Request| {
        request.set_host(host.clone());
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_core::{Body, RequestBuilder};

    fn request() -> Request {
        Request::new("GET", "http://localhost/", Body::empty()).unwrap()
    }

    #[test]
    fn test_with_header_sets() {
        let mut r = request();
        r.headers_mut().insert("x-id", HeaderValue::from_static("old"));

        with_header("x-id", "new").apply(&mut r).unwrap();

        let values: Vec<_> = r.headers().get_all("x-id").iter().collect();
        assert_eq!(values, ["new"]);
    }

    #[test]
    fn test_with_header_values_appends_rest() {
        let mut r = request();
        r.headers_mut().insert("accept", HeaderValue::from_static("text/plain"));

        with_header_values("Accept", "application/json", ["application/xml"])
            .apply(&mut r)
            .unwrap();

        let values: Vec<_> = r.headers().get_all("accept").iter().collect();
        assert_eq!(values, ["application/json", "application/xml"]);
    }

    #[test]
    fn test_invalid_header_fails() {
        let mut r = request();
        let err = with_header("bad name", "v").apply(&mut r).unwrap_err();
        assert!(err.to_string().starts_with("invalid header name"));

        let err = with_header("x-ok", "line\nbreak").apply(&mut r).unwrap_err();
        assert!(err.to_string().starts_with("invalid value for header"));
        assert!(r.headers().is_empty());
    }

    #[test]
    fn test_invalid_later_value_writes_nothing() {
        let mut r = request();
        assert!(with_header_values("x-multi", "a", ["b\r\n"]).apply(&mut r).is_err());
        assert!(r.headers().get("x-multi").is_none());
    }

    #[test]
    fn test_with_user_agent() {
        let mut r = request();
        with_user_agent("probe").apply(&mut r).unwrap();
        assert_eq!(r.headers()[header::USER_AGENT], "probe");
    }

    #[test]
    fn test_with_authorization() {
        let mut r = request();
        with_authorization("Bearer", "token").apply(&mut r).unwrap();
        assert_eq!(r.headers()[header::AUTHORIZATION], "Bearer token");

        with_bearer_token("other").apply(&mut r).unwrap();
        assert_eq!(r.headers()[header::AUTHORIZATION], "Bearer other");
    }

    #[test]
    fn test_with_basic_auth() {
        let mut r = request();
        with_basic_auth("user", "$ecret").apply(&mut r).unwrap();

        let value = r.headers()[header::AUTHORIZATION].to_str().unwrap();
        let encoded = value.strip_prefix("Basic ").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"user:$ecret");
    }

    #[test]
    fn test_with_host() {
        let mut r = request();
        with_host("httpbin.org").apply(&mut r).unwrap();
        assert_eq!(r.host(), Some("httpbin.org"));
        assert_eq!(r.uri().host(), Some("localhost"));
    }

    #[test]
    fn test_content_type_and_accept() {
        let mut r = request();
        with_content_type("text/plain").apply(&mut r).unwrap();
        with_accept("application/json").apply(&mut r).unwrap();
        assert_eq!(r.headers()[header::CONTENT_TYPE], "text/plain");
        assert_eq!(r.headers()[header::ACCEPT], "application/json");
    }
}
