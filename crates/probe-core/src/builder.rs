//! Request builders.

use crate::error::BoxError;
use crate::request::Request;

/// Customises a request before it is executed.
///
/// Builders run in the order they are supplied and may only mutate the
/// request; they must not perform I/O. The first failing builder stops the
/// chain.
///
/// Any `Fn(&mut Request) -> Result<(), BoxError>` is a builder.
pub trait RequestBuilder {
    /// Applies the customisation.
    fn apply(&self, request: &mut Request) -> Result<(), BoxError>;
}

impl<F> RequestBuilder for F
where
    F: Fn(&mut Request) -> Result<(), BoxError>,
{
    fn apply(&self, request: &mut Request) -> Result<(), BoxError> {
        self(request)
    }
}

/// A type-erased builder, so builders of different kinds can share a list.
pub type BoxedBuilder = Box<dyn Fn(&mut Request) -> Result<(), BoxError> + Send + Sync>;

/// Boxes a closure as a [`BoxedBuilder`].
pub fn builder<F>(f: F) -> BoxedBuilder
where
    F: Fn(&mut Request) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Box::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Body;

    #[test]
    fn test_closure_builder() {
        let mut request = Request::new("GET", "/", Body::empty()).unwrap();
        let set_host = builder(|req: &mut Request| {
            req.set_host("example.org");
            Ok(())
        });

        set_host.apply(&mut request).unwrap();
        assert_eq!(request.host(), Some("example.org"));
    }

    #[test]
    fn test_failing_builder() {
        let mut request = Request::new("GET", "/", Body::empty()).unwrap();
        let failing = builder(|_: &mut Request| Err("bad header".into()));
        assert_eq!(failing.apply(&mut request).unwrap_err().to_string(), "bad header");
    }
}
