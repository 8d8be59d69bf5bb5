use lambda_http::http::{header, HeaderValue, Method, StatusCode};
use lambda_http::{Body, Error, Response};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Cross-origin policy with a single allowed origin.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origin: String,
}

impl CorsPolicy {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    pub fn is_preflight(method: &Method) -> bool {
        method == Method::OPTIONS
    }

    /// Answer to a preflight request: 204 and the policy headers, nothing else.
    pub fn preflight(&self) -> Result<Response<Body>, Error> {
        Ok(Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allowed_origin.as_str())
            .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
            .header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS)
            .body(Body::Empty)
            .map_err(Box::new)?)
    }

    /// Attach the allowed-origin header to a handler response.
    pub fn decorate(&self, response: &mut Response<Body>) -> Result<(), Error> {
        let value = HeaderValue::from_str(&self.allowed_origin).map_err(Box::new)?;
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_options_is_preflight() {
        assert!(CorsPolicy::is_preflight(&Method::OPTIONS));
        assert!(!CorsPolicy::is_preflight(&Method::GET));
        assert!(!CorsPolicy::is_preflight(&Method::DELETE));
    }

    #[test]
    fn preflight_is_empty_204_with_policy_headers() {
        let policy = CorsPolicy::new("http://localhost:3000");
        let resp = policy.preflight().unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(resp.body().is_empty());
        let headers = resp.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[test]
    fn decorate_sets_origin_once() {
        let policy = CorsPolicy::new("https://app.example.com");
        let mut resp = Response::builder()
            .status(StatusCode::OK)
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
            .body(Body::Empty)
            .unwrap();

        policy.decorate(&mut resp).unwrap();

        let values: Vec<_> = resp
            .headers()
            .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .iter()
            .collect();
        assert_eq!(values, vec!["https://app.example.com"]);
    }
}
