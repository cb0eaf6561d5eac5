use storefront_middleware_rs::Response;
use storefront_middleware_rs::constants::header;

pub fn cookie_value<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.cookie(name).map(|write| write.value.as_str())
}

pub fn assert_cookie(response: &Response, name: &str, expected: &str) {
    match response.cookie(name) {
        Some(write) => assert_eq!(write.value, expected, "cookie `{name}`"),
        None => panic!("expected cookie `{name}`, got {:?}", response.set_cookie_headers()),
    }
}

pub fn assert_deleted(response: &Response, name: &str) {
    match response.cookie(name) {
        Some(write) => assert!(write.is_deletion(), "cookie `{name}` was not deleted"),
        None => panic!("expected deletion of `{name}`, got {:?}", response.set_cookie_headers()),
    }
}

pub fn assert_redirect(response: &Response, status: u16, location: &str) {
    assert_eq!(response.status, status);
    assert_eq!(response.location(), Some(location));
}

/// `(language, region, devices)` echoed by the test view.
pub fn echoed(response: &Response) -> (&str, &str, &str) {
    let mut parts = response.body.splitn(3, '|');
    let language = parts.next().unwrap_or_default();
    let region = parts.next().unwrap_or_default();
    let devices = parts.next().unwrap_or_default();
    (language, region, devices)
}

pub fn vary_values(response: &Response) -> Vec<String> {
    response
        .headers
        .get(header::VARY)
        .map(|value| {
            value
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
