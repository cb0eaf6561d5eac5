use crate::constants::header;
use crate::cookies::{CookieWrite, CookieWrites};
use crate::headers::HeaderCollection;

pub const STATUS_OK: u16 = 200;
pub const STATUS_MOVED_PERMANENTLY: u16 = 301;
pub const STATUS_FOUND: u16 = 302;

/// Owned response produced by a handler or by an interceptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderCollection,
    pub cookies: CookieWrites,
    pub body: String,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn ok<B: Into<String>>(body: B) -> Self {
        Self {
            status: STATUS_OK,
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn redirect<L: Into<String>>(location: L, permanent: bool) -> Self {
        let status = if permanent {
            STATUS_MOVED_PERMANENTLY
        } else {
            STATUS_FOUND
        };
        let mut response = Self::new(status);
        response.headers.insert(header::LOCATION, location);
        response
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION)
    }

    /// A 301 or 302 carrying a `Location` header.
    pub fn is_redirect(&self) -> bool {
        matches!(self.status, STATUS_MOVED_PERMANENTLY | STATUS_FOUND) && self.location().is_some()
    }

    pub fn add_vary<S: Into<String>>(&mut self, value: S) {
        self.headers.add_vary(value);
    }

    pub fn set_cookie<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.apply_cookie(CookieWrite::new(name, value));
    }

    pub fn delete_cookie<N: Into<String>>(&mut self, name: N) {
        self.apply_cookie(CookieWrite::deletion(name));
    }

    /// Records a cookie write, replacing any earlier write with the same name.
    pub fn apply_cookie(&mut self, write: CookieWrite) {
        self.cookies.shift_remove(&write.name);
        self.cookies.insert(write.name.clone(), write);
    }

    pub fn apply_cookies(&mut self, writes: CookieWrites) {
        for (_, write) in writes {
            self.apply_cookie(write);
        }
    }

    pub fn cookie(&self, name: &str) -> Option<&CookieWrite> {
        self.cookies.get(name)
    }

    /// Rendered `Set-Cookie` header values in write order.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies
            .values()
            .map(CookieWrite::to_header_value)
            .collect()
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;
