use crate::constants::{header, method};
use crate::cookies::CookieJar;
use crate::headers::HeaderCollection;
use crate::util::split_path_query;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::net::IpAddr;

pub type Params = IndexMap<String, String>;

/// Owned view of an incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: Params,
    pub form: Params,
    pub headers: HeaderCollection,
    pub cookies: HashMap<String, String>,
    pub remote_addr: Option<IpAddr>,
}

impl Request {
    /// Builds a request from a method and a path that may carry a query string.
    pub fn new<M: Into<String>>(method: M, full_path: &str) -> Self {
        let (path, query) = split_path_query(full_path);
        Self {
            method: method.into(),
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query: parse_params(query),
            ..Self::default()
        }
    }

    pub fn get(full_path: &str) -> Self {
        Self::new(method::GET, full_path)
    }

    pub fn post(full_path: &str) -> Self {
        Self::new(method::POST, full_path)
    }

    pub fn with_header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_cookie<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_form<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.form.insert(name.into(), value.into());
        self
    }

    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn accept_language(&self) -> Option<&str> {
        self.header(header::ACCEPT_LANGUAGE)
    }

    /// Query string parameter only.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Form field first, then query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.form
            .get(name)
            .or_else(|| self.query.get(name))
            .map(String::as_str)
    }

    pub fn is_method(&self, expected: &str) -> bool {
        self.method.eq_ignore_ascii_case(expected)
    }

    pub fn is_ajax(&self) -> bool {
        self.header(header::X_REQUESTED_WITH)
            .is_some_and(|value| value.eq_ignore_ascii_case(crate::constants::XML_HTTP_REQUEST))
    }

    /// Path plus the serialized query string.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, encode_params(&self.query))
        }
    }
}

/// Per-class device flags, in tracking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFlags {
    flags: IndexMap<String, bool>,
}

impl DeviceFlags {
    pub fn get(&self, class: &str) -> bool {
        self.flags.get(class).copied().unwrap_or(false)
    }

    pub fn set<S: Into<String>>(&mut self, class: S, active: bool) {
        self.flags.insert(class.into(), active);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(class, active)| (class.as_str(), *active))
    }
}

/// Mutable per-request state threaded through the interceptors.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request: Request,
    pub cookies: CookieJar,
    /// Best supported language from `Accept-Language`, or the default.
    pub accept_language: String,
    pub language: String,
    pub override_language: String,
    /// `lang` cookie value staged for the response phase.
    pub language_cookie: Option<String>,
    pub region: Option<String>,
    pub devices: DeviceFlags,
    pub fragment_uri: Option<String>,
}

impl RequestContext {
    pub fn new(request: Request) -> Self {
        let cookies = CookieJar::new(request.cookies.clone());
        Self {
            request,
            cookies,
            accept_language: String::new(),
            language: String::new(),
            override_language: String::new(),
            language_cookie: None,
            region: None,
            devices: DeviceFlags::default(),
            fragment_uri: None,
        }
    }
}

pub(crate) fn parse_params(query: &str) -> Params {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

pub(crate) fn encode_params(params: &Params) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
