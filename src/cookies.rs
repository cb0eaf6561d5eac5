use crate::constants::cookie;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::trace;

/// Attributes attached to a single cookie write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub max_age: Option<i64>,
    pub expires: Option<String>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    /// Other attributes (`HttpOnly`, `SameSite=Lax`, ...) rendered verbatim.
    pub extensions: Vec<String>,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            max_age: None,
            expires: None,
            path: Some(cookie::DEFAULT_PATH.to_string()),
            domain: None,
            secure: false,
            extensions: Vec::new(),
        }
    }
}

impl CookieAttributes {
    /// Attributes that expire a cookie immediately.
    pub fn expired(path: Option<String>, domain: Option<String>) -> Self {
        Self {
            max_age: Some(0),
            expires: Some(cookie::EPOCH_EXPIRES.to_string()),
            path,
            domain,
            secure: false,
            extensions: Vec::new(),
        }
    }
}

/// A cookie change waiting to be written onto a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieWrite {
    pub name: String,
    pub value: String,
    pub attributes: CookieAttributes,
}

impl CookieWrite {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self::with_attributes(name, value, CookieAttributes::default())
    }

    pub fn with_attributes<N, V>(name: N, value: V, attributes: CookieAttributes) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
            attributes,
        }
    }

    pub fn deletion<N: Into<String>>(name: N) -> Self {
        Self::with_attributes(
            name,
            "",
            CookieAttributes::expired(Some(cookie::DEFAULT_PATH.to_string()), None),
        )
    }

    pub fn is_deletion(&self) -> bool {
        self.attributes.max_age == Some(0)
    }

    /// Renders the write as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        let mut rendered = format!("{}={}", self.name, self.value);
        let attributes = &self.attributes;
        if let Some(expires) = &attributes.expires {
            rendered.push_str("; expires=");
            rendered.push_str(expires);
        }
        if let Some(max_age) = attributes.max_age {
            rendered.push_str(&format!("; Max-Age={max_age}"));
        }
        if let Some(path) = &attributes.path {
            rendered.push_str("; Path=");
            rendered.push_str(path);
        }
        if let Some(domain) = &attributes.domain {
            rendered.push_str("; Domain=");
            rendered.push_str(domain);
        }
        if attributes.secure {
            rendered.push_str("; Secure");
        }
        for extension in &attributes.extensions {
            rendered.push_str("; ");
            rendered.push_str(extension);
        }
        rendered
    }

    /// Parses a `Set-Cookie` header value.
    pub fn parse(header_value: &str) -> Option<Self> {
        let mut parts = header_value.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut attributes = CookieAttributes {
            path: None,
            ..CookieAttributes::default()
        };
        for part in parts.map(str::trim).filter(|part| !part.is_empty()) {
            let (key, attribute_value) = match part.split_once('=') {
                Some((key, attribute_value)) => (key.trim(), Some(attribute_value.trim())),
                None => (part, None),
            };
            match (key.to_ascii_lowercase().as_str(), attribute_value) {
                ("expires", Some(expires)) => attributes.expires = Some(expires.to_string()),
                ("max-age", Some(max_age)) => match max_age.parse() {
                    Ok(max_age) => attributes.max_age = Some(max_age),
                    Err(_) => attributes.extensions.push(part.to_string()),
                },
                ("path", Some(path)) => attributes.path = Some(path.to_string()),
                ("domain", Some(domain)) => attributes.domain = Some(domain.to_string()),
                ("secure", None) => attributes.secure = true,
                _ => attributes.extensions.push(part.to_string()),
            }
        }

        Some(Self::with_attributes(name, value.trim(), attributes))
    }
}

pub type CookieWrites = IndexMap<String, CookieWrite>;

/// Request-scoped cookie view that also records writes for the response.
///
/// Writes are visible to later reads in the same request and are kept in
/// insertion order, one per cookie name, until [`CookieJar::take_writes`]
/// hands them to the response.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    visible: HashMap<String, String>,
    pending: CookieWrites,
}

impl CookieJar {
    pub fn new(incoming: HashMap<String, String>) -> Self {
        Self {
            visible: incoming,
            pending: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.visible.get(name).map(String::as_str)
    }

    /// Whether a cookie is present with a non-empty value.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }

    pub fn set<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.set_with(name, value, CookieAttributes::default());
    }

    pub fn set_with<N, V>(&mut self, name: N, value: V, attributes: CookieAttributes)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let write = CookieWrite::with_attributes(name, value, attributes);
        trace!(cookie = %write.name, value = %write.value, "staging cookie write");
        self.visible.insert(write.name.clone(), write.value.clone());
        self.record(write);
    }

    pub fn delete<N: Into<String>>(&mut self, name: N) {
        self.delete_with(name, Some(cookie::DEFAULT_PATH.to_string()), None);
    }

    pub fn delete_with<N: Into<String>>(
        &mut self,
        name: N,
        path: Option<String>,
        domain: Option<String>,
    ) {
        let name = name.into();
        self.set_with(name.clone(), "", CookieAttributes::expired(path, domain));
        self.visible.remove(&name);
    }

    pub fn pending(&self) -> &CookieWrites {
        &self.pending
    }

    /// Drains the recorded writes; a second call returns nothing.
    pub fn take_writes(&mut self) -> CookieWrites {
        std::mem::take(&mut self.pending)
    }

    fn record(&mut self, write: CookieWrite) {
        self.pending.shift_remove(&write.name);
        self.pending.insert(write.name.clone(), write);
    }
}

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;
