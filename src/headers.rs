use crate::constants::header;
use crate::util::equals_ignore_case;
use indexmap::IndexMap;

pub type Headers = IndexMap<String, String>;

/// Header map with case-insensitive lookup and `Vary` merging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| equals_ignore_case(key, name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Inserts `value`, replacing any header with the same name regardless of case.
    /// `Vary` values are merged instead of replaced.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(value);
            return;
        }
        self.remove(&name);
        self.headers.insert(name, value.into());
    }

    /// Adds `value` to a list-valued header, joining repeats with `", "`.
    pub fn append<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();
        let joined = match self.get(&name) {
            Some(existing) if !name.eq_ignore_ascii_case(header::VARY) => {
                format!("{existing}, {value}")
            }
            _ => value,
        };
        self.insert(name, joined);
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = self
            .headers
            .keys()
            .find(|key| equals_ignore_case(key, name))
            .cloned()?;
        self.headers.shift_remove(&key)
    }

    /// Appends comma-separated entries to `Vary`, deduplicated case-insensitively.
    pub fn add_vary<S: Into<String>>(&mut self, value: S) {
        let mut entries: Vec<String> = self
            .get(header::VARY)
            .map(split_list)
            .unwrap_or_default();

        entries.extend(split_list(&value.into()));

        if entries.is_empty() {
            self.remove(header::VARY);
            return;
        }

        let mut deduped: Vec<String> = Vec::with_capacity(entries.len());
        for entry in entries {
            if deduped
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(&entry))
            {
                continue;
            }
            deduped.push(entry);
        }

        self.remove(header::VARY);
        self.headers
            .insert(header::VARY.to_string(), deduped.join(", "));
    }

    pub fn extend(&mut self, other: HeaderCollection) {
        for (name, value) in other.headers {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn into_headers(self) -> Headers {
        self.headers
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderCollection
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = HeaderCollection::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
