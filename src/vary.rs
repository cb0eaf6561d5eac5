use crate::constants::header;
use crate::response::Response;

/// Adds a fixed set of header names to `Vary` on every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaryAnnotator {
    headers: Vec<String>,
}

impl VaryAnnotator {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    /// Varies on `X-Requested-With` so fragment and full-page renders are cached apart.
    pub fn ajax() -> Self {
        Self::new([header::X_REQUESTED_WITH])
    }

    pub fn process_response(&self, response: &mut Response) {
        for name in &self.headers {
            response.add_vary(name.as_str());
        }
    }
}

impl Default for VaryAnnotator {
    fn default() -> Self {
        Self::ajax()
    }
}
