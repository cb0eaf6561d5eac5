use crate::constants::param;
use crate::context::{Params, Request, RequestContext, encode_params};
use crate::options::ChainOptions;
use crate::response::Response;
use crate::tables::{LanguageTable, RegionTable};
use crate::util::normalize_lower;
use std::sync::Arc;
use tracing::debug;

/// Result of splitting `/<lang>/<app>/<rest>` style paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixSplit {
    /// Lowercased language prefix.
    pub language: Option<String>,
    pub app: Option<String>,
    /// Remainder without its leading slash.
    pub rest: String,
}

/// Turns language, app and region path prefixes into query hints.
pub struct PathRewriter {
    options: Arc<ChainOptions>,
    languages: Arc<LanguageTable>,
    regions: Arc<RegionTable>,
}

impl PathRewriter {
    pub fn new(
        options: Arc<ChainOptions>,
        languages: Arc<LanguageTable>,
        regions: Arc<RegionTable>,
    ) -> Self {
        Self {
            options,
            languages,
            regions,
        }
    }

    /// Splits a path into its language prefix, app prefix and remainder.
    ///
    /// Both `/<lang>/<app>/...` and `/<app>/<lang>/...` are recognised.
    pub fn split_path(&self, path: &str) -> PrefixSplit {
        let trimmed = path.trim_start_matches('/');
        let (first, first_rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        let (second, second_rest) = first_rest.split_once('/').unwrap_or((first_rest, ""));

        if let Some(language) = self.match_language(first) {
            if self.options.is_app(second) {
                return PrefixSplit {
                    language: Some(language),
                    app: Some(second.to_string()),
                    rest: second_rest.to_string(),
                };
            }
            return PrefixSplit {
                language: Some(language),
                app: None,
                rest: first_rest.to_string(),
            };
        }

        if self.options.is_app(first) {
            let language = self.match_language(second);
            let rest = if language.is_some() {
                second_rest
            } else {
                first_rest
            };
            return PrefixSplit {
                language,
                app: Some(first.to_string()),
                rest: rest.to_string(),
            };
        }

        PrefixSplit {
            language: None,
            app: None,
            rest: trimmed.to_string(),
        }
    }

    /// Location to redirect to, or `None` when the path carries no prefix.
    pub fn rewrite(&self, request: &Request) -> Option<String> {
        let split = self.split_path(&request.path);
        let mut new_path: Option<String> = None;
        let mut hints = Params::new();

        if split.app.is_some() {
            new_path = Some(split.rest.clone());
        }

        if let Some(language) = split.language {
            new_path.get_or_insert_with(|| split.rest.clone());
            hints.insert(param::LANG.to_string(), language);
        }

        let trimmed = request.path.trim_start_matches('/');
        let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        let region = normalize_lower(first);
        if self.regions.contains(&region) {
            new_path.get_or_insert_with(|| rest.to_string());
            hints.insert(param::REGION.to_string(), region);
        }

        let mut new_path = new_path?;
        if !new_path.starts_with('/') {
            new_path.insert(0, '/');
        }

        let mut query = request.query.clone();
        query.extend(hints);
        if query.is_empty() {
            Some(new_path)
        } else {
            Some(format!("{new_path}?{}", encode_params(&query)))
        }
    }

    /// Short-circuits the chain with a redirect when the path was rewritten.
    pub fn process_request(&self, ctx: &RequestContext) -> Option<Response> {
        let location = self.rewrite(&ctx.request)?;
        debug!(
            path = %ctx.request.path,
            %location,
            permanent = self.options.permanent_redirects,
            "redirecting prefixed path"
        );
        Some(Response::redirect(location, self.options.permanent_redirects))
    }

    fn match_language(&self, segment: &str) -> Option<String> {
        if segment.is_empty() {
            return None;
        }
        let lowered = normalize_lower(segment);
        if self.languages.contains(&lowered) {
            return Some(lowered);
        }
        match lowered.split_once('-') {
            Some((primary, territory))
                if !territory.is_empty() && self.languages.contains(primary) =>
            {
                Some(primary.to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "path_rewriter_test.rs"]
mod path_rewriter_test;
