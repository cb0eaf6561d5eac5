use crate::accept_language::best_match;
use crate::constants::{cookie, header, param};
use crate::context::{Request, RequestContext};
use crate::options::ChainOptions;
use crate::response::Response;
use crate::tables::LanguageTable;
use std::sync::Arc;
use tracing::debug;

/// Callback that makes a language active for the application layer.
pub type ActivateLanguageFn = dyn Fn(&str) + Send + Sync;

/// Output of [`LocaleResolver::process_request`], consumed by the region resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLanguage {
    pub language: String,
    pub override_language: String,
    /// Best supported language from `Accept-Language`, or the default.
    pub accept_language: String,
}

/// Reconciles the `lang` parameter, the `lang` cookie and `Accept-Language`.
///
/// The cookie stores `"<language>,<override>"`. The override remembers the
/// browser language that was in effect when a language was forced, so a later
/// change of browser preference resets the forced choice.
pub struct LocaleResolver {
    options: Arc<ChainOptions>,
    languages: Arc<LanguageTable>,
    activate: Option<Arc<ActivateLanguageFn>>,
}

impl LocaleResolver {
    pub fn new(options: Arc<ChainOptions>, languages: Arc<LanguageTable>) -> Self {
        Self {
            options,
            languages,
            activate: None,
        }
    }

    pub fn with_activation(mut self, activate: Arc<ActivateLanguageFn>) -> Self {
        self.activate = Some(activate);
        self
    }

    /// Best `Accept-Language` match, falling back to the default language.
    pub fn accept_language(&self, request: &Request) -> String {
        request
            .accept_language()
            .and_then(|value| best_match(&self.languages, value))
            .unwrap_or(self.options.default_language.as_str())
            .to_string()
    }

    pub fn process_request(&self, ctx: &mut RequestContext) -> ResolvedLanguage {
        let accept = self.accept_language(&ctx.request);
        let mut language = accept.clone();
        let mut override_language = String::new();

        let (stored_language, stored_override) = ctx
            .cookies
            .get(cookie::LANG)
            .map(parse_language_cookie)
            .unwrap_or_default();

        if let Some(canonical) = self.languages.canonical(&stored_language) {
            language = canonical.to_string();
        }
        if let Some(canonical) = self.languages.canonical(&stored_override) {
            override_language = canonical.to_string();
        }

        if let Some(requested) = ctx.request.param(param::LANG) {
            override_language = accept.clone();
            language = self
                .languages
                .canonical(requested)
                .map_or_else(|| accept.clone(), str::to_string);
        } else if accept != override_language {
            language = accept.clone();
            override_language.clear();
        }

        if language != stored_language || override_language != stored_override {
            ctx.language_cookie = Some(format!("{language},{override_language}"));
        }

        debug!(
            %language,
            override_language = %override_language,
            accept_language = %accept,
            cookie_changed = ctx.language_cookie.is_some(),
            "resolved locale"
        );

        if let Some(activate) = &self.activate {
            activate(&language);
        }

        ctx.accept_language = accept.clone();
        ctx.language = language.clone();
        ctx.override_language = override_language.clone();

        ResolvedLanguage {
            language,
            override_language,
            accept_language: accept,
        }
    }

    pub fn process_response(&self, ctx: &RequestContext, response: &mut Response) {
        if let Some(value) = &ctx.language_cookie {
            response.set_cookie(cookie::LANG, value.as_str());
        }
        response.add_vary(format!("{}, {}", header::ACCEPT_LANGUAGE, header::COOKIE));
    }
}

/// Splits a `lang` cookie into its language and override halves.
pub fn parse_language_cookie(value: &str) -> (String, String) {
    let mut chunks = value.split(',');
    let language = chunks.next().unwrap_or_default().to_string();
    let override_language = chunks.next().unwrap_or_default().to_string();
    (language, override_language)
}

#[cfg(test)]
#[path = "locale_test.rs"]
mod locale_test;
