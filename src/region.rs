use crate::constants::{cookie, header, param, region};
use crate::context::RequestContext;
use crate::locale::ResolvedLanguage;
use crate::options::ChainOptions;
use crate::response::Response;
use crate::tables::{Region, RegionTable};
use crate::util::{contains_ignore_case, normalize_lower};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// IP geolocation collaborator. Implementations must tolerate concurrent reads.
pub trait GeoLookup: Send + Sync {
    /// Region name for `addr`, or `None` when the address is unknown.
    fn lookup(&self, addr: IpAddr) -> Option<String>;
}

/// Lookup that never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeoLookup;

impl GeoLookup for NoGeoLookup {
    fn lookup(&self, _addr: IpAddr) -> Option<String> {
        None
    }
}

impl<F> GeoLookup for F
where
    F: Fn(IpAddr) -> Option<String> + Send + Sync,
{
    fn lookup(&self, addr: IpAddr) -> Option<String> {
        self(addr)
    }
}

/// Picks the storefront region from the `region` parameter, the `region`
/// cookie, the resolved language and GeoIP.
pub struct RegionResolver {
    options: Arc<ChainOptions>,
    regions: Arc<RegionTable>,
    geo: Arc<dyn GeoLookup>,
}

impl RegionResolver {
    pub fn new(options: Arc<ChainOptions>, regions: Arc<RegionTable>) -> Self {
        Self {
            options,
            regions,
            geo: Arc::new(NoGeoLookup),
        }
    }

    pub fn with_geo(mut self, geo: Arc<dyn GeoLookup>) -> Self {
        self.geo = geo;
        self
    }

    /// Resolves the region for `ctx`. Must run after the locale resolver,
    /// whose output is passed in as `locale`.
    pub fn process_request(&self, ctx: &mut RequestContext, locale: &ResolvedLanguage) -> Region {
        let worldwide = self.regions.worldwide();
        let remembered = ctx
            .cookies
            .get(cookie::REGION)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let mut stored = String::new();
        let mut selected = worldwide.slug.clone();
        if let Some(slug) = remembered.as_deref()
            && self.regions.contains(slug)
        {
            selected = slug.to_string();
            stored = slug.to_string();
        }

        let language_changed = !ctx
            .cookies
            .get(cookie::LANG)
            .unwrap_or_default()
            .split(',')
            .any(|value| value == locale.accept_language);

        if remembered.is_none() || language_changed {
            if let Some(detected) = self.detect(ctx, locale, &selected) {
                selected = detected;
            }
        }

        if let Some(choice) = ctx.request.param(param::REGION) {
            let choice = normalize_lower(choice);
            if self.regions.contains(&choice) {
                selected = choice;
            }
        }

        if selected == region::US
            && let Some(browser) = ctx.request.accept_language()
            && !browser.starts_with("en")
        {
            selected = worldwide.slug.clone();
        }

        if selected != stored {
            ctx.cookies.set(cookie::REGION, selected.as_str());
        }

        debug!(
            region = %selected,
            stored = %stored,
            language = %locale.language,
            language_changed,
            "resolved region"
        );

        let resolved = self
            .regions
            .get(&selected)
            .unwrap_or(worldwide)
            .clone();
        ctx.region = Some(resolved.slug.clone());
        resolved
    }

    pub fn process_response(&self, response: &mut Response) {
        response.add_vary(format!("{}, {}", header::ACCEPT_LANGUAGE, header::COOKIE));
    }

    fn detect(
        &self,
        ctx: &RequestContext,
        locale: &ResolvedLanguage,
        current: &str,
    ) -> Option<String> {
        let language = locale.language.as_str();
        let candidates: Vec<&Region> = if language == self.options.default_language {
            self.regions.specific().collect()
        } else {
            self.regions.iter().collect()
        };

        let mut detected: Option<&Region> = None;
        let browser = ctx.request.accept_language().unwrap_or_default();

        if !contains_ignore_case(browser, language) {
            // Language was forced by cookie or parameter, so ask GeoIP instead.
            if let Some(location) = ctx.request.remote_addr.and_then(|addr| self.geo.lookup(addr)) {
                debug!(%location, "geoip lookup matched a location");
                detected = candidates
                    .iter()
                    .copied()
                    .find(|candidate| !candidate.name.is_empty() && candidate.name == location);
            }
        } else if !language.is_empty() {
            detected = candidates.iter().copied().find(|candidate| {
                !candidate.name.is_empty() && contains_ignore_case(language, &candidate.name)
            });
        }

        let still_worldwide = match detected {
            Some(found) => self.regions.is_worldwide(&found.slug),
            None => self.regions.is_worldwide(current),
        };
        if still_worldwide
            && let Some(fallback) = candidates
                .iter()
                .copied()
                .find(|candidate| candidate.default_language == language)
        {
            detected = Some(fallback);
        }

        detected.map(|found| found.slug.clone())
    }
}

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;
