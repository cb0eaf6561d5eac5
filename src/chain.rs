use crate::context::{Request, RequestContext};
use crate::device::DeviceFlagTracker;
use crate::hijack::{ActiveCarrierFn, Handler, RedirectHijacker, ViewResolver};
use crate::locale::{ActivateLanguageFn, LocaleResolver};
use crate::options::{ChainOptions, ValidationError};
use crate::path_rewriter::PathRewriter;
use crate::region::{GeoLookup, RegionResolver};
use crate::response::Response;
use crate::result::ChainError;
use crate::tables::{LanguageTable, RegionTable};
use crate::vary::VaryAnnotator;
use std::sync::Arc;
use tracing::debug;

/// Runs a request through every interceptor in order.
///
/// Request phase: path rewriter, locale, region, device flags. Response phase
/// runs in reverse: device flags, AJAX `Vary`, region, locale, redirect
/// hijacker, and finally the cookie jar flush.
pub struct InterceptorChain {
    options: Arc<ChainOptions>,
    languages: Arc<LanguageTable>,
    regions: Arc<RegionTable>,
    path_rewriter: PathRewriter,
    locale: LocaleResolver,
    region: RegionResolver,
    devices: DeviceFlagTracker,
    ajax_vary: VaryAnnotator,
    hijacker: RedirectHijacker,
}

impl InterceptorChain {
    pub fn new(
        options: ChainOptions,
        languages: LanguageTable,
        regions: RegionTable,
    ) -> Result<Self, ValidationError> {
        options.validate(&languages)?;

        let options = Arc::new(options);
        let languages = Arc::new(languages);
        let regions = Arc::new(regions);

        Ok(Self {
            path_rewriter: PathRewriter::new(
                Arc::clone(&options),
                Arc::clone(&languages),
                Arc::clone(&regions),
            ),
            locale: LocaleResolver::new(Arc::clone(&options), Arc::clone(&languages)),
            region: RegionResolver::new(Arc::clone(&options), Arc::clone(&regions)),
            devices: DeviceFlagTracker::new(Arc::clone(&options)),
            ajax_vary: VaryAnnotator::ajax(),
            hijacker: RedirectHijacker::new(),
            options,
            languages,
            regions,
        })
    }

    pub fn with_geo(mut self, geo: Arc<dyn GeoLookup>) -> Self {
        self.region = self.region.with_geo(geo);
        self
    }

    pub fn with_view_resolver(mut self, resolver: Arc<dyn ViewResolver>) -> Self {
        self.hijacker = self.hijacker.with_resolver(resolver);
        self
    }

    pub fn with_carrier(mut self, carrier: Arc<ActiveCarrierFn>) -> Self {
        self.hijacker = self.hijacker.with_carrier(carrier);
        self
    }

    pub fn with_language_activation(mut self, activate: Arc<ActivateLanguageFn>) -> Self {
        self.locale = self.locale.with_activation(activate);
        self
    }

    pub fn options(&self) -> &ChainOptions {
        &self.options
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Full request/response cycle around `handler`.
    pub fn process(&self, request: Request, handler: &dyn Handler) -> Result<Response, ChainError> {
        let mut ctx = RequestContext::new(request);

        if let Some(mut early) = self.process_request(&mut ctx) {
            early.apply_cookies(ctx.cookies.take_writes());
            return Ok(early);
        }

        let response = handler.handle(&mut ctx);
        self.process_response(&mut ctx, response)
    }

    /// Request phase. Returns a response when the chain short-circuits.
    pub fn process_request(&self, ctx: &mut RequestContext) -> Option<Response> {
        if let Some(redirect) = self.path_rewriter.process_request(ctx) {
            return Some(redirect);
        }

        let locale = self.locale.process_request(ctx);
        let region = self.region.process_request(ctx, &locale);
        self.devices.process_request(ctx);

        debug!(
            path = %ctx.request.path,
            language = %locale.language,
            region = %region.slug,
            "request phase complete"
        );
        None
    }

    /// Response phase. Fails only when a hijacked redirect cannot be resolved.
    pub fn process_response(
        &self,
        ctx: &mut RequestContext,
        mut response: Response,
    ) -> Result<Response, ChainError> {
        self.devices.process_response(ctx, &mut response);
        self.ajax_vary.process_response(&mut response);
        self.region.process_response(&mut response);
        self.locale.process_response(ctx, &mut response);

        let mut response = self.hijacker.process_response(ctx, response)?;
        response.apply_cookies(ctx.cookies.take_writes());
        Ok(response)
    }
}

#[cfg(test)]
#[path = "chain_test.rs"]
mod chain_test;
