use crate::constants::{XML_HTTP_REQUEST, header, method, param};
use crate::context::{Params, RequestContext, parse_params};
use crate::response::Response;
use crate::result::{ChainError, ResolveError};
use crate::util::split_path_query;
use std::sync::Arc;
use tracing::{debug, warn};

/// Application view invoked for a request.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut RequestContext) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&mut RequestContext) -> Response + Send + Sync,
{
    fn handle(&self, ctx: &mut RequestContext) -> Response {
        self(ctx)
    }
}

/// Maps a request path to the handler that serves it.
pub trait ViewResolver: Send + Sync {
    fn resolve(&self, path: &str) -> Result<Arc<dyn Handler>, ResolveError>;
}

/// Returns the carrier whose path prefix is active for the request, if any.
pub type ActiveCarrierFn = dyn Fn(&RequestContext) -> Option<String> + Send + Sync;

/// Turns redirects answering hijacked POSTs into in-process fragment renders.
#[derive(Default)]
pub struct RedirectHijacker {
    resolver: Option<Arc<dyn ViewResolver>>,
    carrier: Option<Arc<ActiveCarrierFn>>,
}

impl RedirectHijacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ViewResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_carrier(mut self, carrier: Arc<ActiveCarrierFn>) -> Self {
        self.carrier = Some(carrier);
        self
    }

    /// POST with a non-empty `_hijacked` field answered by a 301/302.
    pub fn should_hijack(&self, ctx: &RequestContext, response: &Response) -> bool {
        ctx.request.is_method(method::POST)
            && ctx
                .request
                .form
                .get(param::HIJACKED)
                .is_some_and(|value| !value.is_empty())
            && response.is_redirect()
    }

    pub fn process_response(
        &self,
        ctx: &mut RequestContext,
        response: Response,
    ) -> Result<Response, ChainError> {
        if !self.should_hijack(ctx, &response) {
            return Ok(response);
        }

        let location = response.location().unwrap_or_default().to_string();
        let carrier = self.carrier.as_ref().and_then(|active| active(ctx));
        let view_url = match &carrier {
            Some(_) => strip_carrier(&location),
            None => location.clone(),
        };
        let (path, query) = split_path_query(&view_url);

        let Some(resolver) = &self.resolver else {
            return Err(ChainError::MissingResolver { location });
        };
        let handler = resolver.resolve(path).inspect_err(|err| {
            warn!(%location, error = %err, "hijacked redirect target did not resolve");
        })?;

        debug!(%location, view = %path, carrier = ?carrier, "hijacking redirect");

        let mut fragment = fragment_context(ctx, path, parse_params(query), &location);
        let mut replacement = handler.handle(&mut fragment);
        ctx.cookies = std::mem::take(&mut fragment.cookies);
        ctx.fragment_uri = Some(location);

        if let Some(vary) = response.headers.get(header::VARY) {
            replacement.add_vary(vary);
        }
        for (name, write) in response.cookies {
            if !replacement.cookies.contains_key(&name) {
                replacement.apply_cookie(write);
            }
        }

        Ok(replacement)
    }
}

/// Drops the first two path segments (`/<carrier>/`) of a location.
pub fn strip_carrier(location: &str) -> String {
    let remainder: Vec<&str> = location.split('/').skip(2).collect();
    format!("/{}", remainder.join("/"))
}

fn fragment_context(
    ctx: &mut RequestContext,
    path: &str,
    query: Params,
    location: &str,
) -> RequestContext {
    let mut request = ctx.request.clone();
    request.method = method::GET.to_string();
    request.path = path.to_string();
    request.query = query;
    request.form.clear();
    request
        .headers
        .insert(header::X_REQUESTED_WITH, XML_HTTP_REQUEST);

    RequestContext {
        request,
        cookies: std::mem::take(&mut ctx.cookies),
        accept_language: ctx.accept_language.clone(),
        language: ctx.language.clone(),
        override_language: ctx.override_language.clone(),
        language_cookie: ctx.language_cookie.clone(),
        region: ctx.region.clone(),
        devices: ctx.devices.clone(),
        fragment_uri: Some(location.to_string()),
    }
}

#[cfg(test)]
#[path = "hijack_test.rs"]
mod hijack_test;
