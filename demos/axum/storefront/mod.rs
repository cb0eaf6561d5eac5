use std::path::Path;
use std::sync::Arc;

use storefront_middleware_rs::{
    ConfigError, Handler, InterceptorChain, RequestContext, ResolveError, Response, ViewResolver,
    load_config,
};

pub mod middleware;

pub type SharedChain = Arc<InterceptorChain>;

#[derive(Clone)]
pub struct AppState {
    pub chain: SharedChain,
}

/// Resolved storefront state handed to route handlers as a request extension.
#[derive(Clone, Debug)]
pub struct Storefront {
    pub language: String,
    pub region: String,
}

/// In-process views reachable by hijacked redirects.
struct FragmentViews;

impl ViewResolver for FragmentViews {
    fn resolve(&self, path: &str) -> Result<Arc<dyn Handler>, ResolveError> {
        let id = path
            .strip_prefix("/apps/")
            .and_then(|rest| rest.parse::<u32>().ok())
            .ok_or_else(|| ResolveError::NotFound {
                path: path.to_string(),
            })?;

        Ok(Arc::new(move |ctx: &mut RequestContext| {
            Response::ok(format!(
                "<section data-app=\"{id}\">Thanks! ({})</section>",
                ctx.language
            ))
        }))
    }
}

pub fn build_state() -> Result<AppState, ConfigError> {
    let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/axum/storefront.toml"));
    let chain = load_config(path)?
        .build_chain()?
        .with_view_resolver(Arc::new(FragmentViews));

    Ok(AppState {
        chain: Arc::new(chain),
    })
}
