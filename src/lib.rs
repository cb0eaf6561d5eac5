mod accept_language;
mod chain;
mod config;
pub mod constants;
mod context;
mod cookies;
mod device;
mod headers;
mod hijack;
mod locale;
mod options;
mod path_rewriter;
mod region;
mod response;
mod result;
mod tables;
mod util;
mod vary;

#[cfg(test)]
mod test_support;

pub use accept_language::{LanguageRange, best_match, parse_accept_language};
pub use chain::InterceptorChain;
pub use config::{ChainConfig, ConfigError, RegionConfig, load_config};
pub use context::{DeviceFlags, Params, Request, RequestContext};
pub use cookies::{CookieAttributes, CookieJar, CookieWrite, CookieWrites};
pub use device::DeviceFlagTracker;
pub use headers::{HeaderCollection, Headers};
pub use hijack::{ActiveCarrierFn, Handler, RedirectHijacker, ViewResolver, strip_carrier};
pub use locale::{ActivateLanguageFn, LocaleResolver, ResolvedLanguage, parse_language_cookie};
pub use options::{ChainOptions, ValidationError};
pub use path_rewriter::{PathRewriter, PrefixSplit};
pub use region::{GeoLookup, NoGeoLookup, RegionResolver};
pub use response::{Response, STATUS_FOUND, STATUS_MOVED_PERMANENTLY, STATUS_OK};
pub use result::{ChainError, ResolveError};
pub use tables::{LanguageTable, Region, RegionTable};
pub use util::{contains_ignore_case, equals_ignore_case, normalize_lower};
pub use vary::VaryAnnotator;
