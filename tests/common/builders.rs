use std::net::IpAddr;
use std::sync::Arc;
use storefront_middleware_rs::constants::header;
use storefront_middleware_rs::{
    ChainOptions, GeoLookup, Handler, InterceptorChain, LanguageTable, Region, RegionTable,
    Request, RequestContext, Response, ViewResolver,
};

pub fn languages() -> LanguageTable {
    LanguageTable::new(["en-US", "de", "fr", "pt-BR", "es", "pl"])
}

pub fn regions() -> RegionTable {
    RegionTable::new(
        Region::worldwide("en-US"),
        [
            Region::new("us", "us", "en-US", 1),
            Region::new("br", "br", "pt-BR", 2),
            Region::new("es", "es", "es", 3),
            Region::new("pl", "pl", "pl", 4),
        ],
    )
    .expect("valid regions")
}

#[derive(Default)]
pub struct ChainBuilder {
    options: Option<ChainOptions>,
    regions: Option<RegionTable>,
    geo: Option<Arc<dyn GeoLookup>>,
    resolver: Option<Arc<dyn ViewResolver>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: ChainOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn permanent_redirects(mut self) -> Self {
        let mut options = self.options.take().unwrap_or_default();
        options.permanent_redirects = true;
        self.options = Some(options);
        self
    }

    pub fn regions(mut self, regions: RegionTable) -> Self {
        self.regions = Some(regions);
        self
    }

    pub fn geo<F>(mut self, lookup: F) -> Self
    where
        F: Fn(IpAddr) -> Option<String> + Send + Sync + 'static,
    {
        self.geo = Some(Arc::new(lookup));
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn ViewResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn build(self) -> InterceptorChain {
        let mut chain = InterceptorChain::new(
            self.options.unwrap_or_default(),
            languages(),
            self.regions.unwrap_or_else(regions),
        )
        .expect("valid chain");
        if let Some(geo) = self.geo {
            chain = chain.with_geo(geo);
        }
        if let Some(resolver) = self.resolver {
            chain = chain.with_view_resolver(resolver);
        }
        chain
    }
}

pub fn chain() -> ChainBuilder {
    ChainBuilder::new()
}

pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn accept_language(mut self, value: &str) -> Self {
        self.request = self.request.with_header(header::ACCEPT_LANGUAGE, value);
        self
    }

    pub fn cookie(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.with_cookie(name, value);
        self
    }

    pub fn form(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.with_form(name, value);
        self
    }

    pub fn remote_addr(mut self, addr: IpAddr) -> Self {
        self.request = self.request.with_remote_addr(addr);
        self
    }

    pub fn build(self) -> Request {
        self.request
    }

    /// Runs the request through `chain` with a handler echoing the resolved state.
    pub fn send(self, chain: &InterceptorChain) -> Response {
        chain
            .process(self.request, &echo_view)
            .expect("chain completes")
    }
}

pub fn get(path: &str) -> RequestBuilder {
    RequestBuilder {
        request: Request::get(path),
    }
}

pub fn post(path: &str) -> RequestBuilder {
    RequestBuilder {
        request: Request::post(path),
    }
}

/// Body: `<language>|<region>|<active device classes>`.
pub fn echo_view(ctx: &mut RequestContext) -> Response {
    let devices: Vec<&str> = ctx
        .devices
        .iter()
        .filter(|(_, active)| *active)
        .map(|(class, _)| class)
        .collect();
    Response::ok(format!(
        "{}|{}|{}",
        ctx.language,
        ctx.region.as_deref().unwrap_or_default(),
        devices.join(",")
    ))
}

pub fn redirect_view(location: &'static str) -> impl Handler {
    move |_: &mut RequestContext| Response::redirect(location, false)
}
