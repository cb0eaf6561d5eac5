pub mod header {
    pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
    pub const COOKIE: &str = "Cookie";
    pub const LOCATION: &str = "Location";
    pub const SET_COOKIE: &str = "Set-Cookie";
    pub const VARY: &str = "Vary";
    pub const X_REQUESTED_WITH: &str = "X-Requested-With";
}

pub mod method {
    pub const GET: &str = "GET";
    pub const POST: &str = "POST";
}

pub mod cookie {
    pub const LANG: &str = "lang";
    pub const REGION: &str = "region";
    pub const DEFAULT_PATH: &str = "/";
    pub const EPOCH_EXPIRES: &str = "Thu, 01-Jan-1970 00:00:00 GMT";
}

pub mod param {
    pub const LANG: &str = "lang";
    pub const REGION: &str = "region";
    pub const HIJACKED: &str = "_hijacked";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
}

pub mod device {
    pub const MOBILE: &str = "mobile";
    pub const GAIA: &str = "gaia";
    pub const TABLET: &str = "tablet";
}

pub mod region {
    pub const WORLDWIDE: &str = "worldwide";
    pub const US: &str = "us";
}

pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
