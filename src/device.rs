use crate::constants::param;
use crate::context::RequestContext;
use crate::options::ChainOptions;
use crate::response::Response;
use std::sync::Arc;
use tracing::debug;

/// Persists device-class flags (`mobile`, `gaia`, `tablet`, ...) in cookies.
pub struct DeviceFlagTracker {
    options: Arc<ChainOptions>,
}

impl DeviceFlagTracker {
    pub fn new(options: Arc<ChainOptions>) -> Self {
        Self { options }
    }

    pub fn classes(&self) -> &[String] {
        &self.options.devices
    }

    pub fn process_request(&self, ctx: &mut RequestContext) {
        for class in self.classes() {
            // Set by an upstream detector.
            if ctx.devices.get(class) {
                continue;
            }

            let requested = ctx.request.query_param(class);
            let remembered = ctx.cookies.is_set(class);
            let active = requested == Some(param::TRUE)
                || (remembered && requested != Some(param::FALSE));

            debug!(device = %class, active, remembered, "resolved device flag");
            ctx.devices.set(class.as_str(), active);
        }
    }

    pub fn process_response(&self, ctx: &RequestContext, response: &mut Response) {
        for class in self.classes() {
            let active = ctx.devices.get(class);
            let remembered = ctx.cookies.is_set(class);

            if !active && remembered {
                response.delete_cookie(class.as_str());
            } else if active && !remembered {
                response.set_cookie(class.as_str(), param::TRUE);
            }
        }
    }
}

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;
