//! Per-invocation identity and correlation

use appdiff_core_types::RequestContext;

/// Which deployed app a diff targets, plus the request it belongs to
#[derive(Debug, Clone)]
pub struct DiffContext {
    pub request: RequestContext,
    pub group_id: String,
    pub app_id: String,
}

impl DiffContext {
    /// Create a context with a fresh request id
    pub fn new(group_id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            request: RequestContext::new().with_command("diff"),
            group_id: group_id.into(),
            app_id: app_id.into(),
        }
    }

    /// Replace the request context (e.g. to reuse a caller's request id)
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }
}
