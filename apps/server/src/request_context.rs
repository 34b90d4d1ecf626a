//! Per-request data inserted by the request-id middleware

/// Available to handlers through `Extension<RequestContext>`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}
