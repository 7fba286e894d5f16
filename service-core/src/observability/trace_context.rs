//! W3C Trace Context propagation for outbound HTTP calls.
//!
//! Injects `traceparent`/`tracestate` from the current span so upstream
//! providers and APIs can be correlated with our own request spans.
//!
//! See: https://www.w3.org/TR/trace-context/

use opentelemetry::trace::TraceContextExt;
use reqwest::header::HeaderMap;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Header name for W3C traceparent
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Header name for W3C tracestate
pub const TRACESTATE_HEADER: &str = "tracestate";

/// Header name for inbound request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Inject current trace context into HTTP request headers.
///
/// Leaves `headers` untouched when there is no valid OpenTelemetry context
/// (e.g. OTLP export disabled).
pub fn inject_trace_context(headers: &mut HeaderMap) {
    let span = Span::current();
    let context = span.context();
    let otel_span = context.span();
    let span_context = otel_span.span_context();

    if span_context.is_valid() {
        // version-trace_id-span_id-trace_flags
        let traceparent = format!(
            "00-{}-{}-{:02x}",
            span_context.trace_id(),
            span_context.span_id(),
            span_context.trace_flags().to_u8()
        );

        if let Ok(value) = traceparent.parse() {
            headers.insert(TRACEPARENT_HEADER, value);
        }

        let tracestate_str = span_context.trace_state().header();
        if !tracestate_str.is_empty()
            && let Ok(value) = tracestate_str.parse()
        {
            headers.insert(TRACESTATE_HEADER, value);
        }
    }
}

/// Wraps reqwest's RequestBuilder to inject trace headers on send.
pub struct TracedRequest {
    request: reqwest::RequestBuilder,
}

impl TracedRequest {
    pub fn new(request: reqwest::RequestBuilder) -> Self {
        Self { request }
    }

    pub fn header(self, key: &str, value: &str) -> Self {
        Self {
            request: self.request.header(key, value),
        }
    }

    pub fn json<T: serde::Serialize + ?Sized>(self, json: &T) -> Self {
        Self {
            request: self.request.json(json),
        }
    }

    /// Form-encoded body (`application/x-www-form-urlencoded`).
    pub fn form<T: serde::Serialize + ?Sized>(self, form: &T) -> Self {
        Self {
            request: self.request.form(form),
        }
    }

    pub fn bearer_auth<T: std::fmt::Display>(self, token: T) -> Self {
        Self {
            request: self.request.bearer_auth(token),
        }
    }

    pub async fn send(self) -> Result<reqwest::Response, reqwest::Error> {
        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);

        self.request.headers(headers).send().await
    }
}

/// Extension trait for reqwest::Client to create traced requests.
pub trait TracedClientExt {
    fn traced_post(&self, url: &str) -> TracedRequest;
}

impl TracedClientExt for reqwest::Client {
    fn traced_post(&self, url: &str) -> TracedRequest {
        TracedRequest::new(self.post(url))
    }
}
