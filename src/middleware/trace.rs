//! W3C trace-context middleware and outbound propagation.
//!
//! Each incoming request either continues the trace named by its
//! `traceparent` header or starts a new one. The resulting
//! [`TraceContext`] is stored in task-local storage for the request so
//! outbound adapters can stamp their own `traceparent` on upstream
//! calls, and the trace id is echoed as a `trace-id` response header.
//!
//! Tokio task-local variables are not inherited across spawned tasks.
//! Use [`TraceContext::scope`] when spawning new tasks to keep the
//! active context in reach.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::future::Future;
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

/// W3C trace-context request header.
pub const TRACEPARENT: &str = "traceparent";

/// Response header carrying the trace id for log correlation.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_CONTEXT: TraceContext;
}

/// One hop's view of a distributed trace: the shared trace id plus this
/// hop's span id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceContext {
    trace_id: u128,
    span_id: u64,
    flags: u8,
}

impl TraceContext {
    /// Start a brand-new trace with sampled flags.
    pub fn root() -> Self {
        Self {
            trace_id: random_trace_id(),
            span_id: random_span_id(),
            flags: 0x01,
        }
    }

    /// Derive a child context: same trace, fresh span id.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: random_span_id(),
            flags: self.flags,
        }
    }

    /// Parse a `traceparent` header value.
    ///
    /// Only version `00` is accepted; all-zero trace or span ids are
    /// rejected per the W3C spec.
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split('-');
        let version = parts.next()?;
        let trace_field = parts.next()?;
        let span_field = parts.next()?;
        let flags_field = parts.next()?;
        if version != "00"
            || trace_field.len() != 32
            || span_field.len() != 16
            || flags_field.len() != 2
        {
            return None;
        }
        // from_str_radix tolerates a leading `+`; the header grammar is
        // lowercase hex only.
        if !is_lower_hex(trace_field) || !is_lower_hex(span_field) || !is_lower_hex(flags_field) {
            return None;
        }
        let trace_id = u128::from_str_radix(trace_field, 16).ok()?;
        let span_id = u64::from_str_radix(span_field, 16).ok()?;
        if trace_id == 0 || span_id == 0 {
            return None;
        }
        let flags = u8::from_str_radix(flags_field, 16).ok()?;
        // Version 00 has exactly four segments.
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            trace_id,
            span_id,
            flags,
        })
    }

    /// Render this context as a `traceparent` header value.
    pub fn traceparent(&self) -> String {
        format!(
            "00-{:032x}-{:016x}-{:02x}",
            self.trace_id, self.span_id, self.flags
        )
    }

    /// The 32-hex-digit trace id shared across hops.
    pub fn trace_id_hex(&self) -> String {
        format!("{:032x}", self.trace_id)
    }

    /// Returns the context scoped to the current task, if any.
    pub fn current() -> Option<Self> {
        TRACE_CONTEXT.try_with(|context| *context).ok()
    }

    /// Execute a future with the supplied context in scope.
    pub async fn scope<Fut>(context: TraceContext, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_CONTEXT.scope(context, fut).await
    }
}

fn is_lower_hex(field: &str) -> bool {
    field.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Trace id of the current scope as 32 hex digits, or an empty string
/// outside any request scope.
pub fn current_trace_id() -> String {
    TraceContext::current()
        .map(|context| context.trace_id_hex())
        .unwrap_or_default()
}

fn random_trace_id() -> u128 {
    // Version-4 UUIDs always carry non-zero version bits.
    Uuid::new_v4().as_u128()
}

fn random_span_id() -> u64 {
    loop {
        let id = Uuid::new_v4().as_u128() as u64;
        if id != 0 {
            return id;
        }
    }
}

/// Stamp the current trace context onto an outbound request as a child
/// `traceparent`. A no-op outside any request scope.
pub fn propagate(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match TraceContext::current() {
        Some(context) => builder.header(TRACEPARENT, context.child().traceparent()),
        None => builder,
    }
}

/// Middleware continuing or starting a trace per request and adding a
/// `trace-id` header to every response.
///
/// Handlers and adapters read the context via [`TraceContext::current`].
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let context = req
            .headers()
            .get(TRACEPARENT)
            .and_then(|value| value.to_str().ok())
            .and_then(TraceContext::parse)
            .map(|parent| parent.child())
            .unwrap_or_else(TraceContext::root);
        let trace_id = context.trace_id_hex();
        let fut = self.service.call(req);
        Box::pin(TraceContext::scope(context, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&trace_id) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, trace_id, "failed to encode trace id header");
                }
            }
            Ok(res)
        }))
    }
}
