//! Request correlation middleware.
//!
//! Every request is served inside a [`TraceId::scope`] holding a freshly
//! generated identifier. Error envelopes and log events raised while serving
//! the request read it from there, and the response echoes it in the
//! `trace-id` header, including responses produced from handler errors.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Wrap an [`actix_web::App`] so each request carries its own [`TraceId`].
///
/// ```
/// use actix_web::App;
/// use backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
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
    type Transform = TracedService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, inner: S) -> Self::Future {
        ready(Ok(TracedService { inner }))
    }
}

/// The inner service with request scoping applied.
pub struct TracedService<S> {
    inner: S,
}

fn echo_trace_id<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) else {
        warn!(%trace_id, "trace identifier is not a valid header value");
        return;
    };
    res.headers_mut()
        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
}

impl<S, B> Service<ServiceRequest> for TracedService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let method = req.method().clone();
        let path = req.path().to_owned();
        let served = TraceId::scope(trace_id, self.inner.call(req));
        Box::pin(async move {
            let mut res = served.await?;
            debug!(
                %trace_id,
                %method,
                path,
                status = res.status().as_u16(),
                "request served"
            );
            echo_trace_id(&mut res, trace_id);
            Ok(res)
        })
    }
}
