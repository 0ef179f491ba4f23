//! Request ID generation and propagation.
//!
//! # Responsibilities
//! - Attach a unique id to every request as early as possible
//! - Reuse an incoming `x-request-id` so upstream callers can correlate
//! - Echo the id on the response and expose it as a request extension
//!
//! # Design Decisions
//! - Generated ids are UUIDv4; an incoming non-empty header wins
//! - The id lives in request extensions so spans and handlers can read it
//!   without re-parsing headers

use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request id attached by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Convenience accessor for the request id extension.
pub trait RequestIdExt {
    /// Request id attached by [`RequestIdLayer`], if the layer ran.
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions().get::<RequestId>().map(RequestId::as_str)
    }
}

/// Layer applying [`RequestIdService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Middleware that stamps requests and responses with `x-request-id`.
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let value = match request.headers().get(X_REQUEST_ID) {
            Some(existing) if !existing.is_empty() => existing.clone(),
            _ => {
                let generated = Uuid::new_v4().to_string();
                let value = HeaderValue::from_str(&generated)
                    .expect("generated UUID is a valid header value");
                request.headers_mut().insert(X_REQUEST_ID, value.clone());
                value
            }
        };

        let id = String::from_utf8_lossy(value.as_bytes()).into_owned();
        request.extensions_mut().insert(RequestId(id));

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            response.headers_mut().entry(X_REQUEST_ID).or_insert(value);
            Ok(response)
        })
    }
}
