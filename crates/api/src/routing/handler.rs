//! Handler and middleware type erasure.
//!
//! The route table stores handlers of many concrete types side by side, so
//! each one is boxed behind [`ErasedHandler`]:
//!
//! ```text
//! async fn create(state: AppState, req: Request) -> AppResult<..>
//!        ↓ router.post("/locations", create)
//! create.into_boxed_handler()           ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(create))           ← stored as BoxedHandler<S>
//!        ↓ wrapped once per middleware, outermost first
//! Arc::new(Layered { middleware, inner })
//! ```
//!
//! Per request the dispatcher pays one `Arc` clone and one virtual call per
//! layer.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future resolving to a [`Response`].
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

#[doc(hidden)]
pub trait ErasedHandler<S>: Send + Sync + 'static {
    fn call(&self, state: S, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler<S> = Arc<dyn ErasedHandler<S>>;

/// Implemented for every `async fn(S, Request) -> impl IntoResponse`.
pub trait Handler<S>: Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler<S>;
}

impl<S, F, Fut, R> Handler<S> for F
where
    S: Send + 'static,
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler<S> {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<S, F, Fut, R> ErasedHandler<S> for FnHandler<F>
where
    S: Send + 'static,
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    fn call(&self, state: S, req: Request) -> BoxFuture {
        let fut = (self.0)(state, req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// The remainder of the chain below a middleware.
pub struct Next<S> {
    inner: BoxedHandler<S>,
    state: S,
}

impl<S: 'static> Next<S> {
    /// Run the rest of the chain, ending in the route handler.
    pub async fn run(self, req: Request) -> Response {
        self.inner.call(self.state, req).await
    }
}

/// Implemented for every `async fn(Request, Next<S>) -> Response`.
pub trait Middleware<S>: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next<S>) -> BoxFuture;
}

impl<S, F, Fut> Middleware<S> for F
where
    F: Fn(Request, Next<S>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request, next: Next<S>) -> BoxFuture {
        Box::pin(self(req, next))
    }
}

pub type BoxedMiddleware<S> = Arc<dyn Middleware<S>>;

/// A handler with one middleware in front of it.
struct Layered<S> {
    middleware: BoxedMiddleware<S>,
    inner: BoxedHandler<S>,
}

impl<S: Send + 'static> ErasedHandler<S> for Layered<S> {
    fn call(&self, state: S, req: Request) -> BoxFuture {
        let next = Next {
            inner: Arc::clone(&self.inner),
            state,
        };
        self.middleware.call(req, next)
    }
}

/// Wrap `handler` in `chain` so that `chain[0]` runs first.
pub(crate) fn layer<S: Send + 'static>(
    handler: BoxedHandler<S>,
    chain: &[BoxedMiddleware<S>],
) -> BoxedHandler<S> {
    chain.iter().rev().fold(handler, |inner, middleware| {
        Arc::new(Layered {
            middleware: Arc::clone(middleware),
            inner,
        })
    })
}
