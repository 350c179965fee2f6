//! Request routing and middleware chaining.
//!
//! A [`Router`] registers handlers per path pattern and HTTP method.
//! [`Router::group`] derives a router under a path prefix that shares the
//! same route table but carries its own copy of the middleware chain, so
//! middleware added to a group never leaks to routes registered elsewhere.
//!
//! Once registration is finished, [`Router::into_dispatcher`] freezes the
//! table into a [`Dispatcher`], which resolves each request to a handler:
//!
//! - no pattern matches the path: `404`
//! - a pattern matches but has no handler for the method: `405` with `Allow`
//!
//! The dispatcher implements [`tower::Service`] so axum can host it.

mod handler;
mod pattern;

use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::Method;
use axum::response::{IntoResponse, Response};

pub use handler::{BoxFuture, Handler, Middleware, Next};
pub use pattern::{PathParams, PatternError, RoutePattern};

use handler::{layer, BoxedHandler, BoxedMiddleware};

use crate::error::AppError;

struct RouteEntry<S> {
    pattern: RoutePattern,
    /// Registration order is kept for the `Allow` header.
    methods: Vec<(Method, BoxedHandler<S>)>,
}

impl<S> Clone for RouteEntry<S> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            methods: self.methods.clone(),
        }
    }
}

impl<S> RouteEntry<S> {
    fn handler(&self, method: &Method) -> Option<&BoxedHandler<S>> {
        self.methods
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, h)| h)
    }

    fn allowed(&self) -> Vec<Method> {
        self.methods.iter().map(|(m, _)| m.clone()).collect()
    }
}

type RouteTable<S> = Arc<Mutex<Vec<RouteEntry<S>>>>;

/// Route registration handle.
pub struct Router<S> {
    prefix: String,
    middleware: Vec<BoxedMiddleware<S>>,
    table: RouteTable<S>,
}

impl<S> Default for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// An empty root router with a fresh route table.
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            middleware: Vec::new(),
            table: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A router under `prefix` sharing this router's route table. The
    /// middleware chain is copied: later additions on either side do not
    /// affect the other.
    pub fn group(&self, prefix: &str) -> Self {
        Self {
            prefix: format!("{}{}", self.prefix, prefix.trim_end_matches('/')),
            middleware: self.middleware.clone(),
            table: Arc::clone(&self.table),
        }
    }

    /// Append a middleware. It wraps only handlers registered afterwards on
    /// this router and on groups derived from it afterwards. The first
    /// middleware added runs outermost.
    pub fn middleware(&mut self, middleware: impl Middleware<S>) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Register `handler` for `method` on `prefix + pattern`. A second
    /// registration of the same method and pattern replaces the first.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid; routes are registered at startup.
    pub fn route(&self, method: Method, pattern: &str, handler: impl Handler<S>) -> &Self {
        let full = format!("{}{}", self.prefix, pattern);
        let parsed = RoutePattern::parse(&full).unwrap_or_else(|e| panic!("invalid route: {e}"));
        let handler = layer(handler.into_boxed_handler(), &self.middleware);

        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let index = match table.iter().position(|e| e.pattern == parsed) {
            Some(index) => index,
            None => {
                table.push(RouteEntry {
                    pattern: parsed,
                    methods: Vec::new(),
                });
                table.len() - 1
            }
        };

        let entry = &mut table[index];
        match entry.methods.iter_mut().find(|(m, _)| *m == method) {
            Some(slot) => slot.1 = handler,
            None => entry.methods.push((method.clone(), handler)),
        }
        tracing::debug!(%method, pattern = %full, "Registered route");
        self
    }

    pub fn get(&self, pattern: &str, handler: impl Handler<S>) -> &Self {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post(&self, pattern: &str, handler: impl Handler<S>) -> &Self {
        self.route(Method::POST, pattern, handler)
    }

    pub fn patch(&self, pattern: &str, handler: impl Handler<S>) -> &Self {
        self.route(Method::PATCH, pattern, handler)
    }

    pub fn delete(&self, pattern: &str, handler: impl Handler<S>) -> &Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Freeze the shared route table together with the application state.
    pub fn into_dispatcher(self, state: S) -> Dispatcher<S> {
        let routes = self
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Dispatcher {
            inner: Arc::new(DispatcherInner { routes, state }),
        }
    }
}

struct DispatcherInner<S> {
    routes: Vec<RouteEntry<S>>,
    state: S,
}

/// Immutable, cheaply clonable request dispatcher.
pub struct Dispatcher<S> {
    inner: Arc<DispatcherInner<S>>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Dispatcher<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Most specific matching route; ties go to the first registered.
    fn resolve(&self, path: &str) -> Option<(&RouteEntry<S>, PathParams)> {
        let mut best: Option<(&RouteEntry<S>, PathParams)> = None;
        for entry in &self.inner.routes {
            let Some(params) = entry.pattern.matches(path) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((current, _)) => entry.pattern.specificity_cmp(&current.pattern).is_gt(),
            };
            if better {
                best = Some((entry, params));
            }
        }
        best
    }

    /// Route one request to its handler.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let Some((entry, params)) = self.resolve(req.uri().path()) else {
            return AppError::RouteNotFound.into_response();
        };

        let Some(handler) = entry.handler(req.method()) else {
            return AppError::MethodNotAllowed(entry.allowed()).into_response();
        };

        let handler = Arc::clone(handler);
        req.extensions_mut().insert(params);
        handler.call(self.inner.state.clone(), req).await
    }
}

impl<S> tower::Service<Request> for Dispatcher<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let dispatcher = self.clone();
        Box::pin(async move { Ok(dispatcher.dispatch(req).await) })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    type Trace = Arc<StdMutex<Vec<String>>>;

    async fn ok(_: (), _: Request) -> &'static str {
        "ok"
    }

    async fn echo_id(_: (), req: Request) -> String {
        let params = req.extensions().get::<PathParams>().cloned().unwrap_or_default();
        params.get("id").unwrap_or("none").to_string()
    }

    fn request(method: Method, uri: &str) -> Request {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn tracing_middleware(
        trace: Trace,
        name: &'static str,
    ) -> impl Fn(Request, Next<()>) -> BoxFuture + Clone {
        move |req: Request, next: Next<()>| -> BoxFuture {
            let trace = Arc::clone(&trace);
            Box::pin(async move {
                trace.lock().unwrap().push(format!("{name} pre"));
                let response = next.run(req).await;
                trace.lock().unwrap().push(format!("{name} post"));
                response
            })
        }
    }

    #[tokio::test]
    async fn unknown_path_is_404_and_unknown_method_is_405() {
        let router = Router::new();
        router.get("/items", ok).post("/items", ok);
        let dispatcher = router.into_dispatcher(());

        let response = dispatcher.dispatch(request(Method::DELETE, "/items")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");

        let response = dispatcher.dispatch(request(Method::GET, "/nothing")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = dispatcher.dispatch(request(Method::POST, "/items")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn middleware_runs_first_registered_outermost() {
        let trace: Trace = Arc::default();
        let mut router = Router::new();
        router
            .middleware(tracing_middleware(Arc::clone(&trace), "A"))
            .middleware(tracing_middleware(Arc::clone(&trace), "B"));

        let handler_trace = Arc::clone(&trace);
        router.get("/", move |_: (), _: Request| {
            let trace = Arc::clone(&handler_trace);
            async move {
                trace.lock().unwrap().push("handler".to_string());
                StatusCode::NO_CONTENT
            }
        });

        let response = router
            .into_dispatcher(())
            .dispatch(request(Method::GET, "/"))
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["A pre", "B pre", "handler", "B post", "A post"]
        );
    }

    #[tokio::test]
    async fn group_snapshots_middleware_and_shares_table() {
        let trace: Trace = Arc::default();
        let mut root = Router::new();
        root.middleware(tracing_middleware(Arc::clone(&trace), "root"));

        let mut api = root.group("/api/v1/");
        api.middleware(tracing_middleware(Arc::clone(&trace), "api"));
        api.get("/inner", ok);

        // Added after the group was derived: the group must not see it.
        root.middleware(tracing_middleware(Arc::clone(&trace), "late"));
        root.get("/outer", ok);

        let dispatcher = root.into_dispatcher(());

        dispatcher.dispatch(request(Method::GET, "/api/v1/inner")).await;
        assert_eq!(
            std::mem::take(&mut *trace.lock().unwrap()),
            vec!["root pre", "api pre", "api post", "root post"]
        );

        dispatcher.dispatch(request(Method::GET, "/outer")).await;
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["root pre", "late pre", "late post", "root post"]
        );
    }

    #[tokio::test]
    async fn placeholders_are_exposed_to_handlers() {
        let router = Router::new();
        router.get("/locations/{id}", echo_id);
        let response = router
            .into_dispatcher(())
            .dispatch(request(Method::GET, "/locations/42"))
            .await;
        assert_eq!(body_text(response).await, "42");
    }

    #[tokio::test]
    async fn literal_route_wins_over_placeholder() {
        let router = Router::new();
        router.get("/locations/{id}", echo_id);
        router.get("/locations/summary", |_: (), _: Request| async { "summary" });

        let dispatcher = router.into_dispatcher(());
        let response = dispatcher
            .dispatch(request(Method::GET, "/locations/summary"))
            .await;
        assert_eq!(body_text(response).await, "summary");

        let response = dispatcher.dispatch(request(Method::GET, "/locations/7")).await;
        assert_eq!(body_text(response).await, "7");
    }

    #[tokio::test]
    async fn re_registering_a_method_replaces_the_handler() {
        let router = Router::new();
        router.get("/items", ok);
        router.get("/items", |_: (), _: Request| async { "second" });

        let response = router
            .into_dispatcher(())
            .dispatch(request(Method::GET, "/items"))
            .await;
        assert_eq!(body_text(response).await, "second");
    }

    #[tokio::test]
    async fn dispatcher_is_a_tower_service() {
        let router = Router::new();
        router.get("/items", ok);
        let response = router
            .into_dispatcher(())
            .oneshot(request(Method::GET, "/items"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn invalid_pattern_panics_at_registration() {
        Router::<()>::new().get("items/{", ok);
    }
}
