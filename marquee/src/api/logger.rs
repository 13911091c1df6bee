use std::{
    fmt,
    net::SocketAddr,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use axum::extract::{ConnectInfo, MatchedPath};
use futures::Future;
use http::{Method, Request, Response, StatusCode};
use http_body::Body;
use prometheus::{register_histogram_vec, HistogramVec};
use tower_layer::Layer;
use tower_service::Service;

lazy_static::lazy_static! {
    static ref API_ELAPSED_METRIC: HistogramVec = register_histogram_vec!(
        "marquee_api_elapsed_ms",
        "elapsed time & count of api responses",
        &["route", "status"]
    )
    .unwrap();
}

/// health checks are polled constantly, keep them out of the info log and metrics
const QUIET_PATHS: &[&str] = &["/api/v1/health"];

/// Logs one line per request and records its latency.
#[derive(Clone)]
pub struct LoggerLayer;

impl<S> Layer<S> for LoggerLayer {
    type Service = Logger<S>;

    fn layer(&self, service: S) -> Self::Service {
        Logger { inner: service }
    }
}

#[derive(Clone)]
pub struct Logger<S> {
    inner: S,
}

struct RequestLine {
    remote_addr: String,
    method: Method,
    path: String,
    route: String,
    quiet: bool,
    start: Instant,
}

impl RequestLine {
    fn new<B>(req: &Request<B>) -> Self {
        let path = req
            .uri()
            .path_and_query()
            .map(|x| x.to_string())
            .unwrap_or_default();
        let remote_addr = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|x| x.to_str().ok())
            .map(str::to_string)
            .or_else(|| {
                req.extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|x| x.0.to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());
        let route = req
            .extensions()
            .get::<MatchedPath>()
            .map(|x| x.as_str().to_string())
            .unwrap_or_else(|| "unmatched".to_string());
        let quiet = QUIET_PATHS.contains(&req.uri().path());
        Self {
            remote_addr,
            method: req.method().clone(),
            path,
            route,
            quiet,
            start: Instant::now(),
        }
    }

    fn finish(&self, status: Option<StatusCode>, outcome: &dyn fmt::Display) {
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        let level = if self.quiet {
            log::Level::Debug
        } else if status.map_or(true, |x| x.is_server_error()) {
            log::Level::Warn
        } else {
            log::Level::Info
        };
        if !self.quiet {
            let label = status.as_ref().map_or("INTERNAL", StatusCode::as_str);
            API_ELAPSED_METRIC
                .with_label_values(&[&*self.route, label])
                .observe(elapsed);
        }
        log!(
            level,
            "[{}] {} {} -> {} [{:.02} ms]",
            self.remote_addr,
            self.method,
            self.path,
            outcome,
            elapsed
        );
    }
}

#[pin_project::pin_project]
pub struct LoggerFuture<F> {
    line: RequestLine,
    #[pin]
    inner: F,
}

impl<F, ResBody, E> Future for LoggerFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    E: fmt::Display,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let output = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(output) => output,
        };
        match &output {
            Ok(response) => this.line.finish(Some(response.status()), &response.status()),
            Err(e) => this.line.finish(None, &format_args!("FAIL {}", e)),
        }
        Poll::Ready(output)
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for Logger<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ReqBody: Body,
    ResBody: Body,
    S::Error: fmt::Display + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = LoggerFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let line = RequestLine::new(&req);
        LoggerFuture {
            line,
            inner: self.inner.call(req),
        }
    }
}
