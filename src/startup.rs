use std::net::TcpListener;

use axum::{
    body::Body,
    http::Request,
    routing::get,
    Router, Server,
};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::configuration::Settings;
use crate::routes;

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind listener to {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Serve(#[from] hyper::Error),
}

pub struct Application {
    port: u16,
    listener: TcpListener,
}

impl Application {
    /// Binds the listener right away, so a taken port fails here rather than
    /// in `run_until_stopped`. Port `0` picks a free port; see [`Application::port`].
    pub fn build(configuration: Settings) -> Result<Self, ServerError> {
        let address = configuration.application.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
        let port = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { address, source })?
            .port();

        Ok(Self { port, listener })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serves until the process is terminated; there is no shutdown path.
    ///
    /// Must be polled on a tokio runtime, which takes over the bound listener.
    pub async fn run_until_stopped(self) -> Result<(), ServerError> {
        let server = Server::from_tcp(self.listener)?.serve(app().into_make_service());
        tracing::info!(address = %server.local_addr(), "Server is running");
        server.await?;
        Ok(())
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span)),
        )
}

// The request id is only attached to the span, never echoed back.
fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
