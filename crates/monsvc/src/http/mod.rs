pub mod api;

use std::future::Future;

use axum::Router;
use monsvc_registry::Registry;
use tokio::net::TcpListener;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone, Debug)]
pub struct HttpState {
    pub registry: Registry,
}

impl HttpState {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }
}

/// The full application: machine API plus OpenAPI document and Swagger UI.
pub fn app(registry: Registry) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", api::openapi()))
        .merge(api::router())
        .with_state(HttpState::new(registry))
}

/// Serve until `shutdown` resolves; in-flight requests are allowed to finish.
pub async fn serve<F>(listener: TcpListener, registry: Registry, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(registry))
        .with_graceful_shutdown(shutdown)
        .await
}
