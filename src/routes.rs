use axum::{
    extract::DefaultBodyLimit,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, dashboard, exports, incidents, middleware, notifications, upload};
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_app(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/upload/",
            get(upload::upload_get)
                .post(upload::upload_post)
                .layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES)),
        )
        .route("/incidents/", get(incidents::incidents_list))
        .route("/incident/:id/", get(incidents::incident_detail))
        .route(
            "/incident/:id/edit/",
            get(incidents::incident_edit_get).post(incidents::incident_edit_post),
        )
        .route("/delete/:id/", post(incidents::incident_delete))
        .route("/dashboard/", get(dashboard::dashboard))
        .route("/dashboard/pdf/", get(dashboard::dashboard_pdf))
        .route("/download/pdf/", get(exports::download_pdf))
        .route("/download_csv/", get(exports::download_csv))
        .route("/notifications/", get(notifications::notifications_list))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), middleware::auth_middleware));

    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());
    let assets = Router::new()
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        ));

    Router::new()
        .route("/", get(auth::home))
        .route("/login/", get(auth::login_get).post(auth::login_post))
        .route("/logout/", get(auth::logout).post(auth::logout))
        .merge(protected_routes)
        .merge(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
