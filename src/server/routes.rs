//! Route handlers and the error-to-response mapping.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppContext;
use crate::resolver::{ResolveError, ResolvedTrack};

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub url: String,
}

/// Track as returned to API clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView<'a> {
    #[serde(flatten)]
    pub track: &'a ResolvedTrack,
    pub short_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<&'a str>,
}

/// Error body `{success: false, error}` with a matching status code.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Resolve(ResolveError),
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        Self::Resolve(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Resolve(ResolveError::RegistryMiss(_)) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            ApiError::Resolve(e) => (
                StatusCode::from_u16(e.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                e.to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Server error in API handler");
        }

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn resolve(
    State(ctx): State<AppContext>,
    body: Result<Json<ResolveRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if request.url.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing url".to_string()));
    }

    let resolution = ctx.resolver.resolve_url(&request.url).await?;
    let view = TrackView {
        track: &resolution.track,
        short_url: resolution.short_url.clone(),
        source_url: Some(&resolution.source_url),
    };

    Ok(Json(json!({ "success": true, "track": view })).into_response())
}

pub async fn share_json(
    State(ctx): State<AppContext>,
    Path(short_id): Path<String>,
) -> Result<Response, ApiError> {
    let track = ctx.resolver.lookup_share(&short_id).await?;
    let view = TrackView {
        track: &track,
        short_url: ctx.resolver.short_url(&short_id),
        source_url: None,
    };

    Ok(Json(json!({ "success": true, "track": view })).into_response())
}

pub async fn share_page(State(ctx): State<AppContext>, Path(short_id): Path<String>) -> Response {
    match ctx.resolver.lookup_share(&short_id).await {
        Ok(track) => Html(render_track(&track)).into_response(),
        Err(e) => {
            tracing::debug!(%short_id, "Share page miss: {}", e);
            (
                StatusCode::NOT_FOUND,
                Html(page("Not found", "<h1>Not found</h1><p>This share link does not exist.</p>")),
            )
                .into_response()
        }
    }
}

fn render_track(track: &ResolvedTrack) -> String {
    let mut body = String::new();
    if let Some(artwork) = &track.artwork_url {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"\" width=\"300\">\n",
            escape_html(artwork)
        ));
    }
    body.push_str(&format!(
        "<h1>{}</h1>\n<h2>{}</h2>\n<ul>\n",
        escape_html(&track.title),
        escape_html(&track.artist)
    ));

    for link in &track.providers {
        let (href, label) = match (&link.deep_link, &link.fallback_search_link) {
            (Some(deep), _) => (deep, format!("Open in {}", link.display_name)),
            (None, Some(search)) => (search, format!("Search on {}", link.display_name)),
            (None, None) => continue,
        };
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(href),
            escape_html(&label)
        ));
    }
    body.push_str("</ul>");

    page(&format!("{} - {}", track.title, track.artist), &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n",
            "<head><meta charset=\"utf-8\"><title>{}</title></head>\n",
            "<body>\n{}\n</body>\n</html>\n",
        ),
        escape_html(title),
        body
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::resolver::Provider;
    use crate::resolver::traits::mocks::MockProvider;
    use crate::server::create_router;
    use crate::test_utils::{mock_service, three_providers};

    fn app() -> axum::Router {
        let (spotify, apple, youtube) = three_providers();
        let resolver = Arc::new(mock_service(&spotify, &apple, &youtube));
        create_router(AppContext { resolver })
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn post_resolve(body: &str) -> Request<Body> {
        Request::post("/api/resolve")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_resolve_success_shape() {
        let response = app()
            .oneshot(post_resolve(r#"{"url":"https://open.spotify.com/track/abc123"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        let track = &json["track"];
        assert_eq!(track["canonicalKey"], "spotify:abc123");
        assert_eq!(track["title"], "One More Time");
        assert_eq!(track["artist"], "Daft Punk");
        assert_eq!(track["sourceUrl"], "https://open.spotify.com/track/abc123");
        assert!(track["shortUrl"].as_str().unwrap().starts_with("http://localhost:3000/s/"));
        assert!(track.get("artwork").is_some());
        assert_eq!(track["providers"].as_array().unwrap().len(), 3);
        assert_eq!(track["providers"][0]["name"], "spotify");
        assert_eq!(track["providers"][0]["isAvailable"], true);
    }

    #[tokio::test]
    async fn test_resolve_unsupported_is_400() {
        let response = app()
            .oneshot(post_resolve(r#"{"url":"https://example.com/not-a-track"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Unsupported URL format"));
    }

    #[tokio::test]
    async fn test_resolve_bad_body_is_400() {
        for body in [r#"{"url":""}"#, "not json"] {
            let response = app().oneshot(post_resolve(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["success"], false);
        }
    }

    #[tokio::test]
    async fn test_share_roundtrip() {
        let spotify = Arc::new(MockProvider::with_track(Provider::Spotify, "A & B", "<C>"));
        let apple = Arc::new(MockProvider::empty(Provider::Apple));
        let youtube = Arc::new(MockProvider::empty(Provider::Youtube));
        let resolver = Arc::new(mock_service(&spotify, &apple, &youtube));
        let resolution = resolver
            .resolve_url("https://open.spotify.com/track/abc123")
            .await
            .unwrap();
        let router = create_router(AppContext { resolver });

        let uri = format!("/api/share/{}", resolution.short_id);
        let response = router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["track"]["canonicalKey"], "spotify:abc123");
        assert_eq!(json["track"]["shortUrl"], resolution.short_url);

        let uri = format!("/s/{}", resolution.short_id);
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<h1>A &amp; B</h1>"));
        assert!(html.contains("&lt;C&gt;"));
        assert!(html.contains("https://open.spotify.com/track/abc123"));
        assert!(html.contains("Search on Apple Music"));
    }

    #[tokio::test]
    async fn test_unknown_share_is_404() {
        let response = app()
            .oneshot(Request::get("/api/share/nope1234").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not found");

        let response = app()
            .oneshot(Request::get("/s/nope1234").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("Not found"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
