//! Web UI: one form in, one comic out

use std::num::NonZeroU16;

use axum::Router;

use crate::config::AppConfig;
use crate::constants::{RECENT_COMICS_LIMIT, SCENARIO_MAX_CHARS};
use crate::pipeline;
use crate::staging;
use crate::style::{ALL_STYLES, Style};

mod artifacts;
mod prelude;
mod views;

use artifacts::artifact_handler;
use prelude::*;
use views::{HomeTemplate, ResultTemplate};

#[derive(Clone)]
pub(crate) struct AppState {
    config: Arc<AppConfig>,
    http: reqwest::Client,
    font: Arc<Vec<u8>>,
}

impl AppState {
    fn new(config: AppConfig, font_bytes: Vec<u8>) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            font: Arc::new(font_bytes),
        }
    }
}

async fn home_handler(State(state): State<AppState>) -> Result<HomeTemplate, ComicError> {
    let recent = staging::recent_artifacts(&state.config.output_dir, RECENT_COMICS_LIMIT)?;
    Ok(HomeTemplate {
        styles: ALL_STYLES.to_vec(),
        has_recent: !recent.is_empty(),
        recent,
    })
}

#[derive(Deserialize)]
pub(crate) struct GenerateForm {
    scenario: String,
    style: String,
}

async fn generate_handler(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<ResultTemplate, ComicError> {
    let scenario = form.scenario.trim().to_string();
    if scenario.is_empty() {
        return Err(ComicError::BadRequest(
            "scenario must not be empty".to_string(),
        ));
    }
    if scenario.chars().count() > SCENARIO_MAX_CHARS {
        return Err(ComicError::BadRequest(format!(
            "scenario longer than {SCENARIO_MAX_CHARS} characters"
        )));
    }
    let style = Style::parse(&form.style)
        .ok_or_else(|| ComicError::BadRequest(format!("unknown style: {}", form.style)))?;

    info!(
        "Generating a {style} comic from a {}-character scenario",
        scenario.chars().count()
    );
    let artifact = pipeline::generate_comic(
        &state.http,
        &state.config,
        &state.font,
        &scenario,
        style,
    )
    .await?;

    let title = if artifact.story.title.is_empty() {
        "Your comic".to_string()
    } else {
        artifact.story.title.clone()
    };

    Ok(ResultTemplate {
        title,
        style_label: style.label().to_string(),
        artifact_url: format!("/comics/{}", artifact.file_name),
        file_name: artifact.file_name.clone(),
        has_moral: !artifact.story.moral.is_empty(),
        moral: artifact.story.moral.clone(),
        panels: artifact.panels,
    })
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(home_handler))
        .route("/generate", axum::routing::post(generate_handler))
        .route("/comics/{file_name}", axum::routing::get(artifact_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
}

/// Binds the listener and serves the app until it exits.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    config: AppConfig,
    font_bytes: Vec<u8>,
) -> Result<(), anyhow::Error> {
    let app = create_router().with_state(AppState::new(config, font_bytes));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use axum::http::header::{ETAG, IF_NONE_MATCH};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup_state() -> (AppState, TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            text_api_key: "sk-text".to_string(),
            image_api_key: "sk-image".to_string(),
            text_model: "test-text-model".to_string(),
            image_model: "test-image-model".to_string(),
            text_api_base: "http://127.0.0.1:9".to_string(),
            image_api_base: "http://127.0.0.1:9".to_string(),
            output_dir: dir.path().join("comics"),
            work_dir: dir.path().join("work"),
            caption_font: dir.path().join("font.ttf"),
        };
        (AppState::new(config, Vec::new()), dir)
    }

    async fn read_body(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[tokio::test]
    async fn home_page_renders_form_and_styles() {
        let (state, _dir) = setup_state();
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_body(response).await;
        assert!(body.contains("name=\"scenario\""));
        assert!(body.contains("Manga"));
        assert!(body.contains("Belgian"));
    }

    #[tokio::test]
    async fn home_page_lists_recent_comics() {
        let (state, _dir) = setup_state();
        let output_dir = state.config.output_dir.clone();
        std::fs::create_dir_all(&output_dir).expect("mkdir");
        std::fs::write(output_dir.join("a-cat-anime.png"), b"png").expect("write");
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = read_body(response).await;
        assert!(body.contains("a-cat-anime.png"));
    }

    #[tokio::test]
    async fn generate_rejects_empty_scenario() {
        let (state, _dir) = setup_state();
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("scenario=++&style=Anime"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generate_rejects_unknown_style() {
        let (state, _dir) = setup_state();
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("scenario=a+cat+in+space&style=Watercolour"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_body(response).await;
        assert!(body.contains("unknown style"));
    }

    #[tokio::test]
    async fn missing_artifact_is_404() {
        let (state, _dir) = setup_state();
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/comics/nope.png")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn artifact_names_outside_the_output_dir_are_rejected() {
        let (state, _dir) = setup_state();
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/comics/secret..png")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn artifacts_are_served_with_cache_validators() {
        let (state, _dir) = setup_state();
        let output_dir = state.config.output_dir.clone();
        std::fs::create_dir_all(&output_dir).expect("mkdir");
        std::fs::write(output_dir.join("strip.png"), b"fake png bytes").expect("write");
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/comics/strip.png")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "image/png"
        );
        let etag = response.headers().get(ETAG).expect("etag").clone();

        let request = Request::builder()
            .method("GET")
            .uri("/comics/strip.png")
            .header(IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        let body = read_body(response).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn stylesheet_is_served_inline() {
        let (state, _dir) = setup_state();
        let app = create_router().with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/static/styles.css")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/css");
    }
}
