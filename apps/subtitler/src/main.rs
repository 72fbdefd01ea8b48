use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body, extract::MatchedPath, http::Request};
use tower::ServiceBuilder;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing_subscriber::prelude::*;

use hypr_audio_extract::FfmpegExtractor;
use hypr_diarization::PyannoteClient;
use hypr_transcription::WhisperApiClient;

use subtitler::{AppState, Pipeline, env, router};

fn app(diarization_token: &str) -> Router {
    let env = env();

    let extractor = FfmpegExtractor::new(&env.ffmpeg_path);

    let mut transcriber = WhisperApiClient::builder()
        .api_base(&env.whisper_api_base)
        .model(&env.whisper_model);
    if let Some(key) = &env.whisper_api_key {
        transcriber = transcriber.api_key(key);
    }

    let diarizer = PyannoteClient::new(&env.diarization_api_base, diarization_token);

    let pipeline = Pipeline::new(
        Arc::new(extractor),
        Arc::new(transcriber.build()),
        Arc::new(diarizer),
        env.upload_dir(),
    );

    router(AppState::new(pipeline, env.max_upload_bytes)).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let path = request.uri().path();

                    if path == "/health" {
                        return tracing::Span::none();
                    }

                    let method = request.method();
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(path);

                    tracing::info_span!(
                        "http_request",
                        method = %method,
                        http.route = %matched_path,
                        otel.name = %format!("{} {}", method, matched_path),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &tracing::Span| {
                    if request.uri().path() == "/health" {
                        return;
                    }
                    tracing::info!(
                        method = %request.method(),
                        path = %request.uri().path(),
                        "http_request_started"
                    );
                })
                .on_response(
                    |response: &axum::http::Response<Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        if span.is_disabled() {
                            return;
                        }
                        tracing::info!(
                            parent: span,
                            http_status = %response.status().as_u16(),
                            latency_ms = %latency.as_millis(),
                            "http_request_finished"
                        );
                    },
                )
                .on_failure(
                    |failure_class: ServerErrorsFailureClass,
                     latency: Duration,
                     span: &tracing::Span| {
                        if span.is_disabled() {
                            return;
                        }
                        tracing::error!(
                            parent: span,
                            failure_class = ?failure_class,
                            latency_ms = %latency.as_millis(),
                            "http_request_failed"
                        );
                    },
                ),
        ),
    )
}

fn main() -> std::io::Result<()> {
    let env = env();

    let _guard = sentry::init(sentry::ClientOptions {
        dsn: env.sentry_dsn.as_ref().and_then(|s| s.parse().ok()),
        release: option_env!("APP_VERSION").map(|v| format!("subtitler@{}", v).into()),
        environment: Some(
            if cfg!(debug_assertions) {
                "development"
            } else {
                "production"
            }
            .into(),
        ),
        traces_sample_rate: 1.0,
        attach_stacktrace: true,
        ..Default::default()
    });

    sentry::configure_scope(|scope| {
        scope.set_tag("service", "subtitler");
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(sentry::integrations::tracing::layer())
        .init();

    let Some(token) = env.huggingface_token.as_deref() else {
        tracing::error!("huggingface_token_missing");
        return Err(std::io::Error::other(
            "HUGGINGFACE_TOKEN must be set for speaker diarization",
        ));
    };

    std::fs::create_dir_all(env.upload_dir())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let ip = env
                .host
                .parse()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
            let addr = SocketAddr::new(ip, env.port);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(addr = %addr, "server_listening");

            axum::serve(listener, app(token))
                .with_graceful_shutdown(shutdown_signal())
                .await
        })?;

    if let Some(client) = sentry::Hub::current().client() {
        client.close(Some(Duration::from_secs(2)));
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown_signal_received");
}
