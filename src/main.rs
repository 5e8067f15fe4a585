use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use snaptext::api::router::AppState;
use snaptext::api::server::start_server;
use snaptext::config::{self, Settings};
use snaptext::pipeline::correction::{ChatApiClient, Corrector};
use snaptext::pipeline::extraction::{ExtractionPipeline, OcrEngine, OcrSpaceClient};
use snaptext::session::SessionStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = Settings::from_env();

    let remote = Arc::new(OcrSpaceClient::new(
        &settings.ocr.endpoint,
        &settings.ocr.api_key,
        config::OCR_TIMEOUT_SECS,
    ));
    let pipeline = Arc::new(ExtractionPipeline::new(
        local_ocr_engine(&settings),
        remote,
        settings.ocr.language.clone(),
    ));

    let chat = ChatApiClient::new(
        &settings.chat.endpoint,
        settings.chat.api_key.clone(),
        &settings.chat.model,
        settings.chat.temperature,
        config::CHAT_TIMEOUT_SECS,
    );
    if !chat.has_credential() {
        tracing::warn!(
            "SNAPTEXT_CHAT_API_KEY not set — spell checking will report a configuration error"
        );
    }
    let corrector = Arc::new(Corrector::new(Arc::new(chat)));

    let state = AppState {
        pipeline,
        corrector,
        session: Arc::new(SessionStore::new()),
        max_upload_bytes: config::MAX_UPLOAD_BYTES,
    };

    let mut server = match start_server(state, settings.server.addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("failed to start server: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "open http://{} in your browser (Ctrl-C to stop)",
        server.session.server_addr
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
}

/// Build the local OCR engine if the feature is compiled in and language
/// data is installed. Returning `None` routes every extraction straight to
/// the remote service.
#[cfg(feature = "ocr")]
fn local_ocr_engine(settings: &Settings) -> Option<Box<dyn OcrEngine>> {
    use snaptext::pipeline::extraction::BundledTesseract;

    let dir = match settings.tessdata_dir() {
        Some(dir) => dir,
        None => {
            tracing::warn!("no tessdata directory found, OCR will use the remote service");
            return None;
        }
    };

    match BundledTesseract::new(&dir) {
        Ok(engine) => {
            tracing::info!(dir = %dir.display(), "local Tesseract engine ready");
            Some(Box::new(engine))
        }
        Err(e) => {
            tracing::warn!(error = %e, "local Tesseract unavailable, OCR will use the remote service");
            None
        }
    }
}

#[cfg(not(feature = "ocr"))]
fn local_ocr_engine(_settings: &Settings) -> Option<Box<dyn OcrEngine>> {
    tracing::info!("built without the `ocr` feature, OCR will use the remote service");
    None
}
