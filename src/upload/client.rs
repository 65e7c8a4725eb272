use super::error::{SubmitError, TransportError};
use super::types::{RawResponse, SelectedFile, UPLOAD_PATH};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;
use url::Url;

/// Performs the single upload request of a submission.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn post_file(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<RawResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    upload_url: Url,
}

impl HttpTransport {
    pub fn new(service_url: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: reqwest::Client::new(),
            upload_url: service_url.join(UPLOAD_PATH)?,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn post_file(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<RawResponse, TransportError> {
        let part = Part::bytes(content).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;

        // Any status code is handed on; the JSON body decides.
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}

/// Reads the selected file and sends it. No timeout and no retry.
pub async fn upload(
    transport: &dyn UploadTransport,
    file: &SelectedFile,
) -> Result<RawResponse, SubmitError> {
    let content = tokio::fs::read(file.path())
        .await
        .map_err(|source| SubmitError::ReadFile {
            path: file.path.clone(),
            source,
        })?;

    debug!(file = %file.name, bytes = content.len(), "sending upload request");
    let response = transport.post_file(&file.name, content).await?;
    debug!(
        status = response.status,
        bytes = response.body.len(),
        "upload response received"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Multipart, State},
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::io::Write;
    use std::sync::Arc;
    use tokio::{
        net::TcpListener,
        sync::{oneshot, Mutex},
    };

    #[derive(Debug)]
    struct ReceivedPart {
        name: String,
        file_name: Option<String>,
        bytes: Vec<u8>,
    }

    #[derive(Clone)]
    struct ServerState {
        tx: Arc<Mutex<Option<oneshot::Sender<Vec<ReceivedPart>>>>>,
        reply_status: StatusCode,
        reply: Value,
    }

    async fn handle_upload(
        State(state): State<ServerState>,
        mut multipart: Multipart,
    ) -> (StatusCode, Json<Value>) {
        let mut parts = Vec::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            parts.push(ReceivedPart {
                name,
                file_name,
                bytes,
            });
        }
        if let Some(tx) = state.tx.lock().await.take() {
            let _ = tx.send(parts);
        }
        (state.reply_status, Json(state.reply.clone()))
    }

    async fn spawn_upload_server(
        reply_status: StatusCode,
        reply: Value,
    ) -> (Url, oneshot::Receiver<Vec<ReceivedPart>>) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (tx, rx) = oneshot::channel();
        let state = ServerState {
            tx: Arc::new(Mutex::new(Some(tx))),
            reply_status,
            reply,
        };
        let app = Router::new()
            .route("/upload", post(handle_upload))
            .with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let url = Url::parse(&format!("http://{addr}/")).expect("url");
        (url, rx)
    }

    fn sketch_file(content: &[u8]) -> (tempfile::TempDir, SelectedFile) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("blink.ino");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(content).expect("write");
        (dir, SelectedFile::from_path(path))
    }

    #[test]
    fn upload_url_is_rooted_at_service() {
        let base = Url::parse("http://localhost:8000/app/index.html").unwrap();
        let transport = HttpTransport::new(&base).unwrap();
        assert_eq!(transport.upload_url().as_str(), "http://localhost:8000/upload");
    }

    #[tokio::test]
    async fn sends_single_file_part_with_original_name() {
        let (url, parts_rx) =
            spawn_upload_server(StatusCode::OK, json!({ "status": "success" })).await;
        let transport = HttpTransport::new(&url).expect("transport");
        let (_dir, file) = sketch_file(b"void setup() {}\nvoid loop() {}\n");

        let response = upload(&transport, &file).await.expect("upload");
        assert_eq!(response.status, 200);

        let parts = parts_rx.await.expect("parts");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "file");
        assert_eq!(parts[0].file_name.as_deref(), Some("blink.ino"));
        assert_eq!(parts[0].bytes, b"void setup() {}\nvoid loop() {}\n");
    }

    #[tokio::test]
    async fn error_status_still_returns_body() {
        let (url, _parts_rx) = spawn_upload_server(
            StatusCode::BAD_REQUEST,
            json!({ "status": "failed", "error": "No file uploaded" }),
        )
        .await;
        let transport = HttpTransport::new(&url).expect("transport");
        let (_dir, file) = sketch_file(b"");

        let response = upload(&transport, &file).await.expect("upload");
        assert_eq!(response.status, 400);
        let body: Value = serde_json::from_slice(&response.body).expect("json");
        assert_eq!(body["status"], "failed");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let url = Url::parse(&format!("http://{addr}/")).expect("url");
        let transport = HttpTransport::new(&url).expect("transport");
        let (_dir, file) = sketch_file(b"void setup() {}");

        let err = upload(&transport, &file).await.expect_err("must fail");
        assert!(matches!(err, SubmitError::Transport(_)), "unexpected: {err:?}");
    }

    #[tokio::test]
    async fn missing_file_is_reported_before_sending() {
        let (url, _parts_rx) =
            spawn_upload_server(StatusCode::OK, json!({ "status": "success" })).await;
        let transport = HttpTransport::new(&url).expect("transport");
        let file = SelectedFile::from_path("/nonexistent/dir/blink.ino");

        let err = upload(&transport, &file).await.expect_err("must fail");
        assert!(matches!(err, SubmitError::ReadFile { .. }));
        assert!(err.to_string().starts_with("Failed to read /nonexistent/dir/blink.ino"));
    }
}
