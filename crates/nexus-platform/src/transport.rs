//! HTTP transport for the chat backend.
//!
//! Uses browser `fetch()` via gloo-net. Every request carries credentials
//! so the backend can tie it to its session cookie. No retries.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use js_sys::{Array, Uint8Array};
use serde::de::DeserializeOwned;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

use nexus_core::history::HistoryEntry;
use nexus_core::ports::{ChatReply, SendRequest, TransportPort};
use nexus_core::upload::validate_upload;
use nexus_types::{
    ChatError, Result,
    config::ApiConfig,
    upload::{FileUpload, UploadLimits, UploadedFileRef},
};

use crate::describe_js;
use crate::wire::{
    ChatBody, ChatResponse, ClearBody, ErrorBody, HistoryResponse, NewSessionResponse,
    UploadResponse, backend_error, decode_chat, decode_history, decode_upload,
};

pub struct HttpTransport {
    api: ApiConfig,
    limits: UploadLimits,
}

impl HttpTransport {
    pub fn new(api: ApiConfig, limits: UploadLimits) -> Self {
        Self { api, limits }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.with_credentials(Request::get(&self.api.endpoint(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.with_credentials(Request::post(&self.api.endpoint(path)))
    }

    fn with_credentials(&self, builder: RequestBuilder) -> RequestBuilder {
        if self.api.include_credentials {
            builder.credentials(RequestCredentials::Include)
        } else {
            builder
        }
    }
}

#[async_trait(?Send)]
impl TransportPort for HttpTransport {
    async fn create_session(&self) -> Result<String> {
        let response = self
            .post("/new-session")
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let data: NewSessionResponse = read_json(response).await?;
        Ok(data.session_id)
    }

    async fn send_message(&self, req: SendRequest) -> Result<ChatReply> {
        let body = ChatBody {
            message: &req.message,
            session_id: req.session_id.as_deref(),
            file_content: req.file_content.as_deref(),
        };

        let response = self
            .post("/chat")
            .json(&body)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let data: ChatResponse = read_json(response).await?;
        Ok(decode_chat(data))
    }

    async fn clear_session(&self, session_id: &str) -> Result<()> {
        let response = self
            .post("/clear-session")
            .json(&ClearBody { session_id })
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        ensure_ok(response).await.map(|_| ())
    }

    async fn upload_file(
        &self,
        file: &FileUpload,
        session_id: Option<&str>,
    ) -> Result<UploadedFileRef> {
        validate_upload(file, &self.limits)?;
        log::debug!(
            "Uploading {} ({} bytes, session: {:?})",
            file.filename,
            file.size(),
            session_id
        );

        // Content-Type is left to the browser so it can set the multipart boundary
        let form = multipart(file, session_id)?;
        let response = self
            .post("/files/upload")
            .body(form)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let data: UploadResponse = read_json(response).await?;
        decode_upload(status, data, file, session_id)
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>> {
        let response = self
            .get("/history")
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let data: HistoryResponse = read_json(response).await?;
        decode_history(status, data)
    }
}

// ─── Helpers ─────────────────────────────────────────────────

/// Pass 2xx responses through; turn anything else into `Backend`,
/// preferring the body's `error` field as the message.
async fn ensure_ok(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let url = response.url();
    let body = response.json::<ErrorBody>().await.ok();
    let err = backend_error(status, body);
    log::warn!("{} failed: {}", url, err);
    Err(err)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = ensure_ok(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ChatError::Serialization(e.to_string()))
}

fn multipart(file: &FileUpload, session_id: Option<&str>) -> Result<FormData> {
    let js = |e| ChatError::JsInterop(describe_js(e));

    let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js)?;

    let form = FormData::new().map_err(js)?;
    form.append_with_blob_and_filename("file", &blob, &file.filename)
        .map_err(js)?;
    if let Some(id) = session_id {
        form.append_with_str("session_id", id).map_err(js)?;
    }
    Ok(form)
}
