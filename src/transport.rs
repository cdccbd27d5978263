//! reqwestによる送信
//!
//! `send` はローカルタスクを起動してすぐ戻る。
//! `tokio::task::LocalSet` の中から呼び出すこと。

use std::path::PathBuf;

use imsteg_common::{
    Error, FieldValue, Payload, RawResponse, ReadyState, Result, StateCallback, SubmitRequest,
    Transport, TransportChain, TransportFactory,
};
use log::error;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};

/// CLI用のフォールバック列
pub fn http_chain(server_url: &str) -> TransportChain<PathBuf> {
    TransportChain::new().with(HttpFactory::new(server_url))
}

pub struct HttpFactory {
    client: Client,
    server_url: String,
}

impl HttpFactory {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            server_url: server_url.into(),
        }
    }
}

impl TransportFactory<PathBuf> for HttpFactory {
    fn name(&self) -> &str {
        "reqwest"
    }

    /// サーバーURLが解釈できなければ利用不可
    fn create(&self) -> Result<Box<dyn Transport<PathBuf>>> {
        let base = Url::parse(&self.server_url).map_err(|e| {
            Error::Transport(format!("invalid server URL {}: {}", self.server_url, e))
        })?;
        Ok(Box::new(HttpTransport {
            client: self.client.clone(),
            base,
        }))
    }
}

pub struct HttpTransport {
    client: Client,
    base: Url,
}

/// ペイロードをマルチパートへ詰める（ファイルはここで読み込む）
pub async fn build_form(payload: Payload<PathBuf>) -> crate::error::Result<Form> {
    let mut form = Form::new();
    for (name, value) in payload.into_fields() {
        form = match value {
            FieldValue::Text(text) => form.text(name, text),
            FieldValue::File(path) => {
                let bytes = tokio::fs::read(&path).await?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                form.part(name, Part::bytes(bytes).file_name(file_name))
            }
        };
    }
    Ok(form)
}

async fn post(
    client: Client,
    method: Method,
    url: Url,
    payload: Payload<PathBuf>,
    on_state: &mut StateCallback,
) -> crate::error::Result<RawResponse> {
    let form = build_form(payload).await?;
    let response = client.request(method, url).multipart(form).send().await?;

    // ヘッダー受信済み、本文受信中
    on_state(ReadyState::Loading);

    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(RawResponse { status, body })
}

/// 通信自体の失敗を、ステータス0とメッセージ付きの応答として扱う
fn failure_response(err: &crate::error::ImStegError) -> RawResponse {
    RawResponse {
        status: 0,
        body: serde_json::json!({ "message": err.to_string() }).to_string(),
    }
}

impl Transport<PathBuf> for HttpTransport {
    fn send(
        self: Box<Self>,
        request: SubmitRequest<PathBuf>,
        on_state: StateCallback,
    ) -> Result<()> {
        let url = self.base.join(request.path).map_err(|e| {
            Error::Transport(format!("invalid request path {}: {}", request.path, e))
        })?;
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| Error::Transport(format!("invalid method {}: {}", request.method, e)))?;
        let client = self.client;
        let payload = request.payload;

        let mut on_state = on_state;
        tokio::task::spawn_local(async move {
            let response = match post(client, method, url, payload, &mut on_state).await {
                Ok(response) => response,
                Err(err) => {
                    error!("request failed: {}", err);
                    failure_response(&err)
                }
            };
            on_state(ReadyState::Done(response));
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImStegError;

    #[test]
    fn test_invalid_server_url_is_unavailable() {
        let chain = http_chain("not a url");
        let result = chain.acquire();
        assert!(matches!(result, Err(Error::TransportUnavailable(tried)) if tried == "reqwest"));
    }

    #[test]
    fn test_valid_server_url_is_available() {
        assert!(http_chain("http://localhost:8888").acquire().is_ok());
    }

    #[test]
    fn test_failure_response_carries_message() {
        let err = ImStegError::FileNotFound("cat.png".to_string());
        let response = failure_response(&err);
        assert_eq!(response.status, 0);
        assert_eq!(
            imsteg_common::parse_message(&response.body).unwrap(),
            "File not found: cat.png"
        );
    }
}
