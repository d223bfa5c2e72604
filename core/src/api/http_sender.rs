use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};

/// Sends a prepared request. Tests swap this out to capture requests and script responses.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, reqwest::Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSender;

#[async_trait]
impl HttpSender for DefaultSender {
    async fn send(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        request.send().await
    }
}
