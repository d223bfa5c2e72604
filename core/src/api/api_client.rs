use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};

use rand::rngs::OsRng;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::Error;
use crate::api::config::ClientConfig;
use crate::api::hooks::MutationHooks;
use crate::api::http_sender::{DefaultSender, HttpSender};
use crate::api::request_id::{self, CORRELATION_ID_HEADER, IDEMPOTENCY_KEY_HEADER};
use crate::api::rng_provider::RngProvider;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the PayStream API gateway.
///
/// Every request gets a fresh `x-correlation-id`; methods selected by the configured
/// [`IdempotencyPolicy`](crate::api::IdempotencyPolicy) also get a fresh `idempotency-key`.
/// Bodies come back as parsed JSON, or as a JSON string when they are not valid JSON, and
/// non-success statuses are turned into [`Error`] values. The client holds no per-call state,
/// so one instance can serve any number of concurrent requests.
pub struct ApiClient<S: HttpSender = DefaultSender, R: RngProvider = OsRng> {
    pub(super) client: Client,
    pub(super) sender: S,
    pub(super) rng: Mutex<R>,
    pub(super) config: ClientConfig,
    pub(super) hooks: MutationHooks,
}

impl ApiClient<DefaultSender, OsRng> {
    pub fn new(config: ClientConfig) -> ApiClient<DefaultSender, OsRng> {
        Self::with_dependencies(config, DefaultSender, OsRng)
    }
}

impl<S: HttpSender, R: RngProvider> ApiClient<S, R> {
    pub fn with_dependencies(config: ClientConfig, sender: S, rng: R) -> ApiClient<S, R> {
        Self {
            client: Client::new(),
            sender,
            rng: Mutex::new(rng),
            config,
            hooks: MutationHooks::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Callbacks run after successful creates.
    pub fn hooks(&self) -> &MutationHooks {
        &self.hooks
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>, Error> {
        let request = self.prepare(Method::GET, path);
        self.execute(request).await
    }

    pub async fn post<B>(&self, path: &str, payload: &B) -> Result<Option<Value>, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let json = serde_json::to_vec(payload).map_err(Error::Serialization)?;
        let request = self
            .prepare(Method::POST, path)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(json);
        self.execute(request).await
    }

    pub async fn put<B>(&self, path: &str, payload: &B) -> Result<Option<Value>, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let json = serde_json::to_vec(payload).map_err(Error::Serialization)?;
        let request = self
            .prepare(Method::PUT, path)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(json);
        self.execute(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>, Error> {
        let request = self.prepare(Method::DELETE, path);
        self.execute(request).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        decode(self.get(path).await?)
    }

    pub async fn post_json<T, B>(&self, path: &str, payload: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        decode(self.post(path, payload).await?)
    }

    pub async fn put_json<T, B>(&self, path: &str, payload: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        decode(self.put(path, payload).await?)
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        decode(self.delete(path).await?)
    }

    pub(super) fn next_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        request_id::generate(&mut *rng)
    }

    pub(super) fn prepare(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url_for(path);
        let correlation_id = self.next_id();
        log::debug!("{} {} ({}: {})", method, url, CORRELATION_ID_HEADER, correlation_id);

        let idempotent = self.config.idempotency.applies_to(&method);
        let request = self
            .client
            .request(method, &url)
            .header(CORRELATION_ID_HEADER, correlation_id);

        if idempotent {
            request.header(IDEMPOTENCY_KEY_HEADER, self.next_id())
        } else {
            request
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Option<Value>, Error> {
        let response = self.sender.send(request).await?;
        handle_response(response).await
    }
}

/// Reads the whole body and either returns it or classifies the failure.
pub(super) async fn handle_response(response: Response) -> Result<Option<Value>, Error> {
    let status = response.status();
    let text = response.text().await?;
    let data = parse_body(&text);

    if status.is_success() {
        return Ok(data);
    }

    let error = classify(status, data);
    log::debug!("Request failed with status {}: {}", status.as_u16(), error);
    Err(error)
}

pub(super) fn parse_body(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

pub(super) fn classify(status: StatusCode, data: Option<Value>) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::auth("Unauthorized or forbidden", Some(status.as_u16()), data)
        }
        StatusCode::UNPROCESSABLE_ENTITY => Error::validation("Validation failed", data),
        _ => {
            let message = error_message(data.as_ref())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            Error::api(message, Some(status.as_u16()), data)
        }
    }
}

fn error_message(data: Option<&Value>) -> Option<String> {
    match data? {
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string),
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

fn decode<T: DeserializeOwned>(data: Option<Value>) -> Result<T, Error> {
    serde_json::from_value(data.unwrap_or(Value::Null)).map_err(Error::Deserialization)
}

/// Percent-encodes an identifier for use as a single path segment.
pub(super) fn path_segment<'a>(value: &'a str, name: &'static str) -> Result<Cow<'a, str>, Error> {
    if value.trim().is_empty() {
        return Err(Error::MissingParameter(name));
    }
    Ok(urlencoding::encode(value))
}
