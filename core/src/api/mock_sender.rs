use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use reqwest::{Request, RequestBuilder, Response};
use crate::api::http_sender::HttpSender;

// Thread-safe mock that replays scripted responses and captures requests for inspection
pub(super) struct MockSender {
    pub responses: Arc<Mutex<Vec<Response>>>,
    pub captured_requests: Arc<Mutex<Vec<Request>>>,
}

impl MockSender {
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_captured_requests(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.captured_requests.lock().unwrap()
    }
}

#[async_trait]
impl HttpSender for MockSender {
    async fn send(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        // Building surfaces the same errors the real transport would, e.g. a malformed URL
        let built_request = request.build()?;
        self.captured_requests.lock().unwrap().push(built_request.try_clone().unwrap());

        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "MockSender ran out of scripted responses");
        Ok(responses.remove(0))
    }
}
