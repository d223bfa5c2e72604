use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Method, Request, RequestBuilder, Response};
use serde_json::{json, Value};
use crate::api::http_sender::HttpSender;
use crate::api::test_utils::{create_empty_response, create_json_response, create_response};

#[derive(Default)]
struct GatewayState {
    customers: BTreeMap<String, Value>,
    accounts: BTreeMap<String, (String, Value)>,
    balances: BTreeMap<String, Value>,
    next_id: u32,
}

// In-memory stand-in for the gateway, routing on method and path like the real one
pub(super) struct MockGateway {
    state: Arc<Mutex<GatewayState>>,
    pub captured_requests: Arc<Mutex<Vec<Request>>>,
    unauthenticated: Arc<Mutex<Option<StatusCode>>>,
    // Failures returned before routing, one per request
    queued_failures: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(GatewayState { next_id: 1, ..Default::default() })),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
            unauthenticated: Arc::new(Mutex::new(None)),
            queued_failures: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn get_captured_requests(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.captured_requests.lock().unwrap()
    }

    // Rejects every request with the given status until cleared
    pub fn set_unauthenticated(&self, status: Option<StatusCode>) {
        *self.unauthenticated.lock().unwrap() = status;
    }

    pub fn queue_failure(&self, status: StatusCode, body: &str) {
        self.queued_failures.lock().unwrap().push_back((status, body.to_string()));
    }

    pub fn set_balance(&self, account_id: &str, balance_minor: i64) {
        let mut state = self.state.lock().unwrap();
        let balance = state.balances.get_mut(account_id).expect("unknown account");
        balance["balance_minor"] = json!(balance_minor);
    }

    fn route(&self, method: &Method, path: &str, body: Option<Value>) -> Response {
        let segments: Vec<String> = path
            .trim_start_matches("/api/")
            .split('/')
            .map(|segment| urlencoding::decode(segment).unwrap().into_owned())
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let mut state = self.state.lock().unwrap();

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["v1", "customers"]) => {
                let body = body.unwrap_or(Value::Null);
                let mut field_errors = serde_json::Map::new();
                for field in ["name", "email"] {
                    if body[field].as_str().unwrap_or_default().is_empty() {
                        field_errors.insert(field.to_string(), json!("Required"));
                    }
                }
                if !field_errors.is_empty() {
                    return create_json_response(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        &json!({ "fieldErrors": field_errors }),
                    );
                }

                let id = format!("cust-{}", state.next_id);
                state.next_id += 1;
                let customer = json!({ "id": id, "name": body["name"], "email": body["email"] });
                state.customers.insert(id, customer.clone());
                create_json_response(StatusCode::CREATED, &customer)
            }
            ("GET", ["v1", "customers", id]) => match state.customers.get(*id) {
                Some(customer) => create_json_response(StatusCode::OK, customer),
                None => create_json_response(
                    StatusCode::NOT_FOUND,
                    &json!({ "message": format!("Customer {} not found", id) }),
                ),
            },
            ("POST", ["v1", "customers", customer_id, "accounts"]) => {
                let currency = body
                    .as_ref()
                    .and_then(|b| b["currency"].as_str())
                    .unwrap_or_default()
                    .to_string();
                if currency.is_empty() {
                    return create_json_response(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        &json!({ "errors": { "currency": "Required" } }),
                    );
                }

                let id = format!("acc-{}", state.next_id);
                state.next_id += 1;
                let account = json!({ "id": id, "currency": currency.to_uppercase(), "status": "ACTIVE" });
                state.accounts.insert(id.clone(), (customer_id.to_string(), account.clone()));
                state.balances.insert(
                    id.clone(),
                    json!({
                        "account_id": id,
                        "balance_minor": 0,
                        "as_of_ledger_offset": 0,
                        "updated_at": "2025-01-01T00:00:00Z"
                    }),
                );
                create_json_response(StatusCode::OK, &account)
            }
            ("GET", ["v1", "customers", customer_id, "accounts"]) => {
                let accounts: Vec<Value> = state
                    .accounts
                    .values()
                    .filter(|(owner, _)| owner.as_str() == *customer_id)
                    .map(|(_, account)| account.clone())
                    .collect();
                create_json_response(StatusCode::OK, &Value::Array(accounts))
            }
            ("GET", ["v1", "accounts", id]) => match state.accounts.get(*id) {
                Some((_, account)) => create_json_response(StatusCode::OK, account),
                None => create_empty_response(StatusCode::NOT_FOUND),
            },
            ("GET", ["v1", "accounts", id, "balance"]) => match state.balances.get(*id) {
                Some(balance) => create_json_response(StatusCode::OK, balance),
                None => create_empty_response(StatusCode::NOT_FOUND),
            },
            _ => panic!("Unexpected request: {} {}", method, path),
        }
    }
}

#[async_trait]
impl HttpSender for MockGateway {
    async fn send(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        let built_request = request.build()?;
        self.captured_requests.lock().unwrap().push(built_request.try_clone().unwrap());

        if let Some(status) = *self.unauthenticated.lock().unwrap() {
            return Ok(create_json_response(status, &json!({ "message": "Unauthorized" })));
        }
        if let Some((status, body)) = self.queued_failures.lock().unwrap().pop_front() {
            return Ok(create_response(status, &body));
        }

        let body = built_request
            .body()
            .and_then(|body| body.as_bytes())
            .map(|bytes| serde_json::from_slice(bytes).unwrap());

        Ok(self.route(built_request.method(), built_request.url().path(), body))
    }
}
