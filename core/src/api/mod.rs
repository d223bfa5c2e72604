//! Typed access to the PayStream API gateway

mod accounts;
mod api_client;
mod config;
mod customers;
mod error;
mod hooks;
mod http_sender;
mod responses;
mod retry;
mod rng_provider;
pub mod request_id;

#[cfg(test)]
mod mock_sender;
#[cfg(test)]
mod mock_rng_provider;
#[cfg(test)]
mod mock_gateway;

pub use accounts::AccountsApi;
pub use api_client::ApiClient;
pub use config::{ClientConfig, IdempotencyPolicy};
pub use customers::CustomersApi;
pub use error::{Error, ErrorKind};
pub use hooks::{MutationEvent, MutationHooks, QueryKey};
pub use http_sender::{DefaultSender, HttpSender};
pub use responses::{AccountBalanceDto, AccountDto, CreateAccountRequest, CreateCustomerRequest, CustomerDto};
pub use retry::RetryPolicy;
pub use rng_provider::RngProvider;
