//! # PayStream Core
//!
//! This crate provides the client side of the PayStream banking gateway: an HTTP client
//! that tags every request with correlation and idempotency identifiers, a typed error
//! taxonomy for non-success responses, and the customer and account operations built on it.

mod api;
mod money;

pub use api::{
    AccountBalanceDto, AccountDto, AccountsApi, ApiClient, ClientConfig, CreateAccountRequest,
    CreateCustomerRequest, CustomerDto, CustomersApi, DefaultSender, Error, ErrorKind,
    HttpSender, IdempotencyPolicy, MutationEvent, MutationHooks, QueryKey, RetryPolicy,
    RngProvider, request_id,
};
pub use money::Money;
