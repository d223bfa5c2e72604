use crate::api::api_client::path_segment;
use crate::api::error::Error;
use crate::api::hooks::MutationEvent;
use crate::api::http_sender::HttpSender;
use crate::api::responses::{CreateCustomerRequest, CustomerDto};
use crate::api::rng_provider::RngProvider;
use crate::ApiClient;

/// Customer records on the gateway
#[async_trait::async_trait]
pub trait CustomersApi {
    async fn create_customer(&self, request: CreateCustomerRequest) -> Result<CustomerDto, Error>;
    async fn get_customer(&self, customer_id: &str) -> Result<CustomerDto, Error>;
}

#[async_trait::async_trait]
impl<S: HttpSender, R: RngProvider> CustomersApi for ApiClient<S, R> {
    async fn create_customer(&self, request: CreateCustomerRequest) -> Result<CustomerDto, Error> {
        let customer: CustomerDto = self
            .config
            .mutation_retry_policy()
            .run(|| self.post_json("/v1/customers", &request))
            .await?;

        self.hooks.notify(&MutationEvent::CustomerCreated(customer.clone()));
        Ok(customer)
    }

    async fn get_customer(&self, customer_id: &str) -> Result<CustomerDto, Error> {
        let path = format!("/v1/customers/{}", path_segment(customer_id, "customer_id")?);

        self.config
            .query_retry_policy()
            .run(|| self.get_json(&path))
            .await
    }
}
