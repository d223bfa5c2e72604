use crate::api::api_client::path_segment;
use crate::api::error::Error;
use crate::api::hooks::MutationEvent;
use crate::api::http_sender::HttpSender;
use crate::api::responses::{AccountBalanceDto, AccountDto, CreateAccountBody, CreateAccountRequest};
use crate::api::rng_provider::RngProvider;
use crate::ApiClient;

/// Accounts and their balances on the gateway
#[async_trait::async_trait]
pub trait AccountsApi {
    async fn create_account(&self, request: CreateAccountRequest) -> Result<AccountDto, Error>;
    async fn get_account(&self, account_id: &str) -> Result<AccountDto, Error>;
    async fn get_account_balance(&self, account_id: &str) -> Result<AccountBalanceDto, Error>;

    /// Only served by gateways with the `list_accounts` capability enabled.
    async fn list_accounts(&self, customer_id: &str) -> Result<Vec<AccountDto>, Error>;
}

#[async_trait::async_trait]
impl<S: HttpSender, R: RngProvider> AccountsApi for ApiClient<S, R> {
    async fn create_account(&self, request: CreateAccountRequest) -> Result<AccountDto, Error> {
        let path = format!(
            "/v1/customers/{}/accounts",
            path_segment(&request.customer_id, "customer_id")?
        );
        let body = CreateAccountBody {
            currency: &request.currency,
        };

        let account: AccountDto = self
            .config
            .mutation_retry_policy()
            .run(|| self.post_json(&path, &body))
            .await?;

        self.hooks.notify(&MutationEvent::AccountCreated {
            customer_id: request.customer_id.clone(),
            account: account.clone(),
        });
        Ok(account)
    }

    async fn get_account(&self, account_id: &str) -> Result<AccountDto, Error> {
        let path = format!("/v1/accounts/{}", path_segment(account_id, "account_id")?);

        self.config
            .query_retry_policy()
            .run(|| self.get_json(&path))
            .await
    }

    async fn get_account_balance(&self, account_id: &str) -> Result<AccountBalanceDto, Error> {
        let path = format!("/v1/accounts/{}/balance", path_segment(account_id, "account_id")?);

        self.config
            .query_retry_policy()
            .run(|| self.get_json(&path))
            .await
    }

    async fn list_accounts(&self, customer_id: &str) -> Result<Vec<AccountDto>, Error> {
        if !self.config.list_accounts {
            return Err(Error::Unsupported("Listing accounts by customer"));
        }
        let path = format!(
            "/v1/customers/{}/accounts",
            path_segment(customer_id, "customer_id")?
        );

        self.config
            .query_retry_policy()
            .run(|| self.get_json(&path))
            .await
    }
}
