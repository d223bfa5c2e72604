use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDto {
    pub id: String,
    pub currency: String,
    /// e.g. `ACTIVE`, `BLOCKED`, `CLOSED`
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountRequest {
    pub customer_id: String,
    pub currency: String,
}

// Only the currency travels in the body; the customer id is a path segment.
#[derive(Serialize)]
pub(super) struct CreateAccountBody<'a> {
    pub currency: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalanceDto {
    #[serde(alias = "accountId")]
    pub account_id: String,
    #[serde(default, alias = "currentBalance", alias = "balanceMinor")]
    pub balance_minor: Option<i64>,
    #[serde(default, alias = "asOfLedgerOffset")]
    pub as_of_ledger_offset: Option<i64>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

impl AccountBalanceDto {
    /// Balance in `currency`, treating a missing amount as zero.
    pub fn money(&self, currency: &str) -> Money {
        Money::new(self.balance_minor.unwrap_or(0), currency)
    }
}
