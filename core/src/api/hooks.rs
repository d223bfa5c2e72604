use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::api::responses::{AccountDto, CustomerDto};

/// Cached read a caller may hold, named by the resource it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Customer(String),
    Account(String),
    AccountBalance(String),
    CustomerAccounts(String),
}

/// A completed state change, delivered to every registered hook.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationEvent {
    CustomerCreated(CustomerDto),
    AccountCreated {
        customer_id: String,
        account: AccountDto,
    },
}

impl MutationEvent {
    /// Reads that no longer reflect the server after this change.
    pub fn invalidates(&self) -> Vec<QueryKey> {
        match self {
            MutationEvent::CustomerCreated(customer) => {
                vec![QueryKey::Customer(customer.id.clone())]
            }
            MutationEvent::AccountCreated {
                customer_id,
                account,
            } => vec![
                QueryKey::Account(account.id.clone()),
                QueryKey::AccountBalance(account.id.clone()),
                QueryKey::CustomerAccounts(customer_id.clone()),
            ],
        }
    }
}

type Hook = Box<dyn Fn(&MutationEvent) + Send + Sync>;

/// Callbacks run after each successful mutation, in registration order.
#[derive(Default)]
pub struct MutationHooks {
    hooks: RwLock<Vec<Hook>>,
}

impl MutationHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, hook: F)
    where
        F: Fn(&MutationEvent) + Send + Sync + 'static,
    {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn notify(&self, event: &MutationEvent) {
        let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
        log::debug!("Notifying {} mutation hook(s) of {:?}", hooks.len(), event);
        for hook in hooks.iter() {
            hook(event);
        }
    }
}

impl fmt::Debug for MutationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationHooks")
            .field("registered", &self.len())
            .finish()
    }
}
