// Seams for dependency injection - wallet actions are supplied by callers

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;

use crate::multi_transaction::errors::ActionError;

#[cfg(test)]
use mockall::automock;

/// An asynchronous unit of wallet work, such as signing and submitting a
/// listing transaction.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WalletAction: Send + Sync {
    /// Perform the operation with the parameter stored on the action
    async fn execute(&self, param: &Value) -> Result<(), ActionError>;
}

/// Adapter turning an async closure into a [`WalletAction`]
pub struct FnAction<F, Fut> {
    func: F,
    _future: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ActionError>> + Send,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _future: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut> WalletAction for FnAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ActionError>> + Send,
{
    async fn execute(&self, param: &Value) -> Result<(), ActionError> {
        (self.func)(param.clone()).await
    }
}
