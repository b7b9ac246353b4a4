//! Normalization hooks applied to every outcome an SDK component produces.
//!
//! Components hand their successful payloads to a [`ResultMapper`] and every failure,
//! including a failing [`ResultMapper`], to an [`ErrorMapper`]. Neither hook is
//! bypassed: components never recover, retry or suppress failures themselves.

use async_trait::async_trait;
use serde::Serialize;

use crate::Result;
use crate::error::Error;

/// Post-processes a successful payload before it reaches the caller.
#[async_trait]
pub trait ResultMapper: Send + Sync {
    async fn handle<T>(&self, payload: T) -> Result<T>
    where
        T: Serialize + Send + 'static;
}

/// Decides the final shape of a failure.
///
/// The return type is an [`Error`], so a mapper can rewrap or annotate a failure but
/// can never turn it into a success.
#[async_trait]
pub trait ErrorMapper: Send + Sync {
    async fn handle(&self, error: Error) -> Error;
}

/// Returns payloads and errors unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

#[async_trait]
impl ResultMapper for Passthrough {
    async fn handle<T>(&self, payload: T) -> Result<T>
    where
        T: Serialize + Send + 'static,
    {
        Ok(payload)
    }
}

#[async_trait]
impl ErrorMapper for Passthrough {
    async fn handle(&self, error: Error) -> Error {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = ?error.kind(), error = %error, "passing error through");

        error
    }
}

#[async_trait]
impl<M: ResultMapper + ?Sized> ResultMapper for std::sync::Arc<M> {
    async fn handle<T>(&self, payload: T) -> Result<T>
    where
        T: Serialize + Send + 'static,
    {
        (**self).handle(payload).await
    }
}

#[async_trait]
impl<M: ErrorMapper + ?Sized> ErrorMapper for std::sync::Arc<M> {
    async fn handle(&self, error: Error) -> Error {
        (**self).handle(error).await
    }
}
