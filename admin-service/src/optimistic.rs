//! Optimistic local updates.
//!
//! A `Tentative` is a change already applied to local state while the remote
//! call that confirms it is still in flight. It keeps whatever the mutation
//! returned so the change can be undone if that call fails.

use tokio::sync::RwLock;

use common::AppResult;

/// A local change awaiting confirmation.
#[must_use = "a tentative change must be committed, reverted or settled"]
pub struct Tentative<U> {
    undo: U,
}

impl<U> Tentative<U> {
    /// Applies `mutation` under the write lock and keeps its undo record.
    ///
    /// The lock is released before this returns, so the remote call runs
    /// without holding it.
    pub async fn apply<S>(state: &RwLock<S>, mutation: impl FnOnce(&mut S) -> U) -> Self {
        let mut guard = state.write().await;
        Self {
            undo: mutation(&mut guard),
        }
    }

    /// Undo record produced by the mutation.
    pub fn undo(&self) -> &U {
        &self.undo
    }

    /// Keeps the change.
    pub fn commit(self) -> U {
        self.undo
    }

    /// Rolls the change back with `rollback`.
    pub async fn revert<S>(self, state: &RwLock<S>, rollback: impl FnOnce(&mut S, U)) {
        let mut guard = state.write().await;
        rollback(&mut guard, self.undo);
    }

    /// Commits on `Ok`, reverts on `Err`, and passes the result through.
    pub async fn settle<S, T>(
        self,
        state: &RwLock<S>,
        result: AppResult<T>,
        rollback: impl FnOnce(&mut S, U),
    ) -> AppResult<T> {
        match result {
            Ok(value) => {
                self.commit();
                Ok(value)
            }
            Err(e) => {
                self.revert(state, rollback).await;
                Err(e)
            }
        }
    }
}
