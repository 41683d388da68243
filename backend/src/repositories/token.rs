//! Token accessor

use super::{BackgroundWrites, RepoResult, TokenStore};
use crate::config::WriteMode;
use crate::db::with_timeout;
use std::sync::Arc;
use std::time::Duration;
use tasklist_shared::AccessToken;

/// Token repository, one record per user
#[derive(Clone)]
pub struct TokenRepository {
    store: Arc<dyn TokenStore>,
    timeout: Duration,
    mode: WriteMode,
    writes: BackgroundWrites,
}

impl TokenRepository {
    pub fn new(
        store: Arc<dyn TokenStore>,
        timeout: Duration,
        mode: WriteMode,
        writes: BackgroundWrites,
    ) -> Self {
        Self {
            store,
            timeout,
            mode,
            writes,
        }
    }

    /// Insert or replace the token for `token.user_id`
    pub async fn upsert(&self, token: AccessToken) -> RepoResult<()> {
        let store = Arc::clone(&self.store);
        let limit = self.timeout;
        self.writes
            .dispatch(self.mode, "token.upsert", async move {
                with_timeout(limit, store.upsert_token(&token)).await
            })
            .await
    }

    pub async fn read_by_user_id(&self, user_id: &str) -> RepoResult<Option<AccessToken>> {
        with_timeout(self.timeout, self.store.token_for_user(user_id)).await
    }
}
