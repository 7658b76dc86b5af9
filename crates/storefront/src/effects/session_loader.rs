use crate::actions::AppAction;
use crate::model::User;
use crate::state::AppState;
use async_trait::async_trait;
use std::time::Duration;
use store_framework::{Effect, StoreClient, StoreError};
use tracing::info;

/// Simulated session fetch: installs `user` once the delay is up.
#[derive(Debug, Clone)]
pub struct SessionLoader {
    user: User,
    delay: Duration,
}

impl SessionLoader {
    pub fn new(user: User, delay: Duration) -> Self {
        Self { user, delay }
    }
}

#[async_trait]
impl Effect<AppState> for SessionLoader {
    fn name(&self) -> &'static str {
        "session_loader"
    }

    fn delay(&self) -> Duration {
        self.delay
    }

    async fn on_fire(&mut self, store: &StoreClient<AppState>) -> Result<(), StoreError> {
        store.dispatch(AppAction::set_user(self.user.clone())).await?;
        info!(user_id = %self.user.id, "Session loaded");
        Ok(())
    }
}
