use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::{memory::MemoryUsers, AuthService};
use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::pordego::{self, AppState};
use crate::token::TokenCodec;

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server { port, users } => {
            let store = Arc::new(
                MemoryUsers::from_path(&users).context("Failed to load user seed file")?,
            );

            let codec = Arc::new(TokenCodec::new(
                &globals.secret,
                &globals.issuer,
                globals.token_lifetime_ms,
            ));

            let auth = AuthService::new(store.clone(), store, codec.clone());

            pordego::new(port, Arc::new(AppState { auth, codec })).await?;
        }
    }

    Ok(())
}
