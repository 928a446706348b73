// SPDX-License-Identifier: MIT

//! Nutrition assistant chat.

use crate::error::{AppError, Result};
use crate::SessionContext;

pub struct ChatService {
    ctx: SessionContext,
}

impl ChatService {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Send a message to the assistant and return its reply.
    pub async fn send(&self, message: &str) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("message is empty".to_string()));
        }
        let token = self.ctx.identity.fresh_token().await?;
        self.ctx.api.send_chat_message(&token, message).await
    }
}
