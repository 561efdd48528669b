use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{format_err, Context as _, Result};
use cmdisco_model::{Author, UserId};
use log::{debug, trace};
use serenity::all::{Http, User};
use tokio::sync::Mutex;

use crate::router::UserDirectory;

/// Identity lookups against the Discord API. Lookups by name only know the
/// users that wrote something since the bot started.
pub struct SerenityDirectory {
    http: Arc<Http>,
    seen: Mutex<HashMap<String, Author>>,
}

impl SerenityDirectory {
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
            seen: Default::default(),
        }
    }

    pub async fn remember(&self, author: &Author) {
        let mut seen = self.seen.lock().await;
        if !seen.contains_key(&author.name) {
            trace!("Discord: first message from {author}");
            seen.insert(author.name.clone(), author.clone());
        }
    }
}

pub(crate) fn author(user: &User) -> Author {
    Author::new(user.id.get(), user.name.clone())
}

#[serenity::async_trait]
impl UserDirectory for SerenityDirectory {
    async fn application_owner(&self) -> Result<UserId> {
        let info = self
            .http
            .get_current_application_info()
            .await
            .context("get_current_application_info")?;
        let owner = info
            .owner
            .ok_or_else(|| format_err!("Application has no owner"))?;
        Ok(UserId::from(owner.id.get()))
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<Author>> {
        // serenity ids must be non-zero
        if id.get() == 0 {
            return Ok(None);
        }
        let user = self
            .http
            .get_user(serenity::all::UserId::new(id.get()))
            .await
            .inspect_err(|e| debug!("Discord: user {id} not found: {e}"))
            .ok();
        Ok(user.as_ref().map(author))
    }

    async fn user_by_name(&self, name: &str) -> Result<Option<Author>> {
        Ok(self.seen.lock().await.get(name).cloned())
    }
}
