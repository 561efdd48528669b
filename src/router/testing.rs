//! Doubles for the platform traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use cmdisco_model::{Author, UserId};

use super::{Context, InboundMessage, Reply, Router, UserDirectory};
use crate::config::RouterConfig;

pub const AUTHOR_ID: u64 = 100200300;

#[derive(Default)]
pub struct RecordingReply {
    sent: Mutex<Vec<String>>,
}

impl RecordingReply {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[serenity::async_trait]
impl Reply for RecordingReply {
    async fn send(&self, content: &str) -> Result<()> {
        self.sent.lock().unwrap().push(content.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct StubDirectory {
    pub owner: Option<UserId>,
    pub users: Vec<Author>,
    pub owner_lookups: Arc<AtomicUsize>,
}

#[serenity::async_trait]
impl UserDirectory for StubDirectory {
    async fn application_owner(&self) -> Result<UserId> {
        self.owner_lookups.fetch_add(1, Ordering::SeqCst);
        self.owner.ok_or_else(|| anyhow!("No application info"))
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<Author>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_by_name(&self, name: &str) -> Result<Option<Author>> {
        Ok(self.users.iter().find(|u| u.name == name).cloned())
    }
}

pub fn router(config: RouterConfig) -> Router {
    router_with(config, StubDirectory::default())
}

pub fn router_with(config: RouterConfig, directory: StubDirectory) -> Router {
    let _ = env_logger::builder().is_test(true).try_init();
    Router::builder(config, Arc::new(directory)).build().unwrap()
}

pub fn message(text: &str) -> (InboundMessage, Arc<RecordingReply>) {
    let reply = Arc::new(RecordingReply::default());
    let message = InboundMessage::new(text, Author::new(AUTHOR_ID, "tester"), reply.clone());
    (message, reply)
}

pub fn context(router: &Router) -> (Context, Arc<RecordingReply>) {
    let (message, reply) = message("");
    (Context::new(router.clone(), message, None), reply)
}
