use std::sync::Arc;

use anyhow::Result;
use cmdisco_model::Author;

use super::{Command, InboundMessage, Router};

/// State of one dispatch, handed to checks, converters and the handler.
#[derive(Clone)]
pub struct Context(Arc<ContextInner>);

struct ContextInner {
    router: Router,
    message: InboundMessage,
    command: Option<Arc<Command>>,
}

impl Context {
    pub(crate) fn new(router: Router, message: InboundMessage, command: Option<Arc<Command>>) -> Self {
        Context(Arc::new(ContextInner {
            router,
            message,
            command,
        }))
    }

    pub fn router(&self) -> &Router {
        &self.0.router
    }

    pub fn message(&self) -> &InboundMessage {
        &self.0.message
    }

    pub fn author(&self) -> &Author {
        &self.0.message.author
    }

    /// The resolved command. `None` only while reporting an unknown command.
    pub fn command(&self) -> Option<&Arc<Command>> {
        self.0.command.as_ref()
    }

    /// Replies in the conversation the message came from.
    pub async fn send(&self, content: impl AsRef<str>) -> Result<()> {
        self.0.message.reply.send(content.as_ref()).await
    }
}
