use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use cmdisco_model::ConfigError;
use cmdparse::{Missing, Shape, ShapeError};
use futures_util::future::BoxFuture;
use futures_util::FutureExt as _;
use log::{debug, error};

use super::converter::convert_all;
use super::{Args, Argument, Check, Context, Outcome};
use crate::utils::ResultExt as _;

type HandlerFn = dyn Fn(Context, Args) -> BoxFuture<'static, Result<()>> + Send + Sync;

pub struct Command {
    name: String,
    aliases: Vec<String>,
    category: Option<String>,
    help: Option<String>,
    hidden: bool,
    args: Vec<Argument>,
    checks: Vec<Check>,
    shape: Shape,
    handler: Arc<HandlerFn>,
}

/// Optional parts of a command. Defaults: no aliases, the registry's default
/// category, no help text, visible, no arguments, no checks.
pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    category: Option<String>,
    help: Option<String>,
    hidden: bool,
    args: Vec<Argument>,
    checks: Vec<Check>,
    handler: Option<Arc<HandlerFn>>,
}

impl CommandBuilder {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if alias != self.name && !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
        self
    }

    pub fn aliases<I, S>(self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        aliases
            .into_iter()
            .fold(self, |builder, alias| builder.alias(alias))
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn arg(mut self, argument: Argument) -> Self {
        self.args.push(argument);
        self
    }

    pub fn args(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.args.extend(arguments);
        self
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn handler<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Context, Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handler = Some(Arc::new(move |ctx: Context, args: Args| f(ctx, args).boxed()));
        self
    }

    /// Validates the argument list and produces the command.
    pub fn build(self) -> Result<Command, ConfigError> {
        let shape = Shape::new(self.args.iter().map(Argument::slot)).map_err(|e| {
            let (index, combined) = match e {
                ShapeError::CombinedNotLast(i) => (i, true),
                ShapeError::RequiredAfterOptional(i) => (i, false),
            };
            let command = self.name.clone();
            let argument = self.args[index].name().to_string();
            if combined {
                ConfigError::CombinedNotLast { command, argument }
            } else {
                ConfigError::RequiredAfterOptional { command, argument }
            }
        })?;
        let Some(handler) = self.handler else {
            return Err(ConfigError::MissingHandler { command: self.name });
        };
        Ok(Command {
            name: self.name,
            aliases: self.aliases,
            category: self.category,
            help: self.help,
            hidden: self.hidden,
            args: self.args,
            checks: self.checks,
            shape,
            handler,
        })
    }
}

impl Command {
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            aliases: Vec::new(),
            category: None,
            help: None,
            hidden: false,
            args: Vec::new(),
            checks: Vec::new(),
            handler: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Name followed by the aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn required_count(&self) -> usize {
        self.shape.required()
    }

    pub fn has_combined_tail(&self) -> bool {
        self.shape.has_combined_tail()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Name and argument list as shown by help, e.g. `say <message...>`.
    pub fn syntax(&self) -> String {
        std::iter::once(self.name.clone())
            .chain(self.args.iter().map(Argument::syntax))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs checks, binds and converts the argument tail and calls the
    /// handler. Handler and converter failures are logged, never replied.
    pub async fn run(&self, ctx: Context, tail: Option<&str>) -> Outcome {
        for check in &self.checks {
            if !check.evaluate(&ctx).await {
                debug!("{}: check failed for {}", self.name, ctx.author());
                return Outcome::Rejected;
            }
        }

        let raw = match self.shape.bind(tail) {
            Ok(raw) => raw,
            Err(Missing { index }) => {
                let missing = self
                    .args
                    .get(index)
                    .map(Argument::name)
                    .unwrap_or_default()
                    .to_string();
                debug!("{}: argument {} is missing", self.name, missing);
                ctx.send(format!("Argument {missing} is missing."))
                    .await
                    .print_err();
                return Outcome::MissingArgument(missing);
            }
        };
        let bound: Vec<(Argument, String)> = self
            .args
            .iter()
            .cloned()
            .zip(raw.into_iter().map(String::from))
            .collect();

        // Own task so a panicking handler ends only this dispatch
        let handler = self.handler.clone();
        let invocation = tokio::spawn(async move {
            let args = convert_all(bound, &ctx).await?;
            handler(ctx, args).await
        });
        match invocation.await {
            Ok(Ok(())) => Outcome::Completed,
            Ok(Err(e)) => {
                error!("Command {} failed: {e:#}", self.name);
                Outcome::Failed
            }
            Err(e) => {
                error!("Command {} panicked: {e}", self.name);
                Outcome::Failed
            }
        }
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("hidden", &self.hidden)
            .field("args", &self.args)
            .field("checks", &self.checks.len())
            .finish()
    }
}
