//! Turning raw argument text into values.

use std::future::Future;
use std::sync::{Arc, LazyLock};

use anyhow::{Context as _, Result};
use cmdisco_model::UserId;
use futures_util::future::BoxFuture;
use futures_util::FutureExt as _;
use log::trace;
use regex::Regex;

use super::{ArgValue, Args, Argument, Context};

static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d+)>$").expect("user mention regex"));

type ConvertFn = dyn Fn(String, Context) -> BoxFuture<'static, Result<ArgValue>> + Send + Sync;

#[derive(Clone)]
pub struct Converter(Arc<ConvertFn>);

impl Converter {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(String, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ArgValue>> + Send + 'static,
    {
        Converter(Arc::new(move |raw: String, ctx: Context| f(raw, ctx).boxed()))
    }

    pub async fn convert(&self, raw: String, ctx: Context) -> Result<ArgValue> {
        (self.0)(raw, ctx).await
    }
}

/// Looks a user up by id, then by mention, then by name.
pub fn user() -> Converter {
    Converter::new(|raw: String, ctx: Context| async move {
        let directory = ctx.router().directory();
        if let Ok(id) = raw.parse::<UserId>() {
            if let Some(user) = directory.user_by_id(id).await? {
                return Ok(ArgValue::User(user));
            }
        }
        if let Some(id) = mentioned_user(&raw) {
            if let Some(user) = directory.user_by_id(id).await? {
                return Ok(ArgValue::User(user));
            }
        }
        Ok(directory
            .user_by_name(&raw)
            .await?
            .map_or(ArgValue::NotFound, ArgValue::User))
    })
}

pub fn integer() -> Converter {
    Converter::new(|raw: String, _ctx: Context| async move {
        Ok(raw
            .parse::<i64>()
            .map_or(ArgValue::NotFound, ArgValue::Integer))
    })
}

fn mentioned_user(raw: &str) -> Option<UserId> {
    USER_MENTION.captures(raw)?.get(1)?.as_str().parse().ok()
}

/// Converts bound argument text in declaration order. Arguments without a
/// converter are passed as text.
pub(crate) async fn convert_all(bound: Vec<(Argument, String)>, ctx: &Context) -> Result<Args> {
    let mut values = Vec::with_capacity(bound.len());
    for (argument, raw) in bound {
        let value = match argument.get_converter() {
            Some(converter) => converter
                .convert(raw, ctx.clone())
                .await
                .with_context(|| format!("Converting argument {}", argument.name()))?,
            None => ArgValue::Text(raw),
        };
        trace!("{} = {:?}", argument.name(), value);
        values.push(value);
    }
    Ok(Args::new(values))
}
