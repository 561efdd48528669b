use anyhow::Result;
use cmdisco_model::UnitKey;
use itertools::Itertools;

use crate::router::check::is_owner;
use crate::router::{Args, Argument, Command, Context, Registrar, Unit};

const CATEGORY: &str = "Admin";

pub fn unit() -> Unit {
    Unit::new("admin", |r: &mut Registrar<'_>| {
        r.add_command(
            Command::builder("reload")
                .category(CATEGORY)
                .hidden(true)
                .help("Reloads given unit or all of them")
                .arg(Argument::optional("unit"))
                .check(is_owner())
                .handler(reload)
                .build()?,
        )?;
        r.add_command(
            Command::builder("units")
                .category(CATEGORY)
                .hidden(true)
                .help("Lists loaded units")
                .check(is_owner())
                .handler(units)
                .build()?,
        )?;
        Ok(())
    })
}

async fn reload(ctx: Context, args: Args) -> Result<()> {
    let results = match args.text(0) {
        Some(unit) => {
            let key = UnitKey::from(unit);
            let result = ctx.router().reload_unit(&key).await;
            vec![(key, result)]
        }
        None => ctx.router().reload_units().await,
    };
    let mut lines = results.into_iter().map(|(key, result)| match result {
        Ok(()) => format!("Reloaded {key}"),
        Err(e) => format!("Failed to reload {key}: {e}"),
    });
    ctx.send(lines.join("\n")).await
}

async fn units(ctx: Context, _args: Args) -> Result<()> {
    let mut units = ctx
        .router()
        .unit_sizes()
        .await
        .into_iter()
        .map(|(key, size)| format!("`{key}` ({size})"));
    ctx.send(units.join(", ")).await
}

#[cfg(test)]
mod tests {
    use cmdisco_model::UserId;

    use super::*;
    use crate::config::RouterConfig;
    use crate::router::testing::{message, router, AUTHOR_ID};
    use crate::router::Outcome;

    fn owned_router() -> crate::router::Router {
        router(RouterConfig {
            owner_id: Some(UserId::from(AUTHOR_ID)),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn owner_reloads_units() {
        let router = owned_router();
        router.load_unit(unit()).await.unwrap();

        let (msg, reply) = message("!reload");
        assert_eq!(router.process_input(msg).await, Outcome::Completed);
        assert_eq!(reply.sent(), ["Reloaded admin"]);

        let (msg, reply) = message("!reload nope");
        router.process_input(msg).await;
        assert_eq!(reply.sent(), ["Failed to reload nope: Unit `nope` is not loaded"]);

        let (msg, reply) = message("!units");
        router.process_input(msg).await;
        assert_eq!(reply.sent(), ["`admin` (2)"]);
    }

    #[tokio::test]
    async fn others_are_ignored() {
        let router = router(RouterConfig {
            owner_id: Some(UserId::from(1)),
            ..Default::default()
        });
        router.load_unit(unit()).await.unwrap();
        let (msg, reply) = message("!reload");
        assert_eq!(router.process_input(msg).await, Outcome::Rejected);
        assert!(reply.sent().is_empty());
    }
}
