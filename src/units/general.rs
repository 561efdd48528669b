use anyhow::Result;

use crate::router::{Args, Argument, Command, Context, Registrar, Unit};

const CATEGORY: &str = "General";

pub fn unit() -> Unit {
    Unit::new("general", |r: &mut Registrar<'_>| {
        r.add_command(
            Command::builder("ping")
                .alias("pong")
                .category(CATEGORY)
                .help("Checks if the bot is alive")
                .handler(ping)
                .build()?,
        )?;
        r.add_command(
            Command::builder("say")
                .category(CATEGORY)
                .help("Says something given")
                .arg(Argument::required("message").combined())
                .handler(say)
                .build()?,
        )?;
        r.add_command(
            Command::builder("test")
                .category(CATEGORY)
                .hidden(true)
                .help("Echoes parsed arguments")
                .args([
                    Argument::required("first"),
                    Argument::optional("second"),
                    Argument::optional("rest").combined(),
                ])
                .handler(test)
                .build()?,
        )?;
        Ok(())
    })
}

async fn ping(ctx: Context, _args: Args) -> Result<()> {
    ctx.send("Pong!").await
}

async fn say(ctx: Context, args: Args) -> Result<()> {
    ctx.send(args.text(0).unwrap_or_default()).await
}

async fn test(ctx: Context, args: Args) -> Result<()> {
    let lines: Vec<String> = args
        .iter()
        .enumerate()
        .map(|(i, value)| format!("{i}: {value:?}"))
        .collect();
    ctx.send(lines.join("\n")).await
}
