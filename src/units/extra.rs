use anyhow::Result;

use crate::router::{converter, Args, Argument, Command, Context, Registrar, Unit};

pub fn unit() -> Unit {
    Unit::new("extra", |r: &mut Registrar<'_>| {
        r.add_command(
            Command::builder("userinfo")
                .alias("whois")
                .help("Shows who a user is")
                .arg(Argument::required("user").converter(converter::user()))
                .handler(userinfo)
                .build()?,
        )?;
        r.add_command(
            Command::builder("add")
                .help("Adds two integers")
                .args([
                    Argument::required("a").converter(converter::integer()),
                    Argument::required("b").converter(converter::integer()),
                ])
                .handler(add)
                .build()?,
        )?;
        Ok(())
    })
}

async fn userinfo(ctx: Context, args: Args) -> Result<()> {
    match args.user(0) {
        Some(user) => ctx.send(format!("{} has id {}", user.name, user.id)).await,
        None => ctx.send("User not found").await,
    }
}

async fn add(ctx: Context, args: Args) -> Result<()> {
    match (args.integer(0), args.integer(1)) {
        (Some(a), Some(b)) => match a.checked_add(b) {
            Some(sum) => ctx.send(sum.to_string()).await,
            None => ctx.send("Too big").await,
        },
        _ => ctx.send("Both arguments have to be integers").await,
    }
}
