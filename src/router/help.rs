use std::sync::Arc;

use cmdisco_model::ConfigError;
use itertools::Itertools;

use super::{Args, Argument, Command, Context};

pub(crate) fn command() -> Result<Command, ConfigError> {
    Command::builder("help")
        .help("Lists all commands or shows help for given command")
        .arg(Argument::optional("command"))
        .handler(|ctx: Context, args: Args| async move {
            let reply = match args.text(0) {
                Some(name) => match ctx.router().get_command(name).await {
                    Some(command) => describe(&ctx.router().config().prefix, &command),
                    None => String::from("Command not found"),
                },
                None => list(&ctx.router().categories().await),
            };
            ctx.send(reply).await
        })
        .build()
}

fn describe(prefix: &str, command: &Command) -> String {
    let mut lines = vec![format!("**{}**", command.name())];
    if let Some(help) = command.help() {
        lines.push(help.to_string());
    }
    lines.push(format!("Syntax: `{}{}`", prefix, command.syntax()));
    if !command.aliases().is_empty() {
        lines.push(format!(
            "Aliases: {}",
            command.aliases().iter().map(|a| format!("`{a}`")).join(" ")
        ));
    }
    lines.join("\n")
}

/// Visible commands by category. Categories without a visible command are
/// left out.
fn list(categories: &[(String, Vec<Arc<Command>>)]) -> String {
    let mut lines = vec![String::from("**Commands**")];
    for (category, commands) in categories {
        let visible = commands
            .iter()
            .filter(|c| !c.is_hidden())
            .map(|c| format!("`{}`", c.name()))
            .join(" ");
        if !visible.is_empty() {
            lines.push(format!("**{category}**: {visible}"));
        }
    }
    lines.join("\n")
}
