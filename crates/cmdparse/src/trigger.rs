use std::sync::LazyLock;

use regex::Regex;

static INVOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s?([\s\S]+)?$").expect("invocation regex"));

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d+)>\s*").expect("mention regex"));

/// Command name and the untouched text following it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub tail: Option<&'a str>,
}

pub fn strip_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.strip_prefix(prefix)
}

/// Strips a leading mention of `self_id` (`<@id>` or `<@!id>`) and the
/// whitespace after it.
pub fn strip_mention(text: &str, self_id: u64) -> Option<&str> {
    let captures = MENTION.captures(text)?;
    let mentioned: u64 = captures.get(1)?.as_str().parse().ok()?;
    if mentioned != self_id {
        return None;
    }
    let end = captures.get(0)?.end();
    Some(&text[end..])
}

/// Splits text following a trigger into the command name and the argument
/// tail. A single separator after the name is consumed, anything after it
/// is kept verbatim. Returns `None` when the text does not start with a
/// name.
pub fn parse_invocation(text: &str) -> Option<Invocation<'_>> {
    let captures = INVOCATION.captures(text)?;
    let name = captures.get(1)?.as_str();
    let tail = captures.get(2).map(|m| m.as_str());
    Some(Invocation { name, tail })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stripped() {
        assert_eq!(strip_prefix("!ping", "!"), Some("ping"));
        assert_eq!(strip_prefix("js!ping", "js!"), Some("ping"));
        assert_eq!(strip_prefix("ping", "!"), None);
        assert_eq!(strip_prefix("?ping", "!"), None);
    }

    #[test]
    fn mention_of_self_is_stripped() {
        assert_eq!(strip_mention("<@42> ping", 42), Some("ping"));
        assert_eq!(strip_mention("<@!42>   say hi", 42), Some("say hi"));
        assert_eq!(strip_mention("<@42>ping", 42), Some("ping"));
        assert_eq!(strip_mention("<@43> ping", 42), None);
        assert_eq!(strip_mention("hey <@42> ping", 42), None);
    }

    #[test]
    fn name_only() {
        assert_eq!(
            parse_invocation("ping"),
            Some(Invocation {
                name: "ping",
                tail: None
            })
        );
        assert_eq!(parse_invocation("ping ").unwrap().tail, None);
    }

    #[test]
    fn tail_keeps_spacing_after_first_separator() {
        let invocation = parse_invocation("say   multi   space\ntext ").unwrap();
        assert_eq!(invocation.name, "say");
        assert_eq!(invocation.tail, Some("  multi   space\ntext "));
    }

    #[test]
    fn newline_separates_name() {
        let invocation = parse_invocation("say\nhello there").unwrap();
        assert_eq!(invocation.name, "say");
        assert_eq!(invocation.tail, Some("hello there"));
    }

    #[test]
    fn leading_whitespace_is_not_an_invocation() {
        assert_eq!(parse_invocation(" ping"), None);
        assert_eq!(parse_invocation(""), None);
    }
}
