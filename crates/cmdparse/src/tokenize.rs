use std::sync::LazyLock;

use regex::Regex;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("token regex"));

/// Whitespace separated piece of an argument tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of the token within the tail it was taken from.
    pub offset: usize,
}

pub fn tokenize(tail: &str) -> Vec<Token<'_>> {
    TOKEN
        .find_iter(tail)
        .map(|m| Token {
            text: m.as_str(),
            offset: m.start(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tail: &str) -> Vec<&str> {
        tokenize(tail).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(texts("a b  c\n\nd\t e"), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(texts("   "), Vec::<&str>::new());
        assert_eq!(texts(""), Vec::<&str>::new());
    }

    #[test]
    fn offsets_point_into_tail() {
        let tail = "  first   second";
        let tokens = tokenize(tail);
        assert_eq!(tokens[0].offset, 2);
        assert_eq!(tokens[1].offset, 10);
        assert_eq!(&tail[tokens[1].offset..], "second");
    }
}
