//! A minimal front matter scanner. Post source files may begin with a block
//! of `key: value` lines fenced by `---`:
//!
//! ```md
//! ---
//! title: "Hello, world!"
//! date: 2024-04-16
//! tags: [greet, intro]
//! ---
//! Post body
//! ```
//!
//! This is deliberately not YAML. Each line is one entry, the value is the
//! rest of the line, and the only structure recognized is a bracketed,
//! comma-separated list.

use std::collections::HashMap;

const FENCE: &str = "---";

/// A single front matter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Returns the value as text. Lists are joined with `,`. Empty values
    /// are treated as absent.
    pub fn text(&self) -> Option<String> {
        let text = match self {
            Value::Text(s) => s.clone(),
            Value::List(items) => items.join(","),
        };
        match text.is_empty() {
            true => None,
            false => Some(text),
        }
    }

    /// Returns the value as a list. A non-empty scalar becomes a single
    /// element list.
    pub fn list(&self) -> Vec<String> {
        match self {
            Value::List(items) => items.clone(),
            Value::Text(s) if s.is_empty() => Vec::new(),
            Value::Text(s) => vec![s.clone()],
        }
    }
}

/// The parsed front matter of one post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter(HashMap<String, Value>);

impl FrontMatter {
    /// Parses the front matter at the top of `input`. A file without a
    /// complete fenced block yields an empty [`FrontMatter`].
    pub fn parse(input: &str) -> FrontMatter {
        let mut entries = HashMap::new();
        if let Some(block) = block(input) {
            for line in block {
                if let Some((key, value)) = entry(line) {
                    entries.insert(key.to_owned(), value);
                }
            }
        }
        FrontMatter(entries)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the first of `keys` holding a non-empty text value.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key).and_then(Value::text))
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key).map(Value::list).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the lines between the opening and closing fences, if both exist.
fn block(input: &str) -> Option<Vec<&str>> {
    let mut lines = input.split('\n').map(|line| line.trim_end_matches('\r'));
    if lines.next()?.trim_end() != FENCE {
        return None;
    }
    let mut block = Vec::new();
    for line in lines {
        if line.trim_end() == FENCE {
            return Some(block);
        }
        block.push(line);
    }
    None
}

/// Matches `key: value`, where `key` is made of word characters and starts
/// the line, and `value` is non-empty.
fn entry(line: &str) -> Option<(&str, Value)> {
    let key_len = line
        .find(|c: char| !is_word_char(c))
        .unwrap_or_else(|| line.len());
    if key_len == 0 || !line[key_len..].starts_with(':') {
        return None;
    }
    let rest = &line[key_len + 1..];
    if rest.is_empty() {
        return None;
    }
    Some((&line[..key_len], value(rest.trim())))
}

fn value(raw: &str) -> Value {
    let unquoted = strip_quotes(raw);
    match unquoted
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        Some(inner) => Value::List(
            inner
                .split(',')
                .map(|item| {
                    let item = item.trim();
                    let item = item.strip_prefix(is_quote).unwrap_or(item);
                    item.strip_suffix(is_quote).unwrap_or(item)
                })
                .map(str::to_owned)
                .collect(),
        ),
        None => Value::Text(unquoted.to_owned()),
    }
}

/// Strips one pair of matching surrounding quotes. A lone quote character
/// counts as an empty quoted string.
fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''].iter() {
        if s.starts_with(*quote) && s.ends_with(*quote) {
            return s.get(1..s.len() - 1).unwrap_or("");
        }
    }
    s
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod test {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_owned())
    }

    fn list(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_title_and_tags() {
        let fm = FrontMatter::parse("---\ntitle: \"Hello\"\ntags: [a, b, c]\n---\nbody");
        assert_eq!(2, fm.len());
        assert_eq!(Some(&text("Hello")), fm.get("title"));
        assert_eq!(Some(&list(&["a", "b", "c"])), fm.get("tags"));
    }

    #[test]
    fn test_no_front_matter() {
        assert!(FrontMatter::parse("# Just a heading\n\nBody").is_empty());
        assert!(FrontMatter::parse("").is_empty());
        // Opening fence without a closing one.
        assert!(FrontMatter::parse("---\ntitle: Dangling\n").is_empty());
        // The block must start on the first line.
        assert!(FrontMatter::parse("\n---\ntitle: Late\n---\n").is_empty());
    }

    #[test]
    fn test_quotes() {
        let fm = FrontMatter::parse(
            "---\n\
             a: 'single'\n\
             b: \"double\"\n\
             c: \"mismatched'\n\
             d: \"\"\n\
             e: \"\n\
             ---\n",
        );
        assert_eq!(Some(&text("single")), fm.get("a"));
        assert_eq!(Some(&text("double")), fm.get("b"));
        assert_eq!(Some(&text("\"mismatched'")), fm.get("c"));
        assert_eq!(Some(&text("")), fm.get("d"));
        assert_eq!(Some(&text("")), fm.get("e"));
    }

    #[test]
    fn test_lists() {
        let fm = FrontMatter::parse(
            "---\n\
             quoted: [\"rust\", 'web' , plain]\n\
             wrapped: \"[x, y]\"\n\
             empty: []\n\
             ---\n",
        );
        assert_eq!(Some(&list(&["rust", "web", "plain"])), fm.get("quoted"));
        assert_eq!(Some(&list(&["x", "y"])), fm.get("wrapped"));
        assert_eq!(Some(&list(&[""])), fm.get("empty"));
    }

    #[test]
    fn test_lines_that_are_not_entries_are_ignored() {
        let fm = FrontMatter::parse(
            "---\n\
             title: Kept: with colon\n\
             \x20 indented: no\n\
             key-with-dash: no\n\
             novalue:\n\
             just some words\n\
             # comment: no\n\
             date:2024-01-01\n\
             ---\n",
        );
        assert_eq!(2, fm.len());
        assert_eq!(Some(&text("Kept: with colon")), fm.get("title"));
        assert_eq!(Some(&text("2024-01-01")), fm.get("date"));
    }

    #[test]
    fn test_later_keys_win_and_crlf() {
        let fm = FrontMatter::parse("---\r\ntitle: First\r\ntitle: Second\r\n---\r\nbody");
        assert_eq!(Some(&text("Second")), fm.get("title"));
    }

    #[test]
    fn test_text_lookup_skips_empty_values() {
        let fm = FrontMatter::parse("---\npublishDate: \"\"\ndate: 2024-02-01\n---\n");
        assert_eq!(Some("2024-02-01".to_owned()), fm.text(&["publishDate", "date"]));
        assert_eq!(None, fm.text(&["author"]));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Some("a,b".to_owned()), list(&["a", "b"]).text());
        assert_eq!(vec!["solo".to_owned()], text("solo").list());
        assert!(text("").list().is_empty());
    }
}
