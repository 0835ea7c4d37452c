use lazy_static::lazy_static;
use regex::{Matches, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

lazy_static! {
    // Letters and numerals only; apostrophes, hyphens and underscores split words.
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
}

/// How words are folded before they are indexed or looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePolicy {
    #[default]
    Preserve,
    Lowercase,
}

impl CasePolicy {
    pub fn normalize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        match self {
            CasePolicy::Preserve => Cow::Borrowed(word),
            CasePolicy::Lowercase if word.chars().any(char::is_uppercase) => Cow::Owned(word.to_lowercase()),
            CasePolicy::Lowercase => Cow::Borrowed(word),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// 1-based character column of the first character.
    pub column: usize,
}

/// Lazy left-to-right scan over the words of one line.
pub struct Tokens<'a> {
    line: &'a str,
    matches: Matches<'static, 'a>,
    byte_pos: usize,
    column: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let m = self.matches.next()?;
        self.column += self.line[self.byte_pos..m.start()].chars().count();
        self.byte_pos = m.start();
        Some(Token { text: m.as_str(), column: self.column })
    }
}

/// Tokenize a single line. Calling again on the same line starts over.
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens { line, matches: RE.find_iter(line), byte_pos: 0, column: 1 }
}

/// Convenience for callers that only need the word texts.
pub fn words(line: &str) -> impl Iterator<Item = &str> {
    tokenize(line).map(|t| t.text)
}
