use crate::error::{Error, Result};
use crate::tokenizer::{words, CasePolicy};
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Strip comment content from one line of a word list file.
///
/// A line whose first non-blank character is `#` or `;` is dropped entirely,
/// otherwise everything from the first `#` onwards is ignored.
pub fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return "";
    }
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Stop-words, normalized with the same case policy the index uses.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    words: HashSet<String>,
    case: CasePolicy,
}

impl KeywordSet {
    pub fn new(case: CasePolicy) -> Self {
        Self { words: HashSet::new(), case }
    }

    pub fn load<P: AsRef<Path>>(path: P, case: CasePolicy) -> Result<Self> {
        let path = path.as_ref();
        let keywords_err = |source| Error::Keywords { path: path.to_path_buf(), source };
        let f = File::open(path).map_err(keywords_err)?;
        let set = Self::from_reader(BufReader::new(f), case).map_err(|e| match e {
            Error::Io(source) => keywords_err(source),
            other => other,
        })?;
        tracing::debug!(path = %path.display(), keywords = set.len(), "loaded keywords");
        Ok(set)
    }

    pub fn from_reader<R: BufRead>(reader: R, case: CasePolicy) -> Result<Self> {
        let mut set = Self::new(case);
        for line in reader.lines() {
            let line = line?;
            for word in words(strip_comment(&line)) {
                set.words.insert(case.normalize(word).into_owned());
            }
        }
        Ok(set)
    }

    pub fn case_policy(&self) -> CasePolicy { self.case }

    /// Membership test; `word` is normalized here so callers may pass raw spellings.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(self.case.normalize(word).as_ref())
    }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// Keywords in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str).collect::<BTreeSet<_>>().into_iter()
    }
}
