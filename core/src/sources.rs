use crate::error::{Error, Result};
use crate::keywords::strip_comment;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Name used for standard input.
pub const STDIN_NAME: &str = "-";

/// A named, already opened line source.
pub struct Source {
    name: String,
    reader: Box<dyn BufRead + Send>,
}

impl Source {
    pub fn new(name: impl Into<String>, reader: impl BufRead + Send + 'static) -> Self {
        Self { name: name.into(), reader: Box::new(reader) }
    }

    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Cursor::new(text.into().into_bytes()))
    }

    pub fn stdin() -> Self {
        Self::new(STDIN_NAME, BufReader::new(std::io::stdin()))
    }

    /// Open `path` for reading; `-` means standard input.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        if name == STDIN_NAME {
            return Ok(Self::stdin());
        }
        match File::open(path) {
            Ok(f) => Ok(Self::new(name, BufReader::new(f))),
            Err(source) => Err(Error::InputUnavailable { name, source }),
        }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn into_parts(self) -> (String, Box<dyn BufRead + Send>) { (self.name, self.reader) }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Parse an input-list file: whitespace separated file names with `#`/`;` comments.
pub fn read_input_list<R: BufRead>(reader: R) -> Result<Vec<PathBuf>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        names.extend(strip_comment(&line).split_whitespace().map(PathBuf::from));
    }
    Ok(names)
}

pub fn load_input_list<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let list_err = |source| Error::InputList { path: path.to_path_buf(), source };
    let f = File::open(path).map_err(list_err)?;
    read_input_list(BufReader::new(f)).map_err(|e| match e {
        Error::Io(source) => list_err(source),
        other => other,
    })
}

/// Command-line names followed by the names from the optional input list, in order.
/// No names at all means standard input.
pub fn resolve(files: &[PathBuf], input_list: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut names = files.to_vec();
    if let Some(list) = input_list {
        names.extend(load_input_list(list)?);
    }
    if names.is_empty() {
        names.push(PathBuf::from(STDIN_NAME));
    }
    Ok(names)
}

/// Open every name up front; the first failure aborts.
pub fn open_all(names: &[PathBuf]) -> Result<Vec<Source>> {
    let sources = names.iter().map(Source::open).collect::<Result<Vec<_>>>()?;
    tracing::debug!(sources = sources.len(), "opened inputs");
    Ok(sources)
}
