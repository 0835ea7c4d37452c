use crate::error::{Error, Result};
use crate::keywords::KeywordSet;
use crate::sources::Source;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::BufRead;

/// Position of a source in the run's ordered source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub source: SourceId,
    /// 1-based line number within `source`.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Keyword,
    Word,
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Normalized spelling, the identity of the entry.
    pub word: String,
    /// Raw spelling at first sight.
    pub spelling: String,
    pub partition: Partition,
    /// In encounter order, never reordered.
    pub occurrences: Vec<Occurrence>,
}

impl IndexEntry {
    pub fn count(&self) -> usize { self.occurrences.len() }
}

/// Alphabetical order used for reports: case-folded first, then exact spelling.
pub fn alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Completed word index of one run. Read-only once built.
#[derive(Debug, Default)]
pub struct Index {
    sources: Vec<String>,
    entries: HashMap<String, IndexEntry>,
}

impl Index {
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, word: &str) -> Option<&IndexEntry> { self.entries.get(word) }

    /// Entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> { self.entries.values() }

    pub fn partition(&self, partition: Partition) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values().filter(move |e| e.partition == partition)
    }

    /// Number of distinct words in `partition`.
    pub fn partition_len(&self, partition: Partition) -> usize { self.partition(partition).count() }

    /// Total occurrences recorded in `partition`.
    pub fn references(&self, partition: Partition) -> usize {
        self.partition(partition).map(IndexEntry::count).sum()
    }

    /// Entries of `partition` in report order.
    pub fn sorted(&self, partition: Partition) -> Vec<&IndexEntry> {
        let mut v: Vec<&IndexEntry> = self.partition(partition).collect();
        v.sort_by(|a, b| alphabetical(&a.word, &b.word));
        v
    }

    pub fn sources(&self) -> &[String] { &self.sources }

    pub fn source_name(&self, id: SourceId) -> Option<&str> {
        self.sources.get(id.0 as usize).map(String::as_str)
    }

    /// Append a shard built from sources that come after this index's sources.
    pub fn merge(&mut self, other: Index) {
        let offset = self.sources.len() as u32;
        self.sources.extend(other.sources);
        for (word, mut entry) in other.entries {
            for occ in entry.occurrences.iter_mut() {
                occ.source = SourceId(occ.source.0 + offset);
            }
            match self.entries.get_mut(&word) {
                Some(existing) => existing.occurrences.append(&mut entry.occurrences),
                None => { self.entries.insert(word, entry); }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumeStats {
    pub lines: usize,
    pub tokens: usize,
}

struct SourceState {
    name: String,
    last_line: usize,
}

/// Accumulates occurrences line by line, classifying words against the keyword set.
pub struct IndexBuilder<'k> {
    keywords: &'k KeywordSet,
    sources: Vec<SourceState>,
    entries: HashMap<String, IndexEntry>,
}

impl<'k> IndexBuilder<'k> {
    pub fn new(keywords: &'k KeywordSet) -> Self {
        Self { keywords, sources: Vec::new(), entries: HashMap::new() }
    }

    pub fn add_source(&mut self, name: impl Into<String>) -> SourceId {
        self.sources.push(SourceState { name: name.into(), last_line: 0 });
        SourceId(self.sources.len() as u32 - 1)
    }

    /// Index one line. Lines of a source must arrive in increasing order.
    /// Returns the number of tokens recorded.
    pub fn consume(&mut self, source: SourceId, line_no: usize, line: &str) -> Result<usize> {
        let state = self
            .sources
            .get_mut(source.0 as usize)
            .ok_or_else(|| Error::Configuration(format!("unknown source id {}", source.0)))?;
        if line_no <= state.last_line {
            return Err(Error::LineOrder { source_name: state.name.clone(), previous: state.last_line, line: line_no });
        }
        state.last_line = line_no;

        let case = self.keywords.case_policy();
        let occ = Occurrence { source, line: line_no };
        let mut tokens = 0;
        for word in crate::tokenizer::words(line) {
            tokens += 1;
            let key = case.normalize(word);
            if let Some(entry) = self.entries.get_mut(key.as_ref()) {
                entry.occurrences.push(occ);
                continue;
            }
            let partition = if self.keywords.contains(&key) { Partition::Keyword } else { Partition::Word };
            let key = key.into_owned();
            self.entries.insert(key.clone(), IndexEntry { word: key, spelling: word.to_string(), partition, occurrences: vec![occ] });
        }
        Ok(tokens)
    }

    /// Index every line of `reader`, numbering from the line after the last one seen.
    pub fn consume_reader<R: BufRead>(&mut self, source: SourceId, mut reader: R) -> Result<ConsumeStats> {
        let mut stats = ConsumeStats::default();
        let mut line_no = self.sources.get(source.0 as usize).map(|s| s.last_line).unwrap_or(0);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 { break; }
            line_no += 1;
            stats.lines += 1;
            stats.tokens += self.consume(source, line_no, &String::from_utf8_lossy(&buf))?;
        }
        Ok(stats)
    }

    pub fn consume_source(&mut self, source: Source) -> Result<SourceId> {
        let (name, reader) = source.into_parts();
        let id = self.add_source(name.clone());
        let stats = self.consume_reader(id, reader)?;
        tracing::debug!(source = %name, lines = stats.lines, tokens = stats.tokens, "consumed source");
        Ok(id)
    }

    pub fn finish(self) -> Index {
        let index = Index { sources: self.sources.into_iter().map(|s| s.name).collect(), entries: self.entries };
        tracing::info!(
            sources = index.sources.len(),
            words = index.partition_len(Partition::Word),
            keywords = index.partition_len(Partition::Keyword),
            "index built"
        );
        index
    }
}

/// Build one index over `sources`, using up to `jobs` worker threads.
///
/// Each source becomes its own shard; shards are merged in source order after
/// every worker has finished, so the result equals a sequential build.
pub fn build_sharded(keywords: &KeywordSet, sources: Vec<Source>, jobs: usize) -> Result<Index> {
    if jobs <= 1 || sources.len() <= 1 {
        let mut builder = IndexBuilder::new(keywords);
        for source in sources {
            builder.consume_source(source)?;
        }
        return Ok(builder.finish());
    }

    let workers = jobs.min(sources.len());
    let slots: Vec<Mutex<Option<Result<Index>>>> = sources.iter().map(|_| Mutex::new(None)).collect();
    let queue = Mutex::new(sources.into_iter().enumerate());
    tracing::debug!(workers, shards = slots.len(), "sharded indexing");

    std::thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                let next = queue.lock().next();
                let Some((pos, source)) = next else { break };
                let mut builder = IndexBuilder::new(keywords);
                let shard = builder.consume_source(source).map(|_| builder.finish());
                *slots[pos].lock() = Some(shard);
            });
        }
    });

    let mut merged = Index::default();
    for shard in slots.into_iter().filter_map(Mutex::into_inner) {
        merged.merge(shard?);
    }
    Ok(merged)
}
