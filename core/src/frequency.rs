use crate::index::{Index, IndexEntry, Partition};

/// Per-partition occurrence totals for percentage-of-total figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frequencies {
    keyword_total: usize,
    word_total: usize,
}

impl Frequencies {
    pub fn of(index: &Index) -> Self {
        Self { keyword_total: index.references(Partition::Keyword), word_total: index.references(Partition::Word) }
    }

    pub fn total(&self, partition: Partition) -> usize {
        match partition {
            Partition::Keyword => self.keyword_total,
            Partition::Word => self.word_total,
        }
    }

    /// Whole percent of the entry's partition total, rounded half away from zero.
    /// `None` when the partition holds no occurrences.
    pub fn percent(&self, entry: &IndexEntry) -> Option<u32> {
        percent_of(entry.count(), self.total(entry.partition))
    }
}

pub fn percent_of(count: usize, total: usize) -> Option<u32> {
    if total == 0 { return None; }
    Some((100.0 * count as f64 / total as f64).round() as u32)
}
