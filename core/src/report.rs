use crate::error::Result;
use crate::frequency::Frequencies;
use crate::index::{Index, Partition};
use crate::options::{ReportFormat, ReportOptions};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Width of the right-aligned label/word column.
pub const WORD_WIDTH: usize = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub keywords: usize,
    pub words: usize,
    /// Occurrences of the reported partition.
    pub references: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOccurrence {
    /// Only set when the index spans several sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub word: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u32>,
    pub occurrences: Vec<ReportOccurrence>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn build(index: &Index, opts: &ReportOptions) -> Self {
        let partition = if opts.reverse { Partition::Keyword } else { Partition::Word };
        let freqs = Frequencies::of(index);
        let multi_source = index.sources().len() > 1;

        let entries: Vec<ReportEntry> = index
            .sorted(partition)
            .into_iter()
            .map(|e| ReportEntry {
                word: e.word.clone(),
                count: e.count(),
                percent: if opts.frequency { freqs.percent(e) } else { None },
                occurrences: e
                    .occurrences
                    .iter()
                    .map(|o| ReportOccurrence {
                        source: if multi_source { index.source_name(o.source).map(str::to_string) } else { None },
                        line: o.line,
                    })
                    .collect(),
            })
            .collect();

        let summary = opts.summary.then(|| Summary {
            keywords: index.partition_len(Partition::Keyword),
            words: index.partition_len(Partition::Word),
            references: freqs.total(partition),
        });
        Self { summary, entries }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(s) = &self.summary {
            writeln!(out, "{:>w$}  {}", "keywords", s.keywords, w = WORD_WIDTH)?;
            writeln!(out, "{:>w$}  {}", "words", s.words, w = WORD_WIDTH)?;
            writeln!(out, "{:>w$}  {}", "references", s.references, w = WORD_WIDTH)?;
            writeln!(out)?;
        }
        for e in &self.entries {
            write!(out, "{:>w$}  ", e.word, w = WORD_WIDTH)?;
            if let Some(p) = e.percent {
                write!(out, "{}% ({})  ", p, e.count)?;
            }
            let lines: Vec<String> = e
                .occurrences
                .iter()
                .map(|o| match &o.source {
                    Some(src) => format!("{}:{}", src, o.line),
                    None => o.line.to_string(),
                })
                .collect();
            writeln!(out, "{}", lines.join(" "))?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_text(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// A finished report and the name of the input(s) it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedReport {
    pub name: String,
    #[serde(flatten)]
    pub report: Report,
}

/// Serialize the reports of one run. A lone report is written bare; several
/// get a `name:` header each (text) or become a JSON array.
pub fn write_reports<W: Write>(reports: &[NamedReport], format: ReportFormat, out: &mut W) -> Result<()> {
    match (format, reports) {
        (ReportFormat::Text, [single]) => single.report.write_text(out),
        (ReportFormat::Json, [single]) => single.report.write_json(out),
        (ReportFormat::Text, many) => {
            for (i, r) in many.iter().enumerate() {
                if i > 0 { writeln!(out)?; }
                writeln!(out, "{}:", r.name)?;
                r.report.write_text(out)?;
            }
            Ok(())
        }
        (ReportFormat::Json, many) => {
            serde_json::to_writer_pretty(&mut *out, many)?;
            writeln!(out)?;
            Ok(())
        }
    }
}
