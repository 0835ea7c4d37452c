pub mod error;
pub mod frequency;
pub mod index;
pub mod keywords;
pub mod options;
pub mod report;
pub mod sources;
pub mod tokenizer;

pub use error::{Error, ErrorKind, Result};
pub use frequency::Frequencies;
pub use index::{build_sharded, Index, IndexBuilder, IndexEntry, Occurrence, Partition, SourceId};
pub use keywords::KeywordSet;
pub use options::{Config, Options, ReportFormat, ReportOptions};
pub use report::{write_reports, NamedReport, Report, ReportEntry, ReportOccurrence, Summary};
pub use sources::Source;
pub use tokenizer::{tokenize, CasePolicy, Token};

/// Load the configured keyword set, or an empty one.
pub fn load_keywords(config: &Config) -> Result<KeywordSet> {
    match &config.keywords {
        Some(path) => KeywordSet::load(path, config.case),
        None => Ok(KeywordSet::new(config.case)),
    }
}

/// Index `sources` and build the reports: one per source, or a single
/// combined one when `config.combine` is set.
pub fn generate(config: &Config, sources: Vec<Source>) -> Result<Vec<NamedReport>> {
    let keywords = load_keywords(config)?;
    if config.combine {
        let name = sources.iter().map(Source::name).collect::<Vec<_>>().join(" ");
        let index = build_sharded(&keywords, sources, config.jobs)?;
        return Ok(vec![NamedReport { name, report: Report::build(&index, &config.report) }]);
    }
    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        let name = source.name().to_string();
        let mut builder = IndexBuilder::new(&keywords);
        builder.consume_source(source)?;
        reports.push(NamedReport { name, report: Report::build(&builder.finish(), &config.report) });
    }
    Ok(reports)
}
