use crate::error::{Error, Result};
use crate::tokenizer::CasePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw option values as collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub frequency: bool,
    pub ignorecase: bool,
    pub lowercase: bool,
    pub reverse: bool,
    pub summary: bool,
    pub combine: bool,
    pub json: bool,
    pub jobs: usize,
    pub input_list: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub keywords: Option<PathBuf>,
}

/// What ends up in a report and how it looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub reverse: bool,
    pub frequency: bool,
    pub summary: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub case: CasePolicy,
    pub report: ReportOptions,
    pub format: ReportFormat,
    pub combine: bool,
    pub jobs: usize,
    pub keywords: Option<PathBuf>,
    /// `None` means the default stream.
    pub output: Option<PathBuf>,
}

impl Options {
    /// Check option combinations once, before any indexing happens.
    pub fn validate(&self, input_count: usize) -> Result<Config> {
        if self.ignorecase {
            return Err(Error::UnsupportedOption("ignorecase"));
        }
        if self.output.is_some() && input_count > 1 && !self.combine {
            return Err(Error::Configuration(
                "only specify option '--output=filename' with a single input file".to_string(),
            ));
        }
        if self.jobs == 0 {
            return Err(Error::Configuration("option '--jobs' must be at least 1".to_string()));
        }
        Ok(Config {
            case: if self.lowercase { CasePolicy::Lowercase } else { CasePolicy::Preserve },
            report: ReportOptions { reverse: self.reverse, frequency: self.frequency, summary: self.summary },
            format: if self.json { ReportFormat::Json } else { ReportFormat::Text },
            combine: self.combine,
            jobs: self.jobs,
            keywords: self.keywords.clone(),
            output: self.output.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn opts() -> Options { Options { jobs: 1, ..Default::default() } }

    #[test]
    fn ignorecase_is_rejected() {
        let err = Options { ignorecase: true, ..opts() }.validate(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOption);
    }

    #[test]
    fn output_needs_single_input_unless_combined() {
        let o = Options { output: Some("out.txt".into()), ..opts() };
        assert_eq!(o.validate(2).unwrap_err().kind(), ErrorKind::Configuration);
        assert!(o.validate(1).is_ok());
        assert!(Options { combine: true, ..o }.validate(2).is_ok());
    }

    #[test]
    fn lowercase_selects_case_policy() {
        let c = Options { lowercase: true, reverse: true, ..opts() }.validate(1).unwrap();
        assert_eq!(c.case, CasePolicy::Lowercase);
        assert!(c.report.reverse);
        assert_eq!(c.format, ReportFormat::Text);
    }

    #[test]
    fn zero_jobs_is_rejected() {
        assert!(Options::default().validate(1).is_err());
    }
}
