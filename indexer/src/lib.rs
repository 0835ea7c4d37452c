use anyhow::{anyhow, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use wordindex_core::{generate, sources, write_reports, Options};

const AFTER_HELP: &str = "\
Long options also may start with a plus, like: +help.

Creates an alphabetically sorted index of words present in the input files and
reports the lines where those words occur. Words that are marked as keywords are
excluded (see option --keywords). Use option --reverse to only show the
occurrences of keywords.

Words can be read from standard input, or from files specified on the command
line and from files that are specified in another file (see option --input).

A file that specifies input filenames may look as follows:
   # comment that extends to the end of the line ( ; also starts comment line)
   file1.txt file2.txt
   file3.txt

Example:
   echo hello world | wordindex --summary --frequency
       keywords  0
          words  2
     references  2

          hello  50% (1)  1
          world  50% (1)  1";

#[derive(Parser, Debug)]
#[command(name = "wordindex", disable_version_flag = true)]
#[command(about = "Create an alphabetically sorted index of words and the lines they occur on")]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Report author's name and e-mail
    #[arg(short = 'a', long)]
    pub author: bool,
    /// Report program version
    #[arg(long)]
    pub version: bool,
    /// Report on processing steps
    #[arg(short = 'v', long)]
    pub verbose: bool,
    /// Also report word frequency as d% (n)
    #[arg(short = 'f', long)]
    pub frequency: bool,
    /// Handle upper and lowercase as being equivalent [not implemented]
    #[arg(short = 'g', long)]
    pub ignorecase: bool,
    /// Transform words to lowercase
    #[arg(short = 'l', long)]
    pub lowercase: bool,
    /// Only collect keyword occurrences, see --keywords
    #[arg(short = 'r', long)]
    pub reverse: bool,
    /// Also report number of (key)words and references
    #[arg(short = 's', long)]
    pub summary: bool,
    /// Build one report over all inputs instead of one per input
    #[arg(short = 'c', long)]
    pub combine: bool,
    /// Worker threads for indexing a combined report
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: usize,
    /// Write the report as JSON
    #[arg(long)]
    pub json: bool,
    /// Read filenames from given file
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Write output to given file [standard output]
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Read keywords to skip (stopwords) from given file
    #[arg(short = 'k', long, value_name = "FILE")]
    pub keywords: Option<PathBuf>,
    /// Input files [standard input]
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            frequency: self.frequency,
            ignorecase: self.ignorecase,
            lowercase: self.lowercase,
            reverse: self.reverse,
            summary: self.summary,
            combine: self.combine,
            json: self.json,
            jobs: self.jobs,
            input_list: self.input.clone(),
            output: self.output.clone(),
            keywords: self.keywords.clone(),
        }
    }
}

/// Rewrite `+name` options to `--name` (`+x` to `-x`) up to a bare `--`.
pub fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut in_options = true;
    args.into_iter()
        .map(|arg| {
            if arg == "--" { in_options = false; }
            match arg.strip_prefix('+') {
                Some(rest) if in_options && !rest.is_empty() => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if name.chars().count() == 1 { format!("-{rest}") } else { format!("--{rest}") }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Base name of argv[0], used to prefix diagnostics.
pub fn program_name(arg0: Option<&str>) -> String {
    arg0.and_then(|a| Path::new(a).file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wordindex".to_string())
}

pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    // A second initialisation (tests, embedding) keeps the first subscriber.
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Run the program on the full argument vector, argv[0] included.
/// Returns the process exit status.
pub fn run<W: Write, E: Write>(args: Vec<String>, out: &mut W, err: &mut E) -> i32 {
    let program = program_name(args.first().map(String::as_str));
    let cli = match Cli::try_parse_from(normalize_args(args)) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            let _ = write!(out, "{}", e.render());
            return 0;
        }
        Err(e) => {
            let _ = write!(err, "{program}: {}", e.render());
            return 1;
        }
    };
    init_tracing(cli.verbose);

    match execute(&program, &cli, out) {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            let _ = writeln!(err, "{program}: {e} (try option --help).");
            1
        }
    }
}

fn execute<W: Write>(program: &str, cli: &Cli, out: &mut W) -> Result<()> {
    if cli.author {
        writeln!(out, "Author: {}", env!("CARGO_PKG_AUTHORS"))?;
        return Ok(());
    }
    if cli.version {
        writeln!(out, "{program} v{}", env!("CARGO_PKG_VERSION"))?;
        return Ok(());
    }

    let names = sources::resolve(&cli.files, cli.input.as_deref())?;
    let config = cli.options().validate(names.len())?;
    tracing::info!(inputs = names.len(), combine = config.combine, jobs = config.jobs, "starting run");
    let opened = sources::open_all(&names)?;
    let reports = generate(&config, opened)?;

    match &config.output {
        Some(path) => {
            let f = File::create(path).map_err(|e| anyhow!("cannot create output '{}': {e}", path.display()))?;
            let mut w = BufWriter::new(f);
            write_reports(&reports, config.format, &mut w)?;
            w.flush()?;
            tracing::info!(output = %path.display(), reports = reports.len(), "report written");
        }
        None => write_reports(&reports, config.format, out)?,
    }
    Ok(())
}
