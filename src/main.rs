use anyhow::Context;
use clap::Parser;
use extags::output::{write_kind_list, write_language_map, write_tags};
use extags::{Configuration, OutputFormat, index_files, logging, walk};
use scanner::{ELIXIR, IdentifierPolicy, KeywordSet, ScanOptions, Scanner, ScopeMode};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "extags",
    about = "Generate a tag index for Elixir sources",
    version
)]
struct Cli {
    /// Files or directories to index
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Where to write tags; `-` writes to stdout
    #[arg(short = 'f', long = "output", value_name = "FILE", default_value = "tags")]
    output: PathBuf,

    /// Output format (default: ctags)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Kind letters to emit, e.g. `fm` or `-r+p`
    #[arg(long, value_name = "SPEC", allow_hyphen_values = true)]
    kinds: Option<String>,

    /// Directive keywords to recognise: baseline or extended
    #[arg(long)]
    keywords: Option<KeywordSet>,

    /// Attach the enclosing module to functions: none or module
    #[arg(long)]
    scope: Option<ScopeMode>,

    /// Identifier characters: predicate (`?` `!`) or dotted (`.`)
    #[arg(long)]
    identifiers: Option<IdentifierPolicy>,

    /// Configuration file (default: ./extags.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep tags in discovery order
    #[arg(long)]
    no_sort: bool,

    /// Print the kind table and exit
    #[arg(long)]
    list_kinds: bool,

    /// Print the handled file extensions and exit
    #[arg(long)]
    list_maps: bool,

    /// More logging, repeatable
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let configuration = match &cli.config {
        Some(path) => Configuration::load(path)?,
        None => Configuration::discover(Path::new("."))?,
    };

    let level = match cli.verbose {
        0 => configuration.log_level()?.unwrap_or(logging::level_from_verbosity(0)),
        verbose => logging::level_from_verbosity(verbose),
    };
    logging::init(level)?;

    let options = scan_options(&cli, &configuration)?;

    if cli.list_kinds || cli.list_maps {
        let mut stdout = io::stdout().lock();
        if cli.list_kinds {
            write_kind_list(&mut stdout, &ELIXIR, &options.kinds)?;
        }
        if cli.list_maps {
            write_language_map(&mut stdout, &ELIXIR)?;
        }
        return Ok(());
    }

    let scanner = Scanner::new(options);
    let sources = walk::collect_sources(&cli.paths, &ELIXIR);
    tracing::info!("Found {} source files", sources.len());

    let index = index_files(&scanner, sources);
    let sort = !cli.no_sort && configuration.output.sort.unwrap_or(true);
    let entries = if sort {
        index.tags.sorted(&index.files)
    } else {
        index.tags.entries().to_vec()
    };
    let format = cli
        .format
        .or(configuration.output.format)
        .unwrap_or_default();

    if cli.output.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        write_tags(&mut stdout, format, &index.files, &entries, sort)?;
        stdout.flush()?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("Failed to create {}", cli.output.display()))?;
        let mut writer = BufWriter::new(file);
        write_tags(&mut writer, format, &index.files, &entries, sort)
            .with_context(|| format!("Failed to write {}", cli.output.display()))?;
        writer.flush()?;
    }

    tracing::info!("Wrote {} tags", entries.len());
    Ok(())
}

/// Configuration file values, overridden by whatever was given on the
/// command line.
fn scan_options(cli: &Cli, configuration: &Configuration) -> anyhow::Result<ScanOptions> {
    let mut options = configuration.scan_options()?;

    if let Some(keywords) = cli.keywords {
        options.keywords = keywords;
    }
    if let Some(scope) = cli.scope {
        options.scope = scope;
    }
    if let Some(identifiers) = cli.identifiers {
        options.identifiers = identifiers;
    }
    if let Some(spec) = &cli.kinds {
        options
            .kinds
            .apply_spec(spec)
            .with_context(|| format!("Invalid --kinds {spec:?}"))?;
    }

    Ok(options)
}
