//! bookclean - book web pages to clean text

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use bookclean::export::{self, ExportFormat};
use bookclean::{
    BookStructure, CancelToken, CleanedText, Cleaner, CrawlOptions, Crawler, HttpFetcher, Options,
    Outcome, Progress, Strategy, TextStats,
};

#[derive(Parser)]
#[command(name = "bookclean")]
#[command(version, about = "Extract clean book text from web pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookclean page https://www.gutenberg.org/files/2000/2000-h/2000-h.htm
    bookclean page book.html --format markdown --out books/
    bookclean wikisource https://es.wikisource.org/wiki/Don_Quijote --concurrency 4")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a single page from a URL or a local file
    Page {
        /// URL or path of an HTML or plain-text file
        #[arg(value_name = "URL|FILE")]
        input: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Crawl a Wikisource work from its index page
    Wikisource {
        /// Index page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Attempts per page before giving up
        #[arg(long, default_value_t = 3)]
        retries: u32,

        /// Chapters fetched at the same time
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Leave out chapters that cannot be fetched instead of failing
        #[arg(long)]
        skip_failed: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Drop short lines likely to be debris
    #[arg(long)]
    aggressive: bool,

    /// Collapse <br> line breaks inside paragraphs
    #[arg(long)]
    no_line_breaks: bool,

    /// Treat <pre> as ordinary paragraphs
    #[arg(long)]
    no_preformatted: bool,

    /// Do not detect poetry blocks
    #[arg(long)]
    no_poetry: bool,

    /// Cleaning strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Dom)]
    strategy: StrategyArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Txt)]
    format: FormatArg,

    /// Directory to write the result to (stdout when absent)
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print structure and statistics as JSON instead of the text
    #[arg(long)]
    json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Dom,
    Lines,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Txt,
    Html,
    Markdown,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Txt => Self::Text,
            FormatArg::Html => Self::Html,
            FormatArg::Markdown => Self::Markdown,
        }
    }
}

impl OutputArgs {
    fn options(&self) -> Options {
        Options {
            keep_line_breaks: !self.no_line_breaks,
            preserve_preformatted: !self.no_preformatted,
            detect_poetry: !self.no_poetry,
            aggressive: self.aggressive,
            strategy: match self.strategy {
                StrategyArg::Dom => Strategy::Dom,
                StrategyArg::Lines => Strategy::LineFilter,
            },
            ..Options::default()
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    structure: &'a BookStructure,
    stats: TextStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    chapters: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Page { input, output } => run_page(input, output),
        Command::Wikisource { url, retries, concurrency, skip_failed, output } => {
            let crawl = CrawlOptions {
                timeout: output.timeout(),
                max_attempts: *retries,
                concurrency: *concurrency,
                skip_failed_chapters: *skip_failed,
                ..CrawlOptions::default()
            };
            run_wikisource(url, crawl, output)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn report_progress(p: Progress) {
    eprintln!("[{:>3}%] {}: {}", p.percent, p.phase, p.message);
}

fn run_page(input: &str, args: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cleaner = Cleaner::new(args.options());

    let outcome = if input.starts_with("http://") || input.starts_with("https://") {
        let fetcher = HttpFetcher::new()?;
        cleaner.clean_url(&fetcher, input, args.timeout(), &mut report_progress)?
    } else {
        let bytes = fs::read(input)?;
        if is_plain_text(Path::new(input)) {
            cleaner.clean_text(&bookclean::decode_bytes(&bytes))
        } else {
            cleaner.clean_bytes(&bytes)
        }
    };

    match outcome {
        Outcome::Content(page) => emit(&page.text, &page.structure, None, args),
        Outcome::Empty => {
            eprintln!("no text found in {input}");
            Ok(())
        }
    }
}

fn run_wikisource(url: &str, crawl: CrawlOptions, args: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !bookclean::is_wikisource_url(url) {
        log::warn!("{url} does not look like a Wikisource page");
    }
    let cleaner = Cleaner::new(args.options());
    let fetcher = HttpFetcher::new()?;
    let crawler = Crawler::new(&fetcher, &cleaner, crawl);

    match crawler.crawl(url, &mut report_progress, &CancelToken::new())? {
        Outcome::Content(work) => emit(&work.text, &work.structure, Some(work.chapters.len()), args),
        Outcome::Empty => {
            eprintln!("no chapters found at {url}");
            Ok(())
        }
    }
}

fn is_plain_text(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

fn emit(
    text: &CleanedText,
    structure: &BookStructure,
    chapters: Option<usize>,
    args: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        let report = Report { structure, stats: TextStats::from_text(text.as_str()), chapters };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let format = ExportFormat::from(args.format);
    let rendered = export::render(format, text.as_str(), structure);
    match &args.out {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let now = chrono::Local::now().naive_local();
            let path = dir.join(export::suggested_file_name(structure, format, &now));
            fs::write(&path, rendered)?;
            eprintln!("saved {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
