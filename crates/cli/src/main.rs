use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use owo_colors::OwoColorize;
use tempora_core::{fetch_url, find_date_with_config, FetchConfig, FinderConfig};

mod echo;
use echo::{format_size, print_banner, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract the publication or last-modification date of a web page
#[derive(Parser, Debug)]
#[command(name = "tempora")]
#[command(author = "Tempora Contributors")]
#[command(version = VERSION)]
#[command(about = "Extract publication dates from web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Look for the original publication date instead of the most recent one
    #[arg(long)]
    original: bool,

    /// Skip the slow fallback stages (body text scan, whole-page search)
    #[arg(long)]
    fast: bool,

    /// strftime-style template for the printed date
    #[arg(short, long, default_value = "%Y-%m-%d", value_name = "FORMAT")]
    format: String,

    /// Source URL of the document (useful with file or stdin input)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Earliest acceptable date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    min_date: Option<String>,

    /// Latest acceptable date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    max_date: Option<String>,

    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_bound(value: &str, flag: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").with_context(|| format!("{} must be YYYY-MM-DD, got {:?}", flag, value))
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tempora_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        init_logging();
        eprintln!();
    }

    let (html, size) = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        let len = buffer.len();
        (buffer, len)
    } else if args.input.starts_with("http://") || args.input.starts_with("https://") {
        if args.verbose {
            print_step(1, 3, &format!("Fetching from {}", args.input));
        }

        let config = FetchConfig {
            timeout: args.timeout,
            user_agent: args
                .user_agent
                .unwrap_or_else(|| FetchConfig::default().user_agent),
        };

        let content = fetch_url(&args.input, &config).await.context("Failed to fetch URL")?;
        let len = content.len();
        (content, len)
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input));
        }
        let content =
            fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        let len = content.len();
        (content, len)
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(size).bright_white());
        eprintln!();
        print_step(2, 3, "Scanning for dates");
    }

    // A URL given on the command line doubles as the document's source URL
    // unless --url overrides it.
    let source_url = args.url.clone().or_else(|| {
        (args.input.starts_with("http://") || args.input.starts_with("https://")).then(|| args.input.clone())
    });

    let config = FinderConfig {
        extensive: !args.fast,
        prefer_original: args.original,
        output_format: args.format.clone(),
        url: source_url,
        min_date: args.min_date.as_deref().map(|v| parse_bound(v, "--min-date")).transpose()?,
        max_date: args.max_date.as_deref().map(|v| parse_bound(v, "--max-date")).transpose()?,
        use_cache: true,
    };

    let found = find_date_with_config(&html, &config).context("Date extraction failed")?;

    if args.verbose {
        print_step(3, 3, "Writing output");
        eprintln!();
    }

    let rendered = if args.json {
        let value = serde_json::json!({
            "date": found,
            "input": args.input,
            "format": args.format,
            "original": args.original,
        });
        format!("{}\n", serde_json::to_string_pretty(&value)?)
    } else {
        match &found {
            Some(date) => format!("{}\n", date),
            None => String::new(),
        }
    };

    if found.is_none() && !args.json {
        print_warning("no date found");
        std::process::exit(1);
    }

    match args.output {
        Some(path) => {
            fs::write(&path, rendered).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            if args.verbose {
                print_success(&format!("Output written to {}", path.display()));
            }
        }
        None => {
            print!("{}", rendered);
        }
    }

    Ok(())
}
