mod batch;
mod config;

use config::Config;

use clap::Parser;
use colored::{control::set_override, Colorize};
use timeutils_core::TimeUtils;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::batch::Response;

const LONG_ABOUT: &str = r##"
timeutils calls pure timestamp functions by name. Every timestamp argument
must be RFC3339 text such as 2024-01-15T10:30:00Z or 2024-01-15T10:30:00-08:00.

FUNCTIONS:
  unix_timestamp  TIMESTAMP          Seconds since 1970-01-01T00:00:00Z
  strftime        FORMAT TIMESTAMP   Render with strftime directives
  days_difference START END          Whole days from START to END (toward zero)
  parse_rfc3339   TIMESTAMP          Calendar components as a JSON object

EXAMPLES:
  timeutils unix_timestamp 2024-01-15T10:30:00-08:00
  timeutils strftime '%A, %B %d, %Y' 2024-01-15T10:30:00Z
  timeutils days_difference 2024-01-15T10:30:00Z 2024-01-20T10:30:00Z
  timeutils parse_rfc3339 2024-01-15T10:30:45Z
  timeutils --json strftime -%Y- 2024-01-15T10:30:00Z

  Options go before FUNCTION; everything after it is passed to the function.

BATCH MODE:
  Read one JSON request per line from stdin and write one JSON response per line:
    echo '{"function":"unix_timestamp","arguments":["2024-01-15T10:30:00Z"]}' | timeutils --batch
  Exits with status 1 if any request failed.

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting   | CLI flag        | Env var             | Default
  ----------|-----------------|---------------------|---------
  json      | -j, --json      | TIMEUTILS_JSON      | false
  no_color  | -C, --no-color  | TIMEUTILS_NO_COLOR  | false

  Config file location: timeutils --config-path
  Generate default config: timeutils --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "timeutils")]
#[command(version)]
#[command(about = "Call RFC3339 timestamp functions by name")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The function to call (see --functions)
    #[arg(value_name = "FUNCTION")]
    function: Option<String>,

    /// Ordered arguments passed to the function
    ///
    /// Arguments may start with '-' (e.g. a strftime format of -%Y-), so
    /// options must come before FUNCTION.
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// List all registered functions
    ///
    /// With --json, prints the full provider schema instead.
    #[arg(long, short = 'f')]
    functions: bool,

    /// Read JSON-lines requests from stdin
    #[arg(long, short = 'b')]
    batch: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the config file path
    #[arg(long)]
    config_path: bool,

    /// Create a default config file
    #[arg(long)]
    config_init: bool,
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!(
                    "{}: Cannot determine config directory",
                    "error".red().bold()
                );
                std::process::exit(1);
            }
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Initialize tracing based on verbosity level (before config loading for logging).
    // RUST_LOG alone also installs the subscriber.
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF || std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let json = if cli.json {
        tracing::debug!("json = true (from CLI)");
        true
    } else {
        let json = file_config.json();
        tracing::debug!("json = {} (from env/config/default)", json);
        json
    };

    let no_color = if cli.no_color {
        tracing::debug!("no_color = true (from CLI)");
        true
    } else {
        let no_color = file_config.no_color();
        tracing::debug!("no_color = {} (from env/config/default)", no_color);
        no_color
    };
    if no_color {
        set_override(false);
    }

    let provider = TimeUtils::new(env!("CARGO_PKG_VERSION"));

    if cli.functions {
        print_functions(&provider, json);
        return;
    }

    if cli.batch {
        match batch::run_batch_mode(&provider) {
            Ok(0) => {}
            Ok(failures) => {
                tracing::debug!("batch: {} request(s) failed", failures);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("{}: Failed to process stdin: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    let Some(function) = cli.function.as_deref() else {
        eprintln!("{}: No function given", "error".red().bold());
        eprintln!(
            "{}",
            "Use --functions to list functions, or --help for usage.".dimmed()
        );
        std::process::exit(1);
    };

    let args: Vec<&str> = cli.args.iter().map(String::as_str).collect();

    if json {
        let response = Response::from_call(&provider, function, &args);
        match serde_json::to_string_pretty(&response) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
        }
        if response.is_error() {
            std::process::exit(1);
        }
        return;
    }

    match provider.call(function, &args) {
        Ok(result) => println!("{}", result),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            if provider.function(function).is_none() {
                eprintln!(
                    "{}",
                    "Use --functions to list available functions.".dimmed()
                );
            }
            std::process::exit(1);
        }
    }
}

fn print_functions(provider: &TimeUtils, json: bool) {
    if json {
        match serde_json::to_string_pretty(&provider.schema()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    let meta = provider.metadata();
    println!(
        "{} {}",
        "Functions".bold().underline(),
        format!("({} v{})", meta.type_name, meta.version).dimmed()
    );
    println!();

    for function in provider.functions() {
        let def = &function.definition;
        println!("{} {}", "▶".blue(), def.signature().green().bold());
        println!("    {}", def.summary);
        for param in def.parameters {
            println!("    {} {} - {}", "→".cyan(), param.name.yellow(), param.description);
        }
        println!();
    }
}
