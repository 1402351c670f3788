//! TweetKit CLI - Command-line interface for the PARSE_TWEET action

mod mcp;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tweetkit::{
    Action, ActionResult, HttpPostClient, Message, ParsePostAction, RateLimitConfig,
    ScraperConfig, TweetKitError, ACTION_LLMTXT, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS,
};

/// TweetKit - parse tweet URLs into structured tweet details
#[derive(Parser, Debug)]
#[command(name = "tweetkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether text contains a tweet URL (no network access)
    Validate {
        /// Message text
        text: String,
    },
    /// Fetch the tweet referenced in the text and print it as JSON
    Parse {
        /// Message text
        text: String,

        #[command(flatten)]
        service: ServiceArgs,
    },
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp {
        #[command(flatten)]
        service: ServiceArgs,
    },
}

/// Scraping service connection and session settings
#[derive(Args, Debug)]
struct ServiceArgs {
    /// Base URL of the scraping service
    #[arg(long, env = "TWEETKIT_BASE_URL")]
    base_url: String,

    /// Account handle for login
    #[arg(long, env = "TWITTER_USERNAME")]
    username: Option<String>,

    /// Account password for login
    #[arg(long, env = "TWITTER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Account email (accepted, unused by login)
    #[arg(long, env = "TWITTER_EMAIL")]
    email: Option<String>,

    /// Serialized session cookies (takes precedence over login)
    #[arg(long, env = "TWITTER_COOKIES", hide_env_values = true)]
    cookies: Option<String>,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Requests admitted per rate-limit window
    #[arg(long, default_value_t = DEFAULT_MAX_REQUESTS)]
    max_requests: u32,

    /// Rate-limit window in milliseconds
    #[arg(long, default_value_t = DEFAULT_WINDOW_MS)]
    window_ms: u64,
}

impl ServiceArgs {
    fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
            cookies: self.cookies.clone(),
        }
    }

    fn build_action(&self) -> Result<ParsePostAction, TweetKitError> {
        let mut builder = HttpPostClient::builder(&self.base_url);
        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        let client = builder.build()?;

        Ok(ParsePostAction::builder(Arc::new(client))
            .config(self.scraper_config())
            .rate_limit_config(RateLimitConfig {
                max_requests: self.max_requests,
                window_ms: self.window_ms,
            })
            .build())
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(ACTION_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Validate { text }) => {
            let valid = tweetkit::is_post_url(&text);
            writeln_safe(if valid { "true" } else { "false" });
            std::process::exit(if valid { 0 } else { 1 });
        }
        Some(Commands::Parse { text, service }) => {
            let action = build_action_or_exit(&service);
            run_parse(&action, &text).await;
        }
        Some(Commands::Mcp { service }) => {
            let action = build_action_or_exit(&service);
            mcp::run_server(Arc::new(action)).await;
        }
        None => {
            eprintln!("Usage: tweetkit parse <TEXT> --base-url <URL>");
            eprintln!("   or: tweetkit validate <TEXT>");
            eprintln!("   or: tweetkit mcp --base-url <URL>");
            eprintln!("   or: tweetkit --help");
            std::process::exit(1);
        }
    }
}

/// Log to stderr so stdout carries only command output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_action_or_exit(service: &ServiceArgs) -> ParsePostAction {
    service.build_action().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    })
}

async fn run_parse(action: &ParsePostAction, text: &str) {
    let result = action.handle(&Message::text(text), None).await;
    writeln_safe(&render_result(&result));
    if !result.is_success() {
        std::process::exit(1);
    }
}

/// Pretty JSON for an action result
fn render_result(result: &ActionResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    })
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
