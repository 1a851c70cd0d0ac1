//! Command-line interface definitions.
//!
//! Every option can be supplied as a flag or an environment variable, so
//! the binary drops into a cron job or CI schedule without a wrapper
//! script. Credentials are env-only in practice; the flags exist for local
//! testing.

use clap::Parser;

/// Command-line arguments for one run.
///
/// # Examples
///
/// ```sh
/// # Search and email (credentials from the environment)
/// newsdrop --keyword "welcome savings bank" --mail-to reader@example.com \
///     --mail-from "News Bot <bot@example.com>"
///
/// # Inspect the rendered email without sending
/// newsdrop --keyword "welcome savings bank" --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Keyword to search the news API for
    #[arg(short, long, env = "NEWS_KEYWORD")]
    pub keyword: String,

    /// Trailing window, in hours, an article must fall within.
    /// Keep this at or above the scheduling interval so runs overlap.
    #[arg(long, env = "LOOKBACK_HOURS", default_value_t = 2,
          value_parser = clap::value_parser!(i64).range(1..))]
    pub lookback_hours: i64,

    /// Results requested per page (the API caps this at 100)
    #[arg(long, default_value_t = 100,
          value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: u32,

    /// Ceiling on pages fetched per run
    #[arg(long, default_value_t = 3,
          value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_pages: u32,

    /// Base URL of the news search endpoint
    #[arg(long, env = "NEWS_API_URL",
          default_value = "https://openapi.naver.com/v1/search/news.json")]
    pub api_url: String,

    /// Search API client id
    #[arg(long, env = "NEWS_CLIENT_ID", hide_env_values = true)]
    pub client_id: String,

    /// Search API client secret
    #[arg(long, env = "NEWS_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Timeout for each page fetch, in seconds
    #[arg(long, default_value_t = 15)]
    pub fetch_timeout_secs: u64,

    /// Recipient address
    #[arg(long, env = "MAIL_TO", required_unless_present = "dry_run")]
    pub mail_to: Option<String>,

    /// Sender address, e.g. "News Bot <bot@example.com>"
    #[arg(long, env = "MAIL_FROM", required_unless_present = "dry_run")]
    pub mail_from: Option<String>,

    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP relay port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP login user
    #[arg(long, env = "SMTP_USERNAME", required_unless_present = "dry_run")]
    pub smtp_username: Option<String>,

    /// SMTP login password (an app password, not the account password)
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true,
          required_unless_present = "dry_run")]
    pub smtp_password: Option<String>,

    /// Print the rendered email to stdout instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip sending when no articles survive filtering
    #[arg(long)]
    pub skip_empty: bool,
}
