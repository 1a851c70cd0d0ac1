//! # newsdrop
//!
//! A keyword news watcher. Each invocation searches a news API for a fixed
//! keyword, keeps the articles published inside a trailing window,
//! deduplicates the survivors, and emails them as an HTML digest.
//!
//! ## Usage
//!
//! ```sh
//! newsdrop --keyword "welcome savings bank" --mail-to reader@example.com \
//!     --mail-from "News Bot <bot@example.com>"
//! ```
//!
//! ## Architecture
//!
//! The application is a single stateless pipeline, run once per invocation
//! by an external scheduler (cron, CI timer):
//! 1. **Aggregate**: fetch result pages sequentially up to a page ceiling
//! 2. **Filter**: keep articles published inside the lookback window
//! 3. **Dedupe**: drop repeated links and repeated headlines
//! 4. **Notify**: render the survivors to HTML and send over SMTP
//!
//! Nothing persists between runs; a skipped run is covered by the next one
//! as long as the lookback window is at least the scheduling interval.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod analyze;
mod api;
mod cli;
mod dedupe;
mod filter;
mod mailer;
mod models;
mod outputs;
mod pipeline;
mod pubdate;
mod utils;

use aggregate::Aggregator;
use api::SearchClient;
use cli::Cli;
use mailer::{Mailer, SmtpSettings};
use models::{RecencyCriterion, SearchWindow};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsdrop starting up");

    let args = Cli::parse();
    debug!(
        keyword = %args.keyword,
        lookback_hours = args.lookback_hours,
        page_size = args.page_size,
        max_pages = args.max_pages,
        "parsed CLI arguments"
    );

    // One reference instant for the whole run; every article is judged
    // against the same cutoff.
    let reference_instant = Utc::now();
    let criterion = RecencyCriterion {
        reference_instant,
        lookback_hours: args.lookback_hours,
    };
    let window = SearchWindow::new(args.keyword.clone(), args.page_size, args.max_pages);

    let client = SearchClient::new(
        &args.api_url,
        &args.client_id,
        &args.client_secret,
        Duration::from_secs(args.fetch_timeout_secs),
    )?;
    let aggregator = Aggregator::new(client);

    let result = match pipeline::run(&aggregator, &window, &criterion).await {
        Ok(result) => result,
        Err(e) => {
            // A truncated result set must never be passed off as complete,
            // so nothing is sent on failure.
            error!(error = %e, "run aborted; no notification will be sent");
            return Err(e.into());
        }
    };
    info!(
        fetched = result.fetched_count,
        kept = result.kept_count,
        "pipeline finished"
    );

    if result.kept_count == 0 && args.skip_empty {
        info!("no fresh articles and --skip-empty set; suppressing notification");
        return Ok(());
    }

    let keywords = analyze::extract_keywords(&result.articles, 5);
    if !keywords.is_empty() {
        let tokens: Vec<&str> = keywords.iter().map(|(token, _)| token.as_str()).collect();
        debug!(?tokens, "extracted keywords");
    }

    let subject = outputs::email::subject(&args.keyword, result.kept_count);
    let body = outputs::email::render(&result, &args.keyword, &keywords, &criterion);

    if args.dry_run {
        info!("dry run; printing rendered email body");
        println!("{body}");
    } else {
        let (Some(username), Some(password), Some(from), Some(to)) = (
            args.smtp_username.clone(),
            args.smtp_password.clone(),
            args.mail_from.clone(),
            args.mail_to.clone(),
        ) else {
            error!("SMTP credentials and addresses are required unless --dry-run is set");
            return Err("missing SMTP configuration".into());
        };

        let mailer = Mailer::new(&SmtpSettings {
            host: args.smtp_host.clone(),
            port: args.smtp_port,
            username,
            password,
            from,
            to,
        })?;
        mailer.send(&subject, body).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "run complete"
    );

    Ok(())
}
