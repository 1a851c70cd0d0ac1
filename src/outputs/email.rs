//! HTML email rendering.
//!
//! The body is one self-contained document: an inline stylesheet, a header
//! with the keyword and run time, a result-count line, keyword badges, one
//! card per article, and a footer. An empty run renders a dedicated
//! empty-state block instead of cards; suppressing the send entirely is the
//! caller's decision, not the renderer's.

use chrono::Local;

use crate::analyze::summarize;
use crate::models::{RecencyCriterion, RunResult};

const STYLE: &str = r#"
  body { font-family: -apple-system, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
         line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto;
         padding: 20px; background-color: #f5f5f5; }
  .header { background: #2d5c88; color: white; padding: 24px; border-radius: 8px;
            margin-bottom: 20px; }
  .header h1 { margin: 0; font-size: 24px; }
  .header p { margin: 8px 0 0 0; opacity: 0.9; }
  .summary { background: #f8f9fa; padding: 16px; border-radius: 8px;
             margin-bottom: 20px; border-left: 4px solid #2d5c88; }
  .keywords { background: white; padding: 16px; border-radius: 8px;
              margin-bottom: 20px; }
  .badge { display: inline-block; background: #e3f2fd; color: #1976d2;
           padding: 4px 12px; border-radius: 12px; font-size: 13px; margin: 3px; }
  .article { background: white; border: 1px solid #e0e0e0; border-radius: 8px;
             padding: 18px; margin-bottom: 16px; }
  .article-title { font-size: 17px; font-weight: 600; margin-bottom: 10px; }
  .article-title a { color: #2d5c88; text-decoration: none; }
  .article-summary { background: #f0f4ff; padding: 10px; border-radius: 6px;
                     font-size: 14px; margin-bottom: 8px; }
  .article-description { color: #666; margin-bottom: 8px; }
  .article-meta { font-size: 13px; color: #999; }
  .no-news { text-align: center; padding: 48px 20px; color: #999;
             background: white; border-radius: 8px; }
  .footer { margin-top: 32px; padding-top: 16px; border-top: 1px solid #e0e0e0;
            text-align: center; color: #999; font-size: 13px; }
"#;

/// Subject line for the notification.
pub fn subject(keyword: &str, kept_count: usize) -> String {
    let noun = if kept_count == 1 { "article" } else { "articles" };
    format!("[newsdrop] {keyword}: {kept_count} fresh {noun}")
}

/// Render the run result into a complete HTML document.
pub fn render(
    result: &RunResult,
    keyword: &str,
    keywords: &[(String, usize)],
    criterion: &RecencyCriterion,
) -> String {
    let generated = criterion
        .reference_instant
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M");

    let mut html = format!(
        r#"<html>
<head><meta charset="utf-8"><style>{STYLE}</style></head>
<body>
  <div class="header">
    <h1>&#128240; {keyword}</h1>
    <p>Articles from the last {lookback} hours, as of {generated}</p>
  </div>
  <div class="summary">
    <strong>{count}</strong> new {noun} found.
  </div>
"#,
        keyword = escape_html(keyword),
        lookback = criterion.lookback_hours,
        count = result.kept_count,
        noun = if result.kept_count == 1 {
            "article"
        } else {
            "articles"
        },
    );

    if !keywords.is_empty() {
        html.push_str("  <div class=\"keywords\">\n    <strong>Keywords:</strong>\n");
        for (token, _) in keywords {
            html.push_str(&format!(
                "    <span class=\"badge\">{}</span>\n",
                escape_html(token)
            ));
        }
        html.push_str("  </div>\n");
    }

    if result.articles.is_empty() {
        html.push_str(
            "  <div class=\"no-news\">\n    <p>No new articles in this window.</p>\n  </div>\n",
        );
    } else {
        for (index, article) in result.articles.iter().enumerate() {
            let lead = summarize(&format!("{}. {}", article.title, article.summary), 2);
            let published = article
                .published_at
                .map(|ts| {
                    ts.with_timezone(&Local)
                        .format("%a, %d %b %Y %H:%M")
                        .to_string()
                })
                .unwrap_or_default();

            html.push_str(&format!(
                r#"  <div class="article">
    <div class="article-title">
      <strong>{number}.</strong> <a href="{link}">{title}</a>
    </div>
    <div class="article-summary">{lead}</div>
    <div class="article-description">{description}</div>
    <div class="article-meta">&#128336; {published}</div>
  </div>
"#,
                number = index + 1,
                link = escape_html(&article.link),
                title = escape_html(&article.title),
                lead = escape_html(&lead),
                description = escape_html(&article.summary),
            ));
        }
    }

    html.push_str(
        r#"  <div class="footer">
    <p>Sent automatically by newsdrop.</p>
  </div>
</body>
</html>
"#,
    );
    html
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
