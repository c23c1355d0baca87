//! Auto-refreshing HTML dashboard

use super::renderer::{ensure_parent_dir, RenderError, SnapshotRenderer};
use crate::aggregator_core::Snapshot;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Seconds between browser refreshes
pub const REFRESH_SECS: u32 = 3;

const MAX_CATEGORY_ROWS: usize = 8;

const STYLE: &str = r#"    <style>
        body {
            font-family: 'Segoe UI', Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
        }
        .container {
            max-width: 1400px;
            margin: 0 auto;
            background: rgba(255,255,255,0.95);
            padding: 30px;
            border-radius: 15px;
            color: #2c3e50;
            box-shadow: 0 20px 40px rgba(0,0,0,0.3);
        }
        h1 { text-align: center; margin-bottom: 10px; font-size: 2.5em; }
        .verse { text-align: center; font-style: italic; color: #7f8c8d; margin-bottom: 20px; font-size: 1.2em; }
        .stats {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin: 30px 0;
        }
        .stat {
            padding: 25px 20px;
            border-radius: 12px;
            text-align: center;
            color: white;
            font-weight: bold;
            box-shadow: 0 8px 16px rgba(0,0,0,0.2);
        }
        .gospel { background: linear-gradient(45deg, #27ae60, #2ecc71); }
        .bold { background: linear-gradient(45deg, #f39c12, #e67e22); }
        .opportunity { background: linear-gradient(45deg, #e74c3c, #c0392b); }
        .authors { background: linear-gradient(45deg, #9b59b6, #8e44ad); }
        .total { background: linear-gradient(45deg, #34495e, #2c3e50); }
        .stat-number { font-size: 3em; display: block; margin-bottom: 5px; }
        .stat-label { font-size: 1.1em; }
        .chart-container { text-align: center; margin: 30px 0; }
        .chart { max-width: 100%; border-radius: 15px; box-shadow: 0 10px 20px rgba(0,0,0,0.2); }
        .categories { margin: 0 auto; border-collapse: collapse; }
        .categories td, .categories th { padding: 6px 18px; border-bottom: 1px solid #ddd; }
        .inspiration {
            background: linear-gradient(45deg, #3498db, #2980b9);
            color: white;
            padding: 20px;
            border-radius: 12px;
            margin: 25px 0;
            text-align: center;
            font-size: 1.3em;
        }
        .footer { text-align: center; color: #7f8c8d; margin-top: 30px; font-size: 1.1em; }
    </style>
"#;

/// Render the dashboard page for a snapshot
///
/// Output depends only on the arguments: the same snapshot and `generated_at`
/// always produce the same bytes. `generated_at` feeds the cache-busting query
/// on the chart URL and the "Last updated" footer.
pub fn render_dashboard_html(
    snapshot: &Snapshot,
    image_src: &str,
    generated_at: DateTime<Local>,
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <title>Gospel Message Dashboard - Be Bold in Faith!</title>\n");
    let _ = writeln!(html, "    <meta http-equiv=\"refresh\" content=\"{}\">", REFRESH_SECS);
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n    <div class=\"container\">\n");
    html.push_str("        <h1>Gospel Message Analysis Dashboard</h1>\n");
    html.push_str("        <div class=\"verse\">\"Therefore go and make disciples of all nations...\" - Matthew 28:19</div>\n");
    html.push_str("        <div class=\"inspiration\"><strong>Be Bold Like Charlie Kirk!</strong> Every message is an opportunity to share the Gospel!</div>\n");

    html.push_str("        <div class=\"stats\">\n");
    push_stat(&mut html, "total", snapshot.total_count.to_string(), "Total Messages");
    push_stat(
        &mut html,
        "gospel",
        snapshot.gospel_count.to_string(),
        &format!("Gospel Messages<br>({:.1}% rate)", snapshot.gospel_rate()),
    );
    push_stat(&mut html, "bold", snapshot.bold_count.to_string(), "Bold Witness");
    push_stat(
        &mut html,
        "opportunity",
        snapshot.opportunity_count.to_string(),
        "Evangelistic Opportunities",
    );
    push_stat(
        &mut html,
        "authors",
        snapshot.distinct_authors.to_string(),
        "Gospel Sharers",
    );
    html.push_str("        </div>\n");

    let _ = writeln!(
        html,
        "        <div class=\"chart-container\">\n            <img src=\"{}?v={}\" class=\"chart\" alt=\"Gospel Analysis Chart\">\n        </div>",
        escape_html(image_src),
        generated_at.timestamp()
    );

    if !snapshot.category_counts.is_empty() {
        push_category_table(&mut html, snapshot);
    }

    html.push_str("        <div class=\"inspiration\"><strong>Keep sharing boldly!</strong> \"How beautiful are the feet of those who bring good news!\" - Romans 10:15</div>\n");
    let _ = writeln!(
        html,
        "        <div class=\"footer\"><em>Last updated: {} | Be outspoken in your faith!</em></div>",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    html.push_str("    </div>\n</body>\n</html>\n");

    html
}

fn push_stat(html: &mut String, class: &str, number: String, label: &str) {
    let _ = writeln!(
        html,
        "            <div class=\"stat {}\">\n                <span class=\"stat-number\">{}</span>\n                <span class=\"stat-label\">{}</span>\n            </div>",
        class, number, label
    );
}

fn push_category_table(html: &mut String, snapshot: &Snapshot) {
    let mut categories: Vec<(&String, &u64)> = snapshot.category_counts.iter().collect();
    categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    html.push_str("        <table class=\"categories\">\n");
    html.push_str("            <tr><th>Category</th><th>Gospel Messages</th></tr>\n");
    for (category, count) in categories.into_iter().take(MAX_CATEGORY_ROWS) {
        let _ = writeln!(
            html,
            "            <tr><td>{}</td><td>{}</td></tr>",
            escape_html(category),
            count
        );
    }
    html.push_str("        </table>\n");
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Chart URL as seen from the dashboard's directory
fn relative_image_src(dashboard_path: &Path, chart_path: &Path) -> String {
    let relative = dashboard_path
        .parent()
        .and_then(|dir| chart_path.strip_prefix(dir).ok())
        .unwrap_or(chart_path);
    relative.to_string_lossy().replace('\\', "/")
}

pub struct HtmlDashboardWriter {
    path: PathBuf,
    image_src: String,
}

impl HtmlDashboardWriter {
    pub fn new(path: PathBuf, chart_path: &Path) -> std::io::Result<Self> {
        ensure_parent_dir(&path)?;
        let image_src = relative_image_src(&path, chart_path);

        log::info!("📝 Writing dashboard to: {}", path.display());
        Ok(Self { path, image_src })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image_src(&self) -> &str {
        &self.image_src
    }
}

#[async_trait]
impl SnapshotRenderer for HtmlDashboardWriter {
    async fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        let html = render_dashboard_html(snapshot, &self.image_src, Local::now());

        // Write beside the target and rename so a refreshing browser never sees a half page
        let staging = self.path.with_extension("html.tmp");
        tokio::fs::write(&staging, html.as_bytes()).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        log::debug!("Dashboard updated: {}", self.path.display());
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "HTML"
    }
}
