//! Gospel Consumer Binary - JSONL Message Analyzer
//!
//! Tails the producer's JSONL file, scores each message for gospel content and
//! republishes the chart and HTML dashboard after every message.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin gospel_consumer
//! ```
//!
//! ## Environment Variables
//!
//! - GOSPEL_DATA_FILE - JSONL file written by the producer (default: data/project_live.json)
//! - GOSPEL_CHART_PATH - PNG chart output (default: charts/gospel_analysis.png)
//! - GOSPEL_DASHBOARD_PATH - HTML dashboard output (default: gospel_dashboard.html)
//! - POLL_INTERVAL_MS - How often to check the data file (default: 1000)
//! - ROLLING_CAPACITY - Points kept in the score/impact time series (default: 100)
//! - RUST_LOG - Logging level (optional, default: info)

use gospelflow::aggregator_core::{GospelAggregator, TailReader};
use gospelflow::config::ConsumerConfig;
use gospelflow::consumer::GospelConsumer;
use gospelflow::dashboard::DashboardPublisher;
use tokio::time::{interval, MissedTickBehavior};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = ConsumerConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.rust_log))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("🚀 Starting Gospel Message Analyzer Consumer");
    log::info!("   Data file: {}", config.data_file.display());
    log::info!("   Chart: {}", config.chart_path.display());
    log::info!("   Dashboard: {}", config.dashboard_path.display());
    log::info!("   Poll interval: {}ms", config.poll_interval.as_millis());
    log::info!("   Rolling capacity: {}", config.rolling_capacity);

    let publisher =
        DashboardPublisher::with_chart_and_html(config.chart_path.clone(), config.dashboard_path.clone())?;
    log::info!("📊 Backends: {}", publisher.backend_types().join(", "));

    let mut consumer = GospelConsumer::new(GospelAggregator::new(config.rolling_capacity), publisher);
    let mut reader = TailReader::new(config.data_file.clone());

    if !config.data_file.exists() {
        log::info!(
            "⏳ Data file {} does not exist yet. Waiting for producer...",
            config.data_file.display()
        );
    }

    println!("Gospel Message Analyzer Consumer Starting...");
    println!("Monitoring file: {}", config.data_file.display());
    println!("Open {} to see live gospel analysis", config.dashboard_path.display());
    println!("Press Ctrl+C to stop");
    println!("{}", "-".repeat(60));

    let mut poll_ticker = interval(config.poll_interval);
    poll_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = poll_ticker.tick() => {
                match reader.poll_lines().await {
                    Ok(lines) if lines.is_empty() => {}
                    Ok(lines) => {
                        let received = lines.len();
                        let processed = consumer.handle_lines(lines).await;
                        log::debug!("Processed {}/{} lines (offset {})", processed, received, reader.offset());
                    }
                    Err(e) => {
                        log::error!("❌ Error reading {}: {}", reader.path().display(), e);
                    }
                }
            }

            result = &mut shutdown => {
                match result {
                    Ok(()) => log::info!("⚠️  Gospel Consumer interrupted by user."),
                    Err(e) => log::error!("❌ Failed to listen for CTRL+C: {}", e),
                }
                break;
            }
        }
    }

    println!();
    println!("{}", consumer.summary());
    println!("Keep being bold in your faith!");
    log::info!("✅ Gospel Consumer closed.");

    Ok(())
}
