//! Four-panel PNG chart of the current snapshot
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ score & impact over time (+0.5 line)     │
//! ├─────────────────────┬────────────────────┤
//! │ top keywords        │ raw counters       │
//! ├─────────────────────┴────────────────────┤
//! │ percentage rates                         │
//! └──────────────────────────────────────────┘
//! ```

use super::renderer::{ensure_parent_dir, RenderError, SnapshotRenderer};
use crate::aggregator_core::Snapshot;
use async_trait::async_trait;
use chrono::Local;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

pub const CHART_SIZE: (u32, u32) = (1600, 1200);

const TOP_KEYWORDS: usize = 8;
const STRONG_GOSPEL_LINE: f64 = 0.5;
const FONT: &str = "sans-serif";

const TITLE_COLOR: RGBColor = RGBColor(0x2c, 0x3e, 0x50);
const GOSPEL_COLOR: RGBColor = RGBColor(0x27, 0xae, 0x60);
const IMPACT_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
const WITNESS_COLOR: RGBColor = RGBColor(0xf1, 0xc4, 0x0f);
const OPPORTUNITY_COLOR: RGBColor = RGBColor(0xe6, 0x7e, 0x22);
const TOTAL_COLOR: RGBColor = RGBColor(0x95, 0xa5, 0xa6);

const KEYWORD_COLORS: [RGBColor; TOP_KEYWORDS] = [
    RGBColor(0xe7, 0x4c, 0x3c),
    RGBColor(0x34, 0x98, 0xdb),
    RGBColor(0x2e, 0xcc, 0x71),
    RGBColor(0xf3, 0x9c, 0x12),
    RGBColor(0x9b, 0x59, 0xb6),
    RGBColor(0x1a, 0xbc, 0x9c),
    RGBColor(0x34, 0x49, 0x5e),
    RGBColor(0xe6, 0x7e, 0x22),
];

/// One bar of a categorical panel
#[derive(Debug, Clone, PartialEq)]
struct Bar {
    label: String,
    value: f64,
    annotation: String,
    color: RGBColor,
}

impl Bar {
    fn count(label: &str, count: u64, color: RGBColor) -> Self {
        Self {
            label: label.to_string(),
            value: count as f64,
            annotation: count.to_string(),
            color,
        }
    }

    fn percent(label: &str, pct: f64, color: RGBColor) -> Self {
        Self {
            label: label.to_string(),
            value: pct,
            annotation: format!("{:.1}%", pct),
            color,
        }
    }
}

fn keyword_bars(snapshot: &Snapshot) -> Vec<Bar> {
    snapshot
        .top_keywords(TOP_KEYWORDS)
        .into_iter()
        .zip(KEYWORD_COLORS)
        .map(|((keyword, count), color)| Bar::count(keyword, count, color))
        .collect()
}

fn counter_bars(snapshot: &Snapshot) -> Vec<Bar> {
    vec![
        Bar::count("Total Messages", snapshot.total_count, TOTAL_COLOR),
        Bar::count("Gospel Messages", snapshot.gospel_count, GOSPEL_COLOR),
        Bar::count("Bold Witness", snapshot.bold_count, WITNESS_COLOR),
        Bar::count("Evangelistic Opps", snapshot.opportunity_count, OPPORTUNITY_COLOR),
    ]
}

fn rate_bars(snapshot: &Snapshot) -> Vec<Bar> {
    vec![
        Bar::percent("Gospel Content %", snapshot.gospel_rate(), GOSPEL_COLOR),
        Bar::percent("Bold Witness %", snapshot.bold_rate(), WITNESS_COLOR),
        Bar::percent("Evangelistic Opps %", snapshot.opportunity_rate(), OPPORTUNITY_COLOR),
    ]
}

fn max_value(bars: &[Bar]) -> f64 {
    bars.iter().map(|b| b.value).fold(0.0, f64::max)
}

/// Count axes leave headroom for the value labels above the bars
fn count_axis_max(bars: &[Bar]) -> f64 {
    max_value(bars) * 1.15 + 1.0
}

/// Percentage axes show at least 0-100
fn rate_axis_max(bars: &[Bar]) -> f64 {
    (max_value(bars) * 1.2).max(100.0)
}

fn title_style() -> TextStyle<'static> {
    (FONT, 26).into_font().style(FontStyle::Bold).color(&TITLE_COLOR)
}

fn draw_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    snapshot: &Snapshot,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (width, height) = root.dim_in_pixel();
    let (top, rest) = root.split_vertically((height / 3) as i32);
    let (middle, bottom) = rest.split_vertically((height / 3) as i32);
    let (keywords_area, counters_area) = middle.split_horizontally((width / 2) as i32);

    draw_score_timeline(&top, snapshot)?;

    let keywords = keyword_bars(snapshot);
    if keywords.is_empty() {
        keywords_area.titled("Most Mentioned Gospel Keywords", title_style())?;
    } else {
        draw_bars(
            &keywords_area,
            "Most Mentioned Gospel Keywords",
            "Mentions",
            &keywords,
            count_axis_max(&keywords),
        )?;
    }

    let counters = counter_bars(snapshot);
    draw_bars(
        &counters_area,
        "Ministry Impact Metrics",
        "Count",
        &counters,
        count_axis_max(&counters),
    )?;

    if snapshot.total_count > 0 {
        let rates = rate_bars(snapshot);
        draw_bars(
            &bottom,
            "Evangelistic Effectiveness - Be Bold Like Charlie Kirk!",
            "Percentage",
            &rates,
            rate_axis_max(&rates),
        )?;
    }

    root.present()?;
    Ok(())
}

fn draw_score_timeline<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    snapshot: &Snapshot,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let x_max = (snapshot.point_count().max(2) - 1) as f64;
    let timestamps = &snapshot.timestamps;

    let mut chart = ChartBuilder::on(area)
        .caption("Gospel Message Analysis Over Time (Charlie Kirk Style)", title_style())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..1.1)?;

    chart
        .configure_mesh()
        .y_desc("Score (0-1)")
        .x_labels(6)
        .x_label_formatter(&|x: &f64| {
            timestamps
                .get(x.round().max(0.0) as usize)
                .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
                .unwrap_or_default()
        })
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart
        .draw_series(
            LineSeries::new(
                snapshot.scores.iter().enumerate().map(|(i, s)| (i as f64, *s)),
                GOSPEL_COLOR.stroke_width(3),
            )
            .point_size(5),
        )?
        .label("Gospel Content")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GOSPEL_COLOR.stroke_width(3)));

    chart
        .draw_series(
            LineSeries::new(
                snapshot.impacts.iter().enumerate().map(|(i, s)| (i as f64, *s)),
                IMPACT_COLOR.stroke_width(2),
            )
            .point_size(4),
        )?
        .label("Faith Impact")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], IMPACT_COLOR.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            vec![(0.0, STRONG_GOSPEL_LINE), (x_max, STRONG_GOSPEL_LINE)],
            RED.mix(0.7).stroke_width(2),
        ))?
        .label("Strong Gospel Threshold")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.7)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    bars: &[Bar],
    y_max: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, title_style())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_labels(bars.len() + 1)
        .x_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => bars.get(*i).map(|b| b.label.clone()).unwrap_or_default(),
            _ => String::new(),
        })
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
            bar.color.filled(),
        );
        rect.set_margin(0, 0, 12, 12);
        rect
    }))?;

    let value_style = TextStyle::from((FONT, 18).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            bar.annotation.clone(),
            (SegmentValue::CenterOf(i), bar.value),
            value_style.clone(),
        )
    }))?;

    Ok(())
}

pub struct ChartRenderer {
    path: PathBuf,
    size: (u32, u32),
}

impl ChartRenderer {
    pub fn new(path: PathBuf) -> std::io::Result<Self> {
        ensure_parent_dir(&path)?;

        log::info!("📈 Writing chart to: {}", path.display());
        Ok(Self {
            path,
            size: CHART_SIZE,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Draw the snapshot to the PNG at `path`, replacing any previous image
    pub fn draw(&self, snapshot: &Snapshot) -> Result<(), RenderError> {
        let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        draw_panels(&root, snapshot).map_err(|e| RenderError::Chart(e.to_string()))
    }
}

#[async_trait]
impl SnapshotRenderer for ChartRenderer {
    async fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        self.draw(snapshot)?;
        log::debug!("Chart updated and saved to {}", self.path.display());
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "PNG"
    }
}
