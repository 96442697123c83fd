// File: crates/candlestick-demo/src/main.rs
// Summary: Demo loads an OHLC CSV, applies optional settings JSON and writes the candlestick chart as PNG and SVG.

use anyhow::{Context, Result};
use candlestick_core::{
    CandlestickChart, CategoryColumn, CategoryValue, DataTable, DefaultPalette, MeasureColumn, MeasureRole,
    PropertyBag, Viewport, XAxisType,
};
use candlestick_render_skia::{render_to_png, RenderOptions, SkiaTextMeasurer};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Render OHLC rows from a CSV file as a candlestick chart.
#[derive(Debug, Parser)]
#[command(name = "candlestick-demo", version, about = "Render an OHLC CSV as a candlestick chart")]
struct Cli {
    /// Input CSV with a header row (time/date, open, high, low, close, ...).
    input: PathBuf,

    /// Directory receiving `<stem>.png` and `<stem>.svg`.
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 960.0)]
    width: f32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 480.0)]
    height: f32,

    /// Settings JSON in the `{ "object": { "property": value } }` shape.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override `xAxis.type` (Categorical or Continuous).
    #[arg(long)]
    x_axis_type: Option<String>,

    /// Columns plotted as trend lines; defaults to every other numeric column except
    /// volume, time-like and count columns.
    #[arg(long = "trend")]
    trends: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let table = load_table(&cli.input, &cli.trends)
        .with_context(|| format!("failed to load CSV '{}'", cli.input.display()))?;
    log::info!("loaded {} rows from {}", table.categories().len(), cli.input.display());

    let objects = load_settings(cli.settings.as_deref(), cli.x_axis_type.as_deref())?;

    let mut chart = CandlestickChart::new(DefaultPalette::new(), SkiaTextMeasurer::new());
    let scene = chart.update(Some(&table), Some(&objects), Viewport::new(cli.width, cli.height));
    if scene.is_empty() {
        log::warn!("nothing to draw; check the open/high/low/close headers");
    }

    std::fs::create_dir_all(&cli.out_dir).with_context(|| format!("creating {}", cli.out_dir.display()))?;
    let stem = cli.input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let png = cli.out_dir.join(format!("{stem}.png"));
    render_to_png(scene, &RenderOptions::default(), &png)?;
    log::info!("wrote {}", png.display());

    let svg = png.with_extension("svg");
    std::fs::write(&svg, scene.to_svg()).with_context(|| format!("writing {}", svg.display()))?;
    log::info!("wrote {}", svg.display());
    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG still wins when set.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

fn load_settings(path: Option<&Path>, x_axis_type: Option<&str>) -> Result<PropertyBag> {
    let mut bag = match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            PropertyBag::from_json_str(&raw).with_context(|| format!("parsing {}", p.display()))?
        }
        None => PropertyBag::new(),
    };
    if let Some(name) = x_axis_type {
        let ty = XAxisType::from_name(name)
            .with_context(|| format!("unknown x axis type `{name}` (expected Categorical or Continuous)"))?;
        bag.set("xAxis", "type", serde_json::Value::from(ty.name()));
    }
    Ok(bag)
}

/// Load a Binance-like OHLC CSV into a host table.
fn load_table(path: &Path, trend_names: &[String]) -> Result<DataTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    log::debug!("headers: {headers:?}");
    let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let idx = |names: &[&str]| lower.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let price_cols = [
        (MeasureRole::Open, idx(&["open", "o"])),
        (MeasureRole::High, idx(&["high", "h"])),
        (MeasureRole::Low, idx(&["low", "l"])),
        (MeasureRole::Close, idx(&["close", "c", "adj_close", "close_price"])),
    ];
    let trend_cols: Vec<usize> = if trend_names.is_empty() {
        (0..headers.len())
            .filter(|i| Some(*i) != i_time && price_cols.iter().all(|(_, c)| *c != Some(*i)))
            .filter(|i| is_auto_trend(&lower[*i]))
            .collect()
    } else {
        trend_names
            .iter()
            .map(|name| {
                lower
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(name))
                    .with_context(|| format!("no column named `{name}`"))
            })
            .collect::<Result<_>>()?
    };

    let mut categories = Vec::new();
    let mut cells: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let category = match i_time.and_then(|ix| rec.get(ix)) {
            Some(raw) => parse_time(raw).map(CategoryValue::from).unwrap_or_else(|| CategoryValue::from(raw)),
            None => CategoryValue::from(row as f64),
        };
        categories.push(category);
        for (ix, col) in cells.iter_mut().enumerate() {
            col.push(rec.get(ix).and_then(|s| s.parse::<f64>().ok()));
        }
    }

    let name = i_time.map_or("Row", |ix| headers[ix].as_str());
    let mut table = DataTable::new(CategoryColumn::new(name, categories));
    for (role, col) in price_cols {
        match col {
            Some(ix) => table.push_measure(MeasureColumn::new(headers[ix].clone(), role, cells[ix].clone())),
            None => log::warn!("no column found for {role:?}"),
        }
    }
    for ix in trend_cols {
        // Text columns carry no values; skip them rather than plotting an empty line.
        if cells[ix].iter().all(Option::is_none) {
            log::debug!("skipping non-numeric column `{}`", headers[ix]);
            continue;
        }
        table.push_measure(MeasureColumn::new(headers[ix].clone(), MeasureRole::Trend, cells[ix].clone()));
    }
    Ok(table)
}

/// Whether a non-OHLC column is plotted as a trend without `--trend`.
/// Volumes, timestamps, counts and ids live on scales far from the price axis.
fn is_auto_trend(lower_name: &str) -> bool {
    const SKIP: [&str; 6] = ["volume", "time", "date", "trade", "count", "ignore"];
    !(SKIP.iter().any(|s| lower_name.contains(s)) || lower_name == "id" || lower_name.ends_with("_id"))
}

fn parse_time(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms or seconds
        let dt = if n > 10_i64.pow(12) { DateTime::from_timestamp_millis(n) } else { DateTime::from_timestamp(n, 0) };
        return dt.map(|d| d.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}
