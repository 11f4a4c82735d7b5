use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render speed, altitude and acceleration charts from a descent CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts")]
    output_dir: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FreeFall,
    Powered,
}

#[derive(Debug, Clone)]
struct Row {
    phase: Phase,
    time_s: f64,
    speed_m_s: f64,
    altitude_m: f64,
    acceleration_m_s2: f64,
}

struct ChartSpec {
    file_name: &'static str,
    title: &'static str,
    y_desc: &'static str,
    value: fn(&Row) -> f64,
}

const CHARTS: [ChartSpec; 3] = [
    ChartSpec {
        file_name: "speed.png",
        title: "Speed",
        y_desc: "V, m/s",
        value: speed_of,
    },
    ChartSpec {
        file_name: "altitude.png",
        title: "Altitude",
        y_desc: "H, m",
        value: altitude_of,
    },
    ChartSpec {
        file_name: "acceleration.png",
        title: "Acceleration",
        y_desc: "a, m/s²",
        value: acceleration_of,
    },
];

fn speed_of(row: &Row) -> f64 {
    row.speed_m_s
}

fn altitude_of(row: &Row) -> f64 {
    row.altitude_m
}

fn acceleration_of(row: &Row) -> f64 {
    row.acceleration_m_s2
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rows = read_rows(&cli.input)?;
    if rows.is_empty() {
        return Err(anyhow::anyhow!("No samples in the provided CSV"));
    }

    fs::create_dir_all(&cli.output_dir)?;
    let ignition_s = rows
        .iter()
        .find(|r| r.phase == Phase::Powered)
        .map(|r| r.time_s);

    for chart in &CHARTS {
        let path = cli.output_dir.join(chart.file_name);
        render_chart(&path, (cli.width, cli.height), chart, &rows, ignition_s)?;
        info!(chart = chart.title, path = %path.display(), "rendered chart");
    }
    Ok(())
}

fn render_chart(
    path: &Path,
    size: (u32, u32),
    spec: &ChartSpec,
    rows: &[Row],
    ignition_s: Option<f64>,
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (t_min, t_max) = padded_range(rows.iter().map(|r| r.time_s));
    let (y_min, y_max) = padded_range(rows.iter().map(spec.value));

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(spec.title, caption_font)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(t_min..t_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("t, s")
        .y_desc(spec.y_desc)
        .label_style(label_font.clone())
        .draw()?;

    let phases = [
        (Phase::FreeFall, "free fall", BLUE),
        (Phase::Powered, "powered", RED),
    ];
    for (phase, label, color) in phases {
        let points: Vec<(f64, f64)> = rows
            .iter()
            .filter(|r| r.phase == phase)
            .map(|r| (r.time_s, (spec.value)(r)))
            .collect();
        if points.is_empty() {
            continue;
        }
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if let Some(t) = ignition_s {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(t, y_min), (t, y_max)],
            ShapeStyle::from(&BLACK.mix(0.4)).stroke_width(1),
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(1e-3);
    (min - pad, max + pad)
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_rows(path: &str) -> anyhow::Result<Vec<Row>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let phase_idx = column("phase")?;
    let time_idx = column("time_s")?;
    let speed_idx = column("speed_m_s")?;
    let altitude_idx = column("altitude_m")?;
    let accel_idx = column("acceleration_m_s2")?;

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let phase = match r.get(phase_idx).unwrap_or("") {
            "free_fall" => Phase::FreeFall,
            "powered" => Phase::Powered,
            other => return Err(anyhow::anyhow!("Unknown phase '{}'", other)),
        };
        let number = |idx: usize| -> f64 { r.get(idx).unwrap_or("").parse().unwrap_or(f64::NAN) };
        let row = Row {
            phase,
            time_s: number(time_idx),
            speed_m_s: number(speed_idx),
            altitude_m: number(altitude_idx),
            acceleration_m_s2: number(accel_idx),
        };
        if row.time_s.is_finite() {
            rows.push(row);
        }
    }
    Ok(rows)
}
