use crate::{
    args::RenderOpt,
    constants::{COLORBAR_LABEL, COLORBAR_STEPS, COLORBAR_WIDTH, X_DESC, Y_DESC},
    pipeline::Prepared,
};
use log::info;
use plotters::{coord::Shift, prelude::*};
use std::path::Path;

/// Viridis sampled at 9 evenly spaced points.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 145, 140),
    (40, 174, 128),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Viridis color at `t` in `[0, 1]`. Out of range values are clamped.
#[must_use]
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Color of a value normalized to `range`. NaN has no color.
#[must_use]
pub fn value_color(value: f64, (min, max): (f64, f64)) -> Option<RGBColor> {
    if value.is_nan() {
        return None;
    }
    let t = if max > min {
        (value - min) / (max - min)
    } else {
        0.0
    };
    Some(viridis(t))
}

/// Tick label for an axis value. Whole part with comma separated thousands, or nothing below 1.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if value >= 1.0 {
        group_thousands(value.trunc() as u64)
    } else {
        String::new()
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Ticks at whole multiples of each power of 10 within `[low, high]`, increasing and without repeats.
/// Wide ranges keep only the 1, 2 and 5 multiples, or only the powers of 10, so labels don't crowd.
#[must_use]
pub fn log_ticks(low: f64, high: f64) -> Vec<f64> {
    if !(low > 0.0 && low < high && high.is_finite()) {
        return vec![];
    }
    let decades = (high / low).log10();
    let multiples: &[f64] = if decades <= 3.0 {
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
    } else if decades <= 6.0 {
        &[1.0, 2.0, 5.0]
    } else {
        &[1.0]
    };
    let mut ticks = Vec::new();
    for exp in (low.log10().floor() as i32)..=(high.log10().floor() as i32) {
        let decade = 10f64.powi(exp);
        ticks.extend(
            multiples
                .iter()
                .map(|m| m * decade)
                .filter(|tick| (low..=high).contains(tick)),
        );
    }
    ticks
}

/// One spectrogram value as a rectangle in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub frame: usize,
    /// Lower frequency edge in hz.
    pub low: f64,
    /// Upper frequency edge in hz.
    pub high: f64,
    pub color: RGBColor,
}

/// Cells of the band. Rows split the log grid's extent into equal linear slices,
/// so the lowest bin sits at the bottom and each row is drawn taller than the one below on the log axis.
pub fn cells(prepared: &Prepared) -> impl Iterator<Item = Cell> + '_ {
    let (low, high) = prepared.remap.extent();
    let rows = prepared.band.spectrogram.bin_cnt();
    let row_height = (high - low) / rows as f64;
    let range = prepared.value_range;
    prepared
        .band
        .spectrogram
        .frames()
        .enumerate()
        .flat_map(move |(frame, bins)| {
            bins.iter().enumerate().filter_map(move |(row, &value)| {
                Some(Cell {
                    frame,
                    low: low + row_height * row as f64,
                    high: if row + 1 == rows {
                        high
                    } else {
                        low + row_height * (row + 1) as f64
                    },
                    color: value_color(value, range)?,
                })
            })
        })
}

/// Draw the spectrogram with a log frequency axis and a colorbar on the given area.
pub fn draw_spectrogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    prepared: &Prepared,
    title: &str,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let titled = root.titled(title, ("sans-serif", 40).into_font())?;
    let (width, _height) = titled.dim_in_pixel();
    let (plot_area, bar_area) = titled.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

    // setup graph
    let (low_freq, high_freq) = prepared.remap.extent();
    let frames = prepared.band.spectrogram.frame_cnt() as f64;
    let y_ticks = log_ticks(low_freq, high_freq);
    let y_tick_cnt = y_ticks.len();
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(
            0f64..frames,
            (low_freq..high_freq).log_scale().with_key_points(y_ticks),
        )?;

    // draw the tickmarks
    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 15).into_font())
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .y_labels(y_tick_cnt)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| format_tick(*y))
        .draw()?;

    chart.draw_series(cells(prepared).map(|cell| {
        Rectangle::new(
            [
                (cell.frame as f64, cell.low),
                (cell.frame as f64 + 1.0, cell.high),
            ],
            cell.color.filled(),
        )
    }))?;

    // Colorbar over the value range.
    let (min, max) = prepared.value_range;
    let max = if max > min { max } else { min + 1.0 };
    let mut bar = ChartBuilder::on(&bar_area)
        .margin(10)
        .margin_bottom(60)
        .right_y_label_area_size(90)
        .build_cartesian_2d(0f64..1f64, min..max)?;
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .label_style(("sans-serif", 15).into_font())
        .y_desc(COLORBAR_LABEL)
        .draw()?;
    let step = (max - min) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let low = min + step * i as f64;
        Rectangle::new(
            [(0.0, low), (1.0, low + step)],
            viridis((i as f64 + 0.5) / COLORBAR_STEPS as f64).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Render to `file_out`. Svg if the extension is `svg`, otherwise a bitmap in the format the extension names.
pub fn render_to_file(
    file_out: &Path,
    prepared: &Prepared,
    render: &RenderOpt,
) -> anyhow::Result<()> {
    let size = (render.width, render.height);
    let is_svg = file_out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(file_out, size).into_drawing_area();
        draw_spectrogram(&root, prepared, &render.title)?;
    } else {
        let root = BitMapBackend::new(file_out, size).into_drawing_area();
        draw_spectrogram(&root, prepared, &render.title)?;
    }
    info!("Successfully saved spectrogram to {}", file_out.display());
    Ok(())
}
