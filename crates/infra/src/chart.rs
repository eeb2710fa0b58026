//! Pie-chart rendering for sales breakdowns.
//!
//! The renderer only draws what it is given: labels and raw values. Wedge annotations
//! show the value itself, not a percentage.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

use larder_reports::PieSlice;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart '{title}' has no positive values to draw")]
    Empty { title: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Draws a titled pie chart to `output`.
pub trait PieChartRenderer {
    fn render(&self, title: &str, slices: &[PieSlice], output: &Path) -> Result<(), ChartError>;
}

const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf",
];

/// Self-contained SVG pie chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgPieChart {
    pub width: u32,
    pub height: u32,
    /// Angle of the first wedge edge, degrees counter-clockwise from 3 o'clock.
    pub start_angle: f64,
}

impl Default for SvgPieChart {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1000,
            start_angle: 140.0,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl SvgPieChart {
    /// Render to an SVG document string.
    pub fn to_svg(&self, title: &str, slices: &[PieSlice]) -> Result<String, ChartError> {
        let slices: Vec<&PieSlice> = slices.iter().filter(|s| s.value > 0.0).collect();
        let total: f64 = slices.iter().map(|s| s.value).sum();
        if slices.is_empty() || total <= 0.0 {
            return Err(ChartError::Empty {
                title: title.to_string(),
            });
        }

        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let (cx, cy) = (w / 2.0, h / 2.0 + 40.0);
        let r = (h / 2.0 - 120.0).max(50.0);
        let point = |angle: f64, radius: f64| (cx + radius * angle.cos(), cy - radius * angle.sin());

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="40" y="60" font-size="30" font-weight="bold" fill="orange">{}</text>"#,
            escape(title)
        );

        let mut angle = self.start_angle.to_radians();
        for (idx, slice) in slices.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            let sweep = slice.value / total * 2.0 * PI;
            let end = angle + sweep;
            let mid = angle + sweep / 2.0;

            if slices.len() == 1 {
                let _ = writeln!(
                    svg,
                    r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{color}" stroke="black" stroke-width="2"/>"#
                );
            } else {
                let (x1, y1) = point(angle, r);
                let (x2, y2) = point(end, r);
                let large_arc = u8::from(sweep > PI);
                let _ = writeln!(
                    svg,
                    r#"<path d="M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x2:.2} {y2:.2} Z" fill="{color}" stroke="black" stroke-width="2"/>"#
                );
            }

            let (vx, vy) = point(mid, r * 0.9);
            let _ = writeln!(
                svg,
                r#"<text x="{vx:.2}" y="{vy:.2}" font-size="14" font-weight="bold" fill="white" text-anchor="middle">{}</text>"#,
                slice.value.round()
            );

            let (lx, ly) = point(mid, r * 1.1);
            let anchor = if mid.cos() >= 0.0 { "start" } else { "end" };
            let _ = writeln!(
                svg,
                r#"<text x="{lx:.2}" y="{ly:.2}" font-size="14" font-weight="bold" fill="black" text-anchor="{anchor}">{}</text>"#,
                escape(&slice.label)
            );

            angle = end;
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

impl PieChartRenderer for SvgPieChart {
    fn render(&self, title: &str, slices: &[PieSlice], output: &Path) -> Result<(), ChartError> {
        let svg = self.to_svg(title, slices)?;
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ChartError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(output, svg).map_err(|source| ChartError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %output.display(), slices = slices.len(), "rendered pie chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(label: &str, value: f64) -> PieSlice {
        PieSlice {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn one_wedge_per_positive_slice() {
        let svg = SvgPieChart::default()
            .to_svg("BURGERS SALES", &[slice("Veg - (3)", 300.0), slice("Zero", 0.0), slice("Paneer - (1)", 150.0)])
            .unwrap();
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.contains(">300<"));
        assert!(svg.contains("BURGERS SALES"));
        assert!(!svg.contains("Zero"));
    }

    #[test]
    fn single_slice_is_a_full_circle() {
        let svg = SvgPieChart::default().to_svg("DRINKS SALES", &[slice("Coke", 20.0)]).unwrap();
        assert!(svg.contains("<circle "));
        assert!(!svg.contains("<path "));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = SvgPieChart::default().to_svg("A & B", &[slice("<Tea>", 1.0), slice("Bun", 1.0)]).unwrap();
        assert!(svg.contains("A &amp; B"));
        assert!(svg.contains("&lt;Tea&gt;"));
    }

    #[test]
    fn all_zero_chart_is_an_error() {
        let err = SvgPieChart::default().to_svg("EMPTY", &[slice("x", 0.0)]).unwrap_err();
        assert!(matches!(err, ChartError::Empty { .. }));
    }

    #[test]
    fn render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("charts").join("Sales_By_Category_Burgers.svg");
        SvgPieChart::default()
            .render("BURGERS SALES", &[slice("Veg", 1.0), slice("Paneer", 2.0)], &output)
            .unwrap();
        assert!(std::fs::read_to_string(output).unwrap().starts_with("<svg"));
    }
}
