//! Static bar chart of revenue at risk per health tier, rendered as SVG.

use crate::{error::RevenueResult, summary::TierTotal};
use std::{fmt::Write as _, path::Path};

pub const CHART_TITLE: &str = "Revenue At Risk by Health Tier";
const X_LABEL: &str = "Health Tier";
const Y_LABEL: &str = "Revenue At Risk";

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;
const Y_TICKS: usize = 5;
const BAR_FILL: &str = "#1f77b4";

pub struct BarChart<'a> {
    pub title:  &'a str,
    pub width:  u32,
    pub height: u32,
}

impl Default for BarChart<'_> {
    fn default() -> Self {
        Self { title: CHART_TITLE, width: 640, height: 480 }
    }
}

impl BarChart<'_> {
    pub fn render_svg(&self, series: &[TierTotal]) -> String {
        let width = f64::from(self.width.max(200));
        let height = f64::from(self.height.max(150));
        let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_h;

        let max_value = series
            .iter()
            .map(|t| t.revenue_at_risk)
            .fold(0.0_f64, f64::max);
        let y_max = nice_ceiling(max_value);

        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = width,
            h = height,
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="{x}" y="24" text-anchor="middle" font-size="16">{t}</text>"#,
            x = width / 2.0,
            t = escape_xml(self.title),
        );

        // Y axis with gridlines.
        for i in 0..=Y_TICKS {
            let value = y_max * i as f64 / Y_TICKS as f64;
            let y = baseline - plot_h * i as f64 / Y_TICKS as f64;
            let _ = writeln!(
                svg,
                r##"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#dddddd"/>"##,
                x1 = MARGIN_LEFT,
                x2 = MARGIN_LEFT + plot_w,
            );
            let _ = writeln!(
                svg,
                r#"<text x="{x}" y="{y:.1}" text-anchor="end" font-size="11">{value:.0}</text>"#,
                x = MARGIN_LEFT - 6.0,
                y = y + 4.0,
            );
        }
        let _ = writeln!(
            svg,
            r#"<line x1="{x}" y1="{top}" x2="{x}" y2="{baseline}" stroke="black"/>"#,
            x = MARGIN_LEFT,
            top = MARGIN_TOP,
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{x1}" y1="{baseline}" x2="{x2}" y2="{baseline}" stroke="black"/>"#,
            x1 = MARGIN_LEFT,
            x2 = MARGIN_LEFT + plot_w,
        );

        if series.is_empty() {
            let _ = writeln!(
                svg,
                r##"<text x="{x}" y="{y}" text-anchor="middle" font-size="13" fill="#888888">No data</text>"##,
                x = MARGIN_LEFT + plot_w / 2.0,
                y = MARGIN_TOP + plot_h / 2.0,
            );
        }

        let slot = plot_w / series.len().max(1) as f64;
        let bar_w = slot * 0.6;
        for (i, total) in series.iter().enumerate() {
            let bar_h = if y_max > 0.0 { plot_h * total.revenue_at_risk / y_max } else { 0.0 };
            let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
            let label = total.tier.label();
            let _ = writeln!(
                svg,
                r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="{BAR_FILL}"><title>{label}: {v:.2}</title></rect>"#,
                y = baseline - bar_h,
                v = total.revenue_at_risk,
            );
            let _ = writeln!(
                svg,
                r#"<text x="{cx:.1}" y="{ly}" text-anchor="middle" font-size="12">{label}</text>"#,
                cx = x + bar_w / 2.0,
                ly = baseline + 18.0,
            );
        }

        let _ = writeln!(
            svg,
            r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="13">{X_LABEL}</text>"#,
            x = MARGIN_LEFT + plot_w / 2.0,
            y = height - 16.0,
        );
        let _ = writeln!(
            svg,
            r#"<text x="18" y="{y}" text-anchor="middle" font-size="13" transform="rotate(-90 18 {y})">{Y_LABEL}</text>"#,
            y = MARGIN_TOP + plot_h / 2.0,
        );
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save_svg(&self, path: impl AsRef<Path>, series: &[TierTotal]) -> RevenueResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render_svg(series))?;
        log::info!("chart: wrote {} bars to {}", series.len(), path.display());
        Ok(())
    }
}

/// Round up to 1, 2 or 5 times a power of ten so axis ticks read cleanly.
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(value.log10().floor() as i32);
    let scaled = value / magnitude;
    let step = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::HealthTier;

    fn series() -> Vec<TierTotal> {
        vec![
            TierTotal { tier: HealthTier::AtRisk,    accounts: 3, revenue_at_risk: 12_000.0 },
            TierTotal { tier: HealthTier::Healthy,   accounts: 9, revenue_at_risk: 4_500.0 },
            TierTotal { tier: HealthTier::Watchlist, accounts: 5, revenue_at_risk: 8_250.5 },
        ]
    }

    #[test]
    fn one_bar_per_tier() {
        let svg = BarChart::default().render_svg(&series());
        assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains(">At Risk<"));
        assert!(svg.contains(">Watchlist<"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn empty_series_has_no_bars() {
        let svg = BarChart::default().render_svg(&[]);
        assert_eq!(svg.matches(r#"class="bar""#).count(), 0);
        assert!(svg.contains("No data"));
    }

    #[test]
    fn nice_ceiling_rounds_up() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(12_000.0), 20_000.0);
        assert_eq!(nice_ceiling(4_500.0), 5_000.0);
        assert_eq!(nice_ceiling(150.0), 200.0);
    }
}
