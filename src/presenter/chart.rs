use chrono::SecondsFormat;
use serde_json::{json, Value};

use super::config::PresenterConfig;
use crate::pipeline::TickReport;

const TIME_PANEL_SHARE: f64 = 0.7;
const PANEL_SPACING: f64 = 0.1;

/// Two-panel plotly figure: altitude over time and the altitude spectrum.
pub fn build_figure(report: &TickReport, config: &PresenterConfig) -> Value {
    let palette = config.theme.palette();

    let times: Vec<String> = report
        .series
        .timestamps()
        .iter()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .collect();

    let usable = 1.0 - PANEL_SPACING;
    let split = TIME_PANEL_SHARE * usable;

    let axis = |title: &str, domain: Option<[f64; 2]>, anchor: &str| {
        let mut axis = json!({
            "title": { "text": title },
            "anchor": anchor,
            "gridcolor": palette.grid,
            "zerolinecolor": palette.grid,
        });
        if let Some(domain) = domain {
            axis["domain"] = json!(domain);
        }
        axis
    };

    let mut frequency_axis = axis(
        "frequency, cycles/sample",
        Some([split + PANEL_SPACING, 1.0]),
        "y2",
    );
    frequency_axis["range"] = json!(config.frequency_range);

    json!({
        "data": [
            {
                "x": times,
                "y": report.series.altitudes(),
                "name": "Altitude",
                "mode": "lines+markers",
                "type": "scatter",
                "xaxis": "x",
                "yaxis": "y",
            },
            {
                "x": report.spectrum.frequencies,
                "y": report.spectrum.magnitudes,
                "name": "FFT(Altitude)",
                "mode": "lines+markers",
                "type": "scatter",
                "xaxis": "x2",
                "yaxis": "y2",
            },
        ],
        "layout": {
            "margin": { "l": 10, "r": 10, "b": 10, "t": 10 },
            "legend": { "x": 1, "y": 1, "xanchor": "right" },
            "paper_bgcolor": palette.paper,
            "plot_bgcolor": palette.plot,
            "font": { "color": palette.font },
            "xaxis": axis("time, hh:mm:ss", Some([0.0, split]), "y"),
            "yaxis": axis("Altitude, km", None, "x"),
            "xaxis2": frequency_axis,
            "yaxis2": axis("FFT(Altitude)", None, "x2"),
        },
    })
}
