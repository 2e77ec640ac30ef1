//! Cost band vs charger type heatmap

use super::ChartSource;
use crate::constants::{VEGA_LITE_SCHEMA, columns};
use crate::models::ChargerType;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Upper bound and label of each cost band; bands are right-inclusive
pub const COST_BANDS: [(f64, &str); 10] = [
    (0.05, "0-0.05"),
    (0.10, "0.05-0.10"),
    (0.15, "0.10-0.15"),
    (0.20, "0.15-0.20"),
    (0.25, "0.20-0.25"),
    (0.30, "0.25-0.30"),
    (0.35, "0.30-0.35"),
    (0.40, "0.35-0.40"),
    (0.45, "0.40-0.45"),
    (f64::INFINITY, "0.45+"),
];

/// One populated heatmap cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    #[serde(rename = "Cost Range")]
    pub cost_range: &'static str,
    #[serde(rename = "Charger Type")]
    pub charger_type: ChargerType,
    #[serde(rename = "Usage Stats (avg users/day)")]
    pub mean_usage: Option<f64>,
    #[serde(rename = "Station Count")]
    pub station_count: usize,
}

/// Band index for a cost; zero, negative and non-finite costs have no band
pub fn cost_band(cost: f64) -> Option<usize> {
    if cost.is_nan() || cost <= 0.0 {
        return None;
    }
    COST_BANDS.iter().position(|(upper, _)| cost <= *upper)
}

/// Group records by cost band and charger type
///
/// Records without a cost band or charger type are left out. Cells are
/// ordered by band, then charger type.
pub fn aggregate_cells(source: &ChartSource<'_>) -> Vec<HeatmapCell> {
    let usage_column = source.column(columns::USAGE_PER_DAY);
    // (band, type) -> (usage sum, usage count, stations)
    let mut groups: BTreeMap<(usize, ChargerType), (f64, usize, usize)> = BTreeMap::new();

    for record in source.records() {
        let (Some(band), Some(charger_type)) = (
            record.cost_per_kwh.and_then(cost_band),
            record.charger_type,
        ) else {
            continue;
        };

        let entry = groups.entry((band, charger_type)).or_insert((0.0, 0, 0));
        if let Some(usage) = source.number(record, usage_column) {
            entry.0 += usage;
            entry.1 += 1;
        }
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|((band, charger_type), (usage_sum, usage_count, stations))| HeatmapCell {
            cost_range: COST_BANDS[band].1,
            charger_type,
            mean_usage: (usage_count > 0).then(|| usage_sum / usage_count as f64),
            station_count: stations,
        })
        .collect()
}

/// Build the heatmap specification
pub fn heatmap_spec(source: &ChartSource<'_>) -> Value {
    let cells = aggregate_cells(source);
    let band_order: Vec<&str> = COST_BANDS.iter().map(|(_, label)| *label).collect();
    let type_order: Vec<&str> = ChargerType::ALL.iter().map(|t| t.code()).collect();

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": {
            "text": "Cost vs Charger Type Distribution",
            "fontSize": 16,
            "anchor": "middle",
            "offset": 20
        },
        "width": 800,
        "height": 200,
        "padding": {"left": 50, "right": 150, "top": 40, "bottom": 60},
        "data": {"values": cells},
        "encoding": {
            "x": {
                "field": "Cost Range",
                "type": "ordinal",
                "title": "Cost per kWh (USD)",
                "sort": band_order,
                "axis": {
                    "labelAngle": 45,
                    "grid": false,
                    "domain": false,
                    "titlePadding": 15,
                    "labelPadding": 10
                }
            },
            "y": {
                "field": "Charger Type",
                "type": "nominal",
                "title": "Charger Type",
                "sort": type_order,
                "axis": {
                    "grid": false,
                    "domain": false,
                    "titlePadding": 15,
                    "labelPadding": 10
                }
            },
            "tooltip": [
                {"field": "Cost Range", "type": "ordinal", "title": "Cost Range"},
                {"field": "Charger Type", "type": "nominal", "title": "Charger Type"},
                {
                    "field": "Usage Stats (avg users/day)",
                    "type": "quantitative",
                    "title": "Avg Daily Users",
                    "format": ".1f"
                },
                {
                    "field": "Station Count",
                    "type": "quantitative",
                    "title": "Number of Stations",
                    "format": ",d"
                }
            ]
        },
        "layer": [
            {
                "mark": {"type": "rect", "stroke": "white", "strokeWidth": 2},
                "encoding": {
                    "color": {
                        "field": "Station Count",
                        "type": "quantitative",
                        "title": "Number of Stations",
                        "scale": {"scheme": "yellowgreenblue", "type": "symlog"},
                        "legend": {"gradientLength": 150, "orient": "right", "titlePadding": 10}
                    }
                }
            },
            {
                "mark": {
                    "type": "text",
                    "fontSize": 11,
                    "fontWeight": "bold",
                    "color": "white",
                    "baseline": "middle",
                    "align": "center"
                },
                "encoding": {
                    "text": {"field": "Station Count", "type": "quantitative", "format": ",d"}
                }
            }
        ],
        "config": {
            "view": {"stroke": null},
            "axis": {"labelFontSize": 12, "titleFontSize": 14},
            "legend": {"titleFontSize": 12, "labelFontSize": 11, "padding": 10}
        }
    })
}
