//! Installations per year, one line per charger type

use super::ChartSource;
use crate::constants::VEGA_LITE_SCHEMA;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Label for records whose charger type did not map
pub const UNKNOWN_CHARGER_TYPE: &str = "Unknown";

/// Station count for one installation year and charger type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    #[serde(rename = "Installation Year")]
    pub installation_year: i32,
    #[serde(rename = "Charger Type")]
    pub charger_type: &'static str,
    #[serde(rename = "Station Count")]
    pub station_count: usize,
}

/// Count stations per (year, charger type), ordered by year then type
///
/// Records without an installation year are left out.
pub fn count_installations(source: &ChartSource<'_>) -> Vec<TrendPoint> {
    let mut counts: BTreeMap<(i32, &'static str), usize> = BTreeMap::new();

    for record in source.records() {
        let Some(year) = record.installation_year else {
            continue;
        };
        let charger_type = record
            .charger_type
            .map(|t| t.code())
            .unwrap_or(UNKNOWN_CHARGER_TYPE);
        *counts.entry((year, charger_type)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((installation_year, charger_type), station_count)| TrendPoint {
            installation_year,
            charger_type,
            station_count,
        })
        .collect()
}

/// Build the trend line specification
pub fn trend_spec(source: &ChartSource<'_>) -> Value {
    let points = count_installations(source);

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": {
            "text": "Station Installations per Year",
            "fontSize": 16,
            "anchor": "middle",
            "offset": 20
        },
        "width": 800,
        "height": 300,
        "data": {"values": points},
        "mark": {"type": "line", "point": true},
        "encoding": {
            "x": {
                "field": "Installation Year",
                "type": "ordinal",
                "title": "Installation Year",
                "axis": {"labelAngle": 0}
            },
            "y": {
                "field": "Station Count",
                "type": "quantitative",
                "title": "Stations Installed"
            },
            "color": {
                "field": "Charger Type",
                "type": "nominal",
                "title": "Charger Type"
            },
            "tooltip": [
                {"field": "Installation Year", "type": "ordinal", "title": "Year"},
                {"field": "Charger Type", "type": "nominal", "title": "Charger Type"},
                {"field": "Station Count", "type": "quantitative", "title": "Stations", "format": ",d"}
            ]
        },
        "config": {
            "axis": {"labelFontSize": 11, "titleFontSize": 13},
            "legend": {"titleFontSize": 12, "labelFontSize": 11}
        }
    })
}
