//! Distance to city vs daily usage scatter plot

use super::ChartSource;
use crate::constants::{VEGA_LITE_SCHEMA, columns};
use serde::Serialize;
use serde_json::{Value, json};

/// One plotted station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint<'a> {
    #[serde(rename = "Station Name")]
    pub station_name: Option<&'a str>,
    #[serde(rename = "City")]
    pub city: Option<&'a str>,
    #[serde(rename = "Distance to City (miles)")]
    pub distance_miles: f64,
    #[serde(rename = "Usage Stats (avg users/day)")]
    pub usage_per_day: f64,
    #[serde(rename = "Number of Parking Spots")]
    pub parking_spots: Option<f64>,
    #[serde(rename = "Renewable Energy")]
    pub renewable_energy: Option<&'a str>,
}

/// Collect plottable stations; records missing either axis value are skipped
pub fn collect_points<'a>(source: &ChartSource<'a>) -> Vec<ScatterPoint<'a>> {
    let name = source.column(columns::STATION_NAME);
    let city = source.column(columns::CITY);
    let distance = source.column(columns::DISTANCE_TO_CITY);
    let usage = source.column(columns::USAGE_PER_DAY);
    let parking = source.column(columns::PARKING_SPOTS);
    let renewable = source.column(columns::RENEWABLE_ENERGY);

    source
        .records()
        .iter()
        .filter_map(|record| {
            Some(ScatterPoint {
                station_name: source.text(record, name),
                city: source.text(record, city),
                distance_miles: source.number(record, distance)?,
                usage_per_day: source.number(record, usage)?,
                parking_spots: source.number(record, parking),
                renewable_energy: source.text(record, renewable),
            })
        })
        .collect()
}

/// Build the scatter specification
pub fn scatter_spec(source: &ChartSource<'_>) -> Value {
    let points = collect_points(source);

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": {
            "text": "Distance to City vs. Usage",
            "subtitle": "Size indicates number of parking spots, color shows renewable energy usage",
            "fontSize": 16,
            "subtitleFontSize": 13,
            "anchor": "middle",
            "offset": 20
        },
        "width": 800,
        "height": 500,
        "data": {"values": points},
        "mark": {"type": "circle", "opacity": 0.6},
        "params": [{"name": "grid", "select": "interval", "bind": "scales"}],
        "encoding": {
            "x": {
                "field": "Distance to City (miles)",
                "type": "quantitative",
                "title": "Distance to City (miles)",
                "scale": {"zero": false},
                "axis": {"titlePadding": 10}
            },
            "y": {
                "field": "Usage Stats (avg users/day)",
                "type": "quantitative",
                "title": "Average Daily Users",
                "scale": {"zero": true},
                "axis": {"titlePadding": 10}
            },
            "size": {
                "field": "Number of Parking Spots",
                "type": "quantitative",
                "title": "Number of Parking Spots",
                "scale": {"range": [50, 400]}
            },
            "color": {
                "field": "Renewable Energy",
                "type": "nominal",
                "title": "Renewable Energy",
                "scale": {"domain": ["Yes", "No"], "range": ["#2ecc71", "#e74c3c"]}
            },
            "tooltip": [
                {"field": "Station Name", "type": "nominal", "title": "Station Name"},
                {
                    "field": "Distance to City (miles)",
                    "type": "quantitative",
                    "title": "Distance to City",
                    "format": ".1f"
                },
                {
                    "field": "Usage Stats (avg users/day)",
                    "type": "quantitative",
                    "title": "Avg Daily Users",
                    "format": ".1f"
                },
                {"field": "Number of Parking Spots", "type": "quantitative", "title": "Parking Spots"},
                {"field": "Renewable Energy", "type": "nominal", "title": "Renewable Energy"},
                {"field": "City", "type": "nominal", "title": "City"}
            ]
        },
        "config": {
            "axis": {"labelFontSize": 11, "titleFontSize": 13},
            "legend": {"titleFontSize": 12, "labelFontSize": 11}
        }
    })
}
