//! Preview data: the fixed weather fixture and per-layout sample sets.

use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as Json};
use widget_core::{Condition, Element, ElementKind, PropertyValue, Value, WidgetLayout};

use crate::error::HtmlError;

/// Keys every sample set carries, whether or not the layout binds them.
const COMMON_KEYS: [&str; 9] = [
    "temperature",
    "locationName",
    "description",
    "iconPath",
    "humidity",
    "windSpeed",
    "precipitation",
    "pressure",
    "feelsLike",
];

/// Keys whose samples are item lists.
const ARRAY_KEYS: [&str; 4] = ["hourlyData", "dailyData", "hourly", "daily"];

/// Items generated for a list sample.
const SAMPLE_ITEMS: usize = 6;

/// One hourly forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyItem {
    pub hour: String,
    pub temperature: String,
    pub icon_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precip_accumulation: Option<String>,
}

/// One daily forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyItem {
    pub day: String,
    pub temperature_high: String,
    pub temperature_low: String,
    pub icon_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precip_accumulation: Option<String>,
}

/// Widget data as the preview sees it. Unknown fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hourly_data: Vec<HourlyItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub daily_data: Vec<DailyItem>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Json>,
}

impl WidgetData {
    /// Fixed data used for image previews.
    pub fn preview() -> Self {
        let hourly_data = [
            ("12:00", "8°C", "200d", "0mm"),
            ("13:00", "9°C", "200d", "0mm"),
            ("14:00", "10°C", "200d", "0mm"),
            ("15:00", "10°C", "200d", "0.2mm"),
            ("16:00", "9°C", "200d", "0.5mm"),
            ("17:00", "8°C", "200d", "0.3mm"),
            ("18:00", "7°C", "200d", "0mm"),
            ("19:00", "6°C", "200d", "0mm"),
        ]
        .into_iter()
        .map(|(hour, temperature, icon, precip)| HourlyItem {
            hour: hour.to_string(),
            temperature: temperature.to_string(),
            icon_path: icon.to_string(),
            precip_accumulation: Some(precip.to_string()),
        })
        .collect();

        let daily_data = [
            ("Today", "12°C", "5°C", "0mm"),
            ("Tomorrow", "14°C", "6°C", "2mm"),
            ("Wednesday", "11°C", "4°C", "5mm"),
            ("Thursday", "10°C", "3°C", "0mm"),
            ("Friday", "13°C", "5°C", "0mm"),
        ]
        .into_iter()
        .map(|(day, high, low, precip)| DailyItem {
            day: day.to_string(),
            temperature_high: high.to_string(),
            temperature_low: low.to_string(),
            icon_path: "200d".to_string(),
            precip_accumulation: Some(precip.to_string()),
        })
        .collect();

        Self {
            temperature: Some("8°C".to_string()),
            location_name: Some("Grenoble".to_string()),
            description: Some("Partly Cloudy".to_string()),
            icon_path: Some("200d".to_string()),
            hourly_data,
            daily_data,
            extra: IndexMap::new(),
        }
    }

    /// Runtime value for evaluation.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).map(Value::from).unwrap_or_default()
    }
}

/// Named sample data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleSet {
    #[default]
    Default,
    Hot,
    Storm,
}

impl SampleSet {
    pub const ALL: [SampleSet; 3] = [SampleSet::Default, SampleSet::Hot, SampleSet::Storm];

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hot => "hot",
            Self::Storm => "storm",
        }
    }
}

impl fmt::Display for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleSet {
    type Err = HtmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|set| set.name() == s)
            .ok_or_else(|| HtmlError::UnknownSampleSet(s.to_string()))
    }
}

/// Sample value for a data key, chosen by substring match on the key.
pub fn sample_value(key: &str, set: SampleSet) -> Json {
    let k = key.to_lowercase();
    let pick = |default: &str, hot: &str, storm: &str| {
        json!(match set {
            SampleSet::Default => default,
            SampleSet::Hot => hot,
            SampleSet::Storm => storm,
        })
    };

    if k.contains("temperaturehigh") {
        pick("22°C", "36°C", "15°C")
    } else if k.contains("temperaturelow") {
        pick("10°C", "28°C", "5°C")
    } else if k.contains("temp") || k.contains("feelslike") {
        pick("12°C", "31°C", "8°C")
    } else if k.contains("wind") {
        pick("12 km/h", "24 km/h", "82 km/h")
    } else if k.contains("humid") {
        pick("78%", "20%", "92%")
    } else if k.contains("precip") || k.contains("rain") || k.contains("snow") {
        pick("0 mm", "0 mm", "15 mm")
    } else if k.contains("press") {
        pick("1015 hPa", "1015 hPa", "985 hPa")
    } else if k.contains("icon") {
        pick("800d", "800d", "1200d")
    } else if k.contains("location") || k.contains("city") || k.contains("place") {
        pick("Paris", "Seville", "Reykjavík")
    } else if k.contains("descr") {
        pick("Partly Cloudy", "Sunny", "Stormy")
    } else if k.contains("hour") {
        pick("09:00", "12:00", "18:00")
    } else if k.contains("day") {
        pick("Mon", "Tue", "Thu")
    } else if k.contains("value") || k.contains("level") {
        json!(if set == SampleSet::Hot { 100 } else { 0 })
    } else {
        json!("")
    }
}

fn array_sample(key: &str, set: SampleSet) -> Json {
    let k = key.to_lowercase();
    let items = (0..SAMPLE_ITEMS).map(|i| {
        if k.contains("daily") {
            json!({
                "day": sample_value("day", set),
                "iconPath": sample_value("iconPath", set),
                "precipAccumulation": sample_value("precipAccumulation", set),
                "temperatureHigh": sample_value("temperatureHigh", set),
                "temperatureLow": sample_value("temperatureLow", set),
            })
        } else if k.contains("hour") {
            json!({
                "hour": format!("{:02}:00", (6 + i) % 24),
                "iconPath": sample_value("iconPath", set),
                "temperature": sample_value("temperature", set),
                "precipAccumulation": sample_value("precipAccumulation", set),
            })
        } else {
            json!({ "value": sample_value("value", set) })
        }
    });
    Json::Array(items.collect())
}

/// Data keys a layout reads: the last segment of every bound path, every
/// `forEach` source, then the common weather keys.
pub fn collect_tokens(layout: &WidgetLayout) -> IndexSet<String> {
    let mut paths = Vec::new();
    for tree in layout.trees() {
        tree.walk(&mut |element| element_paths(element, &mut paths));
    }
    for variant in &layout.variants {
        if let Condition::Expr(expr) = &variant.condition {
            expr.referenced_paths(&mut paths);
        }
    }

    let mut tokens: IndexSet<String> = paths
        .iter()
        .filter(|path| !path.starts_with("size.") && path.as_str() != "size")
        .filter_map(|path| path.rsplit('.').next())
        .filter(|last| !last.is_empty())
        .map(str::to_string)
        .collect();
    tokens.extend(COMMON_KEYS.iter().map(|k| k.to_string()));
    tokens
}

fn element_paths(element: &Element, paths: &mut Vec<String>) {
    let text = match &element.kind {
        ElementKind::Label(label) => label.text.as_ref(),
        ElementKind::Span(span) => span.text.as_ref(),
        ElementKind::Image(image) => image.src.as_ref(),
        _ => None,
    };
    if let Some(value) = text {
        value_paths(value, paths);
    }
    if let ElementKind::ForEach(fe) = &element.kind {
        paths.extend(fe.items.iter().cloned());
    }
    if let Some(Condition::Expr(expr)) = &element.common.visible_if {
        expr.referenced_paths(paths);
    }
    if let ElementKind::Conditional(cond) = &element.kind {
        if let Some(Condition::Expr(expr)) = &cond.condition {
            expr.referenced_paths(paths);
        }
    }
}

fn value_paths(value: &PropertyValue, paths: &mut Vec<String>) {
    match value {
        PropertyValue::Literal(_) => {}
        PropertyValue::Binding(template) => paths.extend(template.bindings().map(str::to_string)),
        PropertyValue::Expression(expr) => expr.referenced_paths(paths),
    }
}

/// One data object for `set` covering every key the layout reads.
pub fn sample_data(layout: &WidgetLayout, set: SampleSet) -> Json {
    let mut object = Map::new();
    for token in collect_tokens(layout) {
        let value = if ARRAY_KEYS.contains(&token.as_str()) {
            array_sample(&token, set)
        } else {
            sample_value(&token, set)
        };
        object.insert(token, value);
    }
    Json::Object(object)
}

/// `{default, hot, storm}` sample data for a layout.
pub fn generate_samples(layout: &WidgetLayout) -> Json {
    let sets = SampleSet::ALL
        .into_iter()
        .map(|set| (set.name().to_string(), sample_data(layout, set)))
        .collect();
    Json::Object(sets)
}

/// Pick `set` out of a samples file; any other JSON is used as-is.
pub fn select_sample(json: Json, set: SampleSet) -> Json {
    let is_samples_file = json
        .as_object()
        .is_some_and(|o| !o.is_empty() && o.keys().all(|k| k.parse::<SampleSet>().is_ok()));
    match json {
        Json::Object(mut sets) if is_samples_file => sets.remove(set.name()).unwrap_or_else(|| json!({})),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(value: Json) -> WidgetLayout {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_preview_fixture() {
        let data = WidgetData::preview().to_value();
        assert_eq!(data.get_key("temperature").as_str(), Some("8°C"));
        assert_eq!(data.get_key("hourlyData").as_array().map(<[Value]>::len), Some(8));
        let first = data.get_key("dailyData").as_array().map(|items| items[0].get_key("day"));
        assert_eq!(first.as_ref().and_then(Value::as_str), Some("Today"));
    }

    #[test]
    fn test_widget_data_keeps_unknown_fields() {
        let data: WidgetData =
            serde_json::from_value(json!({"temperature": "3°C", "uvIndex": 4})).unwrap();
        assert_eq!(data.extra.get("uvIndex"), Some(&json!(4)));
        assert_eq!(data.to_value().get_key("uvIndex").to_number(), 4.0);
    }

    #[test]
    fn test_sample_value_by_key() {
        assert_eq!(sample_value("temperatureHigh", SampleSet::Hot), json!("36°C"));
        assert_eq!(sample_value("feelsLike", SampleSet::Default), json!("12°C"));
        assert_eq!(sample_value("windSpeed", SampleSet::Storm), json!("82 km/h"));
        assert_eq!(sample_value("locationName", SampleSet::Storm), json!("Reykjavík"));
        assert_eq!(sample_value("batteryLevel", SampleSet::Hot), json!(100));
        assert_eq!(sample_value("mystery", SampleSet::Default), json!(""));
    }

    #[test]
    fn test_generate_samples() {
        let layout = layout(json!({
            "name": "W",
            "layout": {"type": "column", "children": [
                {"type": "label", "text": "{{data.uvIndex}} UV"},
                {"type": "forEach", "items": "hourlyData", "limit": 3,
                 "itemTemplate": {"type": "label", "text": "{{item.hour}}"}}
            ]}
        }));
        let samples = generate_samples(&layout);
        let keys: Vec<&String> = samples.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["default", "hot", "storm"]);

        let storm = &samples["storm"];
        assert_eq!(storm["uvIndex"], json!(""));
        assert_eq!(storm["temperature"], json!("8°C"));
        let hourly = storm["hourlyData"].as_array().unwrap();
        assert_eq!(hourly.len(), 6);
        assert_eq!(hourly[0]["hour"], json!("06:00"));
        assert_eq!(hourly[0]["precipAccumulation"], json!("15 mm"));
    }

    #[test]
    fn test_select_sample() {
        let samples = json!({"default": {"a": 1}, "storm": {"a": 2}});
        assert_eq!(select_sample(samples.clone(), SampleSet::Storm), json!({"a": 2}));
        assert_eq!(select_sample(samples, SampleSet::Hot), json!({}));
        assert_eq!(select_sample(json!({"a": 3}), SampleSet::Hot), json!({"a": 3}));
    }

    #[test]
    fn test_sample_set_names() {
        assert_eq!("hot".parse::<SampleSet>().unwrap(), SampleSet::Hot);
        assert!("warm".parse::<SampleSet>().is_err());
    }
}
