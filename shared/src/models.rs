// Style value types shared between the theme engine and whatever renderer consumes it.
// Every struct here is a fully populated leaf: the engine merges theme data onto
// these defaults before handing them out, so a renderer never sees a missing field.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when a string is not one of an enumeration's accepted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}', expected one of: {}",
            self.kind,
            self.value,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

// Closed string enumerations. The wire/JSON form is the literal string,
// `VALUES` lists them in declaration order for error messages.
macro_rules! style_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, default = $default:ident,
        { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $label,
                        value: s.to_string(),
                        allowed: Self::VALUES,
                    }),
                }
            }
        }
    };
}

style_enum! {
    /// Dash pattern of a stroke.
    LineStyle, "line style", default = Solid,
    { Solid => "solid", Dash => "dash", Dot => "dot", DashDot => "dash-dot" }
}

style_enum! {
    LineCap, "line cap", default = Butt,
    { Butt => "butt", Round => "round", Square => "square" }
}

style_enum! {
    LineJoin, "line join", default = Miter,
    { Bevel => "bevel", Round => "round", Miter => "miter" }
}

style_enum! {
    /// What a stroke is painted with. Only plain colors exist today.
    StrokePriority, "stroke priority", default = Color,
    { Color => "color" }
}

style_enum! {
    FillPriority, "fill priority", default = Color,
    { Color => "color" }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One stop of a linear gradient. Stops are painted in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub stop: f64,
    pub color: String,
}

/// One circle of a radial gradient as authored; `stop` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradientStop {
    pub center: Point,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<f64>,
    pub color: String,
}

/// A radial stop with its position filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialColorStop {
    pub center: Point,
    pub radius: f64,
    pub stop: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "stops", rename_all = "lowercase")]
pub enum Gradient {
    Linear(Vec<ColorStop>),
    Radial(Vec<RadialColorStop>),
}

impl Gradient {
    pub fn len(&self) -> usize {
        match self {
            Gradient::Linear(stops) => stops.len(),
            Gradient::Radial(stops) => stops.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Radial stop positions used when a theme leaves them out.
const FIRST_RADIAL_STOP: f64 = 0.5;
const LATER_RADIAL_STOP: f64 = 1.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum LinearGradientEntry {
    Stop(ColorStop),
    Color(String),
}

/// Turns authored linear gradient entries into explicit stops.
///
/// Themes may list plain colors instead of `{stop, color}` objects; those are
/// spread evenly at `1/n, 2/n, ..., 1`. A list mixing both forms is rejected.
fn normalize_linear_gradient(entries: Vec<LinearGradientEntry>) -> Result<Vec<ColorStop>, String> {
    let plain_colors = entries
        .iter()
        .filter(|e| matches!(e, LinearGradientEntry::Color(_)))
        .count();

    if plain_colors == 0 {
        return Ok(entries
            .into_iter()
            .filter_map(|e| match e {
                LinearGradientEntry::Stop(stop) => Some(stop),
                LinearGradientEntry::Color(_) => None,
            })
            .collect());
    }
    if plain_colors != entries.len() {
        return Err("linear gradient mixes color stops and plain colors".to_string());
    }

    let count = entries.len();
    let step = 1.0 / count as f64;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, e)| match e {
            LinearGradientEntry::Color(color) => {
                let stop = if i == count - 1 { 1.0 } else { step * (i + 1) as f64 };
                Some(ColorStop { stop, color })
            }
            LinearGradientEntry::Stop(_) => None,
        })
        .collect())
}

fn deserialize_linear_gradient<'de, D>(deserializer: D) -> Result<Option<Vec<ColorStop>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<LinearGradientEntry>> = Option::deserialize(deserializer)?;
    entries
        .map(normalize_linear_gradient)
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrokeTheme {
    pub stroke_enabled: bool,
    pub stroke_priority: StrokePriority,
    pub width: f64,
    pub stroke_color: String,
    pub line_style: LineStyle,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for StrokeTheme {
    fn default() -> Self {
        Self {
            stroke_enabled: true,
            stroke_priority: StrokePriority::Color,
            width: 1.0,
            stroke_color: "black".to_string(),
            line_style: LineStyle::Solid,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FillTheme {
    pub fill_enabled: bool,
    pub fill_priority: FillPriority,
    pub fill_color: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_linear_gradient"
    )]
    pub linear_gradient: Option<Vec<ColorStop>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radial_gradient: Option<Vec<RadialGradientStop>>,
}

impl Default for FillTheme {
    fn default() -> Self {
        Self {
            fill_enabled: true,
            fill_priority: FillPriority::Color,
            fill_color: "black".to_string(),
            linear_gradient: None,
            radial_gradient: None,
        }
    }
}

impl FillTheme {
    /// The gradient painted by this fill, if any. A linear gradient wins over a
    /// radial one when both are set. Stops keep their declared order.
    pub fn gradient(&self) -> Option<Gradient> {
        if let Some(stops) = &self.linear_gradient {
            return Some(Gradient::Linear(stops.clone()));
        }
        self.radial_gradient.as_ref().map(|stops| {
            Gradient::Radial(
                stops
                    .iter()
                    .enumerate()
                    .map(|(i, s)| RadialColorStop {
                        center: s.center,
                        radius: s.radius,
                        stop: s.stop.unwrap_or(if i == 0 {
                            FIRST_RADIAL_STOP
                        } else {
                            LATER_RADIAL_STOP
                        }),
                        color: s.color.clone(),
                    })
                    .collect(),
            )
        })
    }
}

/// Text carries both stroke and fill capabilities plus font settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextTheme {
    pub stroke_enabled: bool,
    pub stroke_priority: StrokePriority,
    pub width: f64,
    pub stroke_color: String,
    pub line_style: LineStyle,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub fill_enabled: bool,
    pub fill_priority: FillPriority,
    pub fill_color: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_linear_gradient"
    )]
    pub linear_gradient: Option<Vec<ColorStop>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radial_gradient: Option<Vec<RadialGradientStop>>,
    pub font_family: String,
    pub font_size: f64,
    pub font_style: String,
    pub font_weight: String,
    pub font_variant: String,
    pub decoration: String,
}

impl Default for TextTheme {
    fn default() -> Self {
        let stroke = StrokeTheme::default();
        let fill = FillTheme::default();
        Self {
            stroke_enabled: stroke.stroke_enabled,
            stroke_priority: stroke.stroke_priority,
            width: stroke.width,
            stroke_color: stroke.stroke_color,
            line_style: stroke.line_style,
            line_cap: stroke.line_cap,
            line_join: stroke.line_join,
            fill_enabled: fill.fill_enabled,
            fill_priority: fill.fill_priority,
            fill_color: fill.fill_color,
            linear_gradient: fill.linear_gradient,
            radial_gradient: fill.radial_gradient,
            font_family: "Arial".to_string(),
            font_size: 12.0,
            font_style: "normal".to_string(),
            font_weight: "normal".to_string(),
            font_variant: "normal".to_string(),
            decoration: "none".to_string(),
        }
    }
}

impl TextTheme {
    pub fn stroke(&self) -> StrokeTheme {
        StrokeTheme {
            stroke_enabled: self.stroke_enabled,
            stroke_priority: self.stroke_priority,
            width: self.width,
            stroke_color: self.stroke_color.clone(),
            line_style: self.line_style,
            line_cap: self.line_cap,
            line_join: self.line_join,
        }
    }

    pub fn fill(&self) -> FillTheme {
        FillTheme {
            fill_enabled: self.fill_enabled,
            fill_priority: self.fill_priority,
            fill_color: self.fill_color.clone(),
            linear_gradient: self.linear_gradient.clone(),
            radial_gradient: self.radial_gradient.clone(),
        }
    }

    /// CSS font shorthand, e.g. `normal normal bold 12px Arial`.
    pub fn font(&self) -> String {
        format!(
            "{} {} {} {}px {}",
            self.font_style, self.font_variant, self.font_weight, self.font_size, self.font_family
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    Stroke,
    Fill,
    Text,
}

impl LeafKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafKind::Stroke => "stroke",
            LeafKind::Fill => "fill",
            LeafKind::Text => "text",
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved terminal style, ready to be applied to a drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LeafStyle {
    Stroke(StrokeTheme),
    Fill(FillTheme),
    Text(TextTheme),
}

impl LeafStyle {
    /// Canonical defaults for a leaf kind.
    pub fn default_for(kind: LeafKind) -> Self {
        match kind {
            LeafKind::Stroke => LeafStyle::Stroke(StrokeTheme::default()),
            LeafKind::Fill => LeafStyle::Fill(FillTheme::default()),
            LeafKind::Text => LeafStyle::Text(TextTheme::default()),
        }
    }

    pub fn kind(&self) -> LeafKind {
        match self {
            LeafStyle::Stroke(_) => LeafKind::Stroke,
            LeafStyle::Fill(_) => LeafKind::Fill,
            LeafStyle::Text(_) => LeafKind::Text,
        }
    }

    pub fn as_stroke(&self) -> Option<&StrokeTheme> {
        match self {
            LeafStyle::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_fill(&self) -> Option<&FillTheme> {
        match self {
            LeafStyle::Fill(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextTheme> {
        match self {
            LeafStyle::Text(t) => Some(t),
            _ => None,
        }
    }

    /// The fill side of this leaf; text leaves carry one too.
    pub fn fill_capability(&self) -> Option<FillTheme> {
        match self {
            LeafStyle::Stroke(_) => None,
            LeafStyle::Fill(f) => Some(f.clone()),
            LeafStyle::Text(t) => Some(t.fill()),
        }
    }

    /// The stroke side of this leaf; text leaves carry one too.
    pub fn stroke_capability(&self) -> Option<StrokeTheme> {
        match self {
            LeafStyle::Stroke(s) => Some(s.clone()),
            LeafStyle::Fill(_) => None,
            LeafStyle::Text(t) => Some(t.stroke()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_style_strings() {
        assert_eq!(LineStyle::DashDot.as_str(), "dash-dot");
        assert_eq!("dash-dot".parse::<LineStyle>().unwrap(), LineStyle::DashDot);
        assert_eq!(
            serde_json::to_value(LineStyle::DashDot).unwrap(),
            json!("dash-dot")
        );
        assert_eq!(LineStyle::VALUES, &["solid", "dash", "dot", "dash-dot"]);
    }

    #[test]
    fn test_unknown_variant_lists_allowed_values() {
        let err = "dashed".parse::<LineStyle>().unwrap_err();
        assert_eq!(err.value, "dashed");
        assert!(err.to_string().contains("solid, dash, dot, dash-dot"));
    }

    #[test]
    fn test_stroke_defaults() {
        let stroke = StrokeTheme::default();
        assert!(stroke.stroke_enabled);
        assert_eq!(stroke.stroke_priority, StrokePriority::Color);
        assert_eq!(stroke.width, 1.0);
        assert_eq!(stroke.stroke_color, "black");
        assert_eq!(stroke.line_style, LineStyle::Solid);
        assert_eq!(stroke.line_cap, LineCap::Butt);
        assert_eq!(stroke.line_join, LineJoin::Miter);
    }

    #[test]
    fn test_text_defaults_and_font() {
        let text = TextTheme::default();
        assert_eq!(text.font_family, "Arial");
        assert_eq!(text.font_size, 12.0);
        assert_eq!(text.decoration, "none");
        assert_eq!(text.font(), "normal normal normal 12px Arial");
    }

    #[test]
    fn test_stroke_json_uses_camel_case() {
        let value = serde_json::to_value(StrokeTheme::default()).unwrap();
        assert_eq!(value["strokeColor"], json!("black"));
        assert_eq!(value["lineStyle"], json!("solid"));
        assert!(value.get("stroke_color").is_none());
    }

    #[test]
    fn test_linear_gradient_plain_colors_spread_evenly() {
        let fill: FillTheme = serde_json::from_value(json!({
            "fillColor": "white",
            "linearGradient": ["red", "green", "blue", "black"]
        }))
        .unwrap();
        let stops: Vec<f64> = fill
            .linear_gradient
            .unwrap()
            .iter()
            .map(|s| s.stop)
            .collect();
        assert_eq!(stops, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_linear_gradient_keeps_declared_order_and_duplicates() {
        let fill: FillTheme = serde_json::from_value(json!({
            "linearGradient": [
                {"stop": 0.0, "color": "red"},
                {"stop": 0.5, "color": "red"},
                {"stop": 0.5, "color": "blue"},
                {"stop": 0.2, "color": "blue"}
            ]
        }))
        .unwrap();
        let stops = fill.linear_gradient.unwrap();
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[1].stop, 0.5);
        assert_eq!(stops[2].stop, 0.5);
        assert_eq!(stops[3].stop, 0.2);
    }

    #[test]
    fn test_linear_gradient_mixed_forms_rejected() {
        let result: Result<FillTheme, _> = serde_json::from_value(json!({
            "linearGradient": ["red", {"stop": 1.0, "color": "blue"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_radial_gradient_fills_missing_stops() {
        let fill: FillTheme = serde_json::from_value(json!({
            "radialGradient": [
                {"center": {"x": 0.0, "y": 0.0}, "radius": 1.0, "color": "white"},
                {"center": {"x": 0.0, "y": 0.0}, "radius": 10.0, "color": "black"}
            ]
        }))
        .unwrap();
        match fill.gradient() {
            Some(Gradient::Radial(stops)) => {
                assert_eq!(stops[0].stop, 0.5);
                assert_eq!(stops[1].stop, 1.0);
                assert_eq!(stops[1].radius, 10.0);
            }
            other => panic!("expected radial gradient, got {:?}", other),
        }
    }

    #[test]
    fn test_linear_gradient_wins_over_radial() {
        let fill = FillTheme {
            linear_gradient: Some(vec![ColorStop { stop: 1.0, color: "red".into() }]),
            radial_gradient: Some(vec![RadialGradientStop {
                center: Point::default(),
                radius: 1.0,
                stop: None,
                color: "blue".into(),
            }]),
            ..FillTheme::default()
        };
        assert!(matches!(fill.gradient(), Some(Gradient::Linear(_))));
    }

    #[test]
    fn test_leaf_style_tagged_json() {
        let leaf = LeafStyle::default_for(LeafKind::Fill);
        let value = serde_json::to_value(&leaf).unwrap();
        assert_eq!(value["kind"], json!("fill"));
        assert_eq!(value["fillColor"], json!("black"));
        let back: LeafStyle = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind(), LeafKind::Fill);
    }

    #[test]
    fn test_text_capabilities() {
        let text = TextTheme {
            stroke_enabled: false,
            fill_color: "#fff".to_string(),
            ..TextTheme::default()
        };
        let leaf = LeafStyle::Text(text);
        assert!(!leaf.stroke_capability().unwrap().stroke_enabled);
        assert_eq!(leaf.fill_capability().unwrap().fill_color, "#fff");
        assert!(LeafStyle::default_for(LeafKind::Stroke)
            .fill_capability()
            .is_none());
    }
}
