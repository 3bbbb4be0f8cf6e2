// Schema-driven validation of theme trees.
// Collects every missing or malformed path so a theme author gets one report.
use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};
use shared::{FillPriority, LeafKind, LineCap, LineJoin, LineStyle, StrokePriority, StylePath};

use super::{SchemaEntry, StyleSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The root or an intermediate node is not an object.
    NotAnObject,
    /// A mandatory leaf is absent.
    MissingLeaf,
    /// A mandatory field is absent or null.
    MissingField,
    /// A mandatory string field is empty.
    EmptyField,
    WrongType,
    InvalidEnum,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::NotAnObject => "not_an_object",
            IssueKind::MissingLeaf => "missing_leaf",
            IssueKind::MissingField => "missing_field",
            IssueKind::EmptyField => "empty_field",
            IssueKind::WrongType => "wrong_type",
            IssueKind::InvalidEnum => "invalid_enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Dotted path to the offending node, e.g. `plot.bar.candle.upCandle.fill.fillColor`
    pub path: String,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every issue found in one tree, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// True when some issue points exactly at `path`.
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }

    fn push(&mut self, path: impl Into<String>, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            kind,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", issue)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldType {
    Bool,
    Number,
    Text,
    Enum(&'static [&'static str]),
    LinearGradient,
    RadialGradient,
}

const STROKE_FIELDS: &[(&str, FieldType)] = &[
    ("strokeEnabled", FieldType::Bool),
    ("strokePriority", FieldType::Enum(StrokePriority::VALUES)),
    ("width", FieldType::Number),
    ("strokeColor", FieldType::Text),
    ("lineStyle", FieldType::Enum(LineStyle::VALUES)),
    ("lineCap", FieldType::Enum(LineCap::VALUES)),
    ("lineJoin", FieldType::Enum(LineJoin::VALUES)),
];

const FILL_FIELDS: &[(&str, FieldType)] = &[
    ("fillEnabled", FieldType::Bool),
    ("fillPriority", FieldType::Enum(FillPriority::VALUES)),
    ("fillColor", FieldType::Text),
    ("linearGradient", FieldType::LinearGradient),
    ("radialGradient", FieldType::RadialGradient),
];

const FONT_FIELDS: &[(&str, FieldType)] = &[
    ("fontFamily", FieldType::Text),
    ("fontSize", FieldType::Number),
    ("fontStyle", FieldType::Text),
    ("fontWeight", FieldType::Text),
    ("fontVariant", FieldType::Text),
    ("decoration", FieldType::Text),
];

fn field_groups(kind: LeafKind) -> &'static [&'static [(&'static str, FieldType)]] {
    match kind {
        LeafKind::Stroke => &[STROKE_FIELDS],
        LeafKind::Fill => &[FILL_FIELDS],
        LeafKind::Text => &[STROKE_FIELDS, FILL_FIELDS, FONT_FIELDS],
    }
}

/// Fields a leaf of this kind must spell out; everything else has a default.
pub(crate) fn mandatory_fields(kind: LeafKind) -> &'static [&'static str] {
    match kind {
        LeafKind::Stroke => &["strokeColor"],
        LeafKind::Fill => &["fillColor"],
        LeafKind::Text => &["fillColor", "fontFamily"],
    }
}

enum Walk<'a> {
    Found(&'a Value),
    Missing,
    /// The walk hit a non-object at this prefix.
    Blocked(StylePath),
}

fn walk<'a>(root: &'a Map<String, Value>, path: &StylePath) -> Walk<'a> {
    let mut current = root;
    let segments = path.segments();
    for (i, segment) in segments.iter().enumerate() {
        match current.get(segment) {
            None | Some(Value::Null) => return Walk::Missing,
            Some(value) if i + 1 == segments.len() => return Walk::Found(value),
            Some(Value::Object(map)) => current = map,
            Some(_) => return Walk::Blocked(StylePath::from(&segments[..=i])),
        }
    }
    Walk::Missing
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(super) fn validate_tree(schema: &StyleSchema, tree: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Some(root) = tree.as_object() else {
        report.push(
            "(root)",
            IssueKind::NotAnObject,
            format!("theme must be an object, found {}", json_type(tree)),
        );
        return report;
    };

    // Several leaves share a broken parent; report it once.
    let mut blocked: HashSet<StylePath> = HashSet::new();

    for entry in schema.entries() {
        match walk(root, &entry.path) {
            Walk::Found(value) => check_leaf(entry, value, &mut report),
            Walk::Missing => {
                if !entry.is_optional() {
                    report.push(
                        entry.path.to_string(),
                        IssueKind::MissingLeaf,
                        format!("missing {} leaf", entry.kind),
                    );
                }
            }
            Walk::Blocked(prefix) => {
                if blocked.insert(prefix.clone()) {
                    report.push(
                        prefix.to_string(),
                        IssueKind::NotAnObject,
                        "expected an object with nested styles",
                    );
                }
            }
        }
    }

    report
}

fn check_leaf(entry: &SchemaEntry, value: &Value, report: &mut ValidationReport) {
    let Some(leaf) = value.as_object() else {
        report.push(
            entry.path.to_string(),
            IssueKind::NotAnObject,
            format!("expected a {} style object, found {}", entry.kind, json_type(value)),
        );
        return;
    };

    let mandatory = mandatory_fields(entry.kind);
    for group in field_groups(entry.kind) {
        for &(name, field_type) in group.iter() {
            let field_path = format!("{}.{}", entry.path, name);
            let required = mandatory.contains(&name);
            match leaf.get(name) {
                None | Some(Value::Null) => {
                    if required {
                        report.push(field_path, IssueKind::MissingField, format!("missing mandatory '{}'", name));
                    }
                }
                Some(field) => check_field(&field_path, field_type, field, required, report),
            }
        }
    }
}

fn check_field(path: &str, field_type: FieldType, value: &Value, required: bool, report: &mut ValidationReport) {
    match field_type {
        FieldType::Bool => {
            if !value.is_boolean() {
                report.push(path, IssueKind::WrongType, format!("expected a boolean, found {}", json_type(value)));
            }
        }
        FieldType::Number => {
            if !value.is_number() {
                report.push(path, IssueKind::WrongType, format!("expected a number, found {}", json_type(value)));
            }
        }
        FieldType::Text => match value.as_str() {
            Some("") if required => {
                report.push(path, IssueKind::EmptyField, "mandatory field is empty");
            }
            Some(_) => {}
            None => {
                report.push(path, IssueKind::WrongType, format!("expected a string, found {}", json_type(value)));
            }
        },
        FieldType::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => {}
            Some(s) => {
                report.push(
                    path,
                    IssueKind::InvalidEnum,
                    format!("'{}' is not one of: {}", s, allowed.join(", ")),
                );
            }
            None => {
                report.push(path, IssueKind::WrongType, format!("expected a string, found {}", json_type(value)));
            }
        },
        FieldType::LinearGradient => check_linear_gradient(path, value, report),
        FieldType::RadialGradient => check_radial_gradient(path, value, report),
    }
}

fn check_linear_gradient(path: &str, value: &Value, report: &mut ValidationReport) {
    let Some(entries) = value.as_array() else {
        report.push(path, IssueKind::WrongType, format!("expected an array, found {}", json_type(value)));
        return;
    };

    let plain_colors = entries.iter().filter(|e| e.is_string()).count();
    if plain_colors > 0 && plain_colors < entries.len() {
        report.push(path, IssueKind::WrongType, "mixes color stops and plain colors");
        return;
    }
    if plain_colors > 0 {
        for (i, entry) in entries.iter().enumerate() {
            if entry.as_str() == Some("") {
                report.push(format!("{}[{}]", path, i), IssueKind::EmptyField, "gradient color is empty");
            }
        }
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let entry_path = format!("{}[{}]", path, i);
        let Some(stop) = entry.as_object() else {
            report.push(&entry_path, IssueKind::WrongType, format!("expected a color stop, found {}", json_type(entry)));
            continue;
        };
        require_number(&entry_path, stop, "stop", report);
        require_color(&entry_path, stop, report);
    }
}

fn check_radial_gradient(path: &str, value: &Value, report: &mut ValidationReport) {
    let Some(entries) = value.as_array() else {
        report.push(path, IssueKind::WrongType, format!("expected an array, found {}", json_type(value)));
        return;
    };

    // An inner and an outer circle.
    if entries.len() != 2 {
        report.push(
            path,
            IssueKind::WrongType,
            format!("expected exactly 2 circles, found {}", entries.len()),
        );
    }

    for (i, entry) in entries.iter().enumerate() {
        let entry_path = format!("{}[{}]", path, i);
        let Some(stop) = entry.as_object() else {
            report.push(&entry_path, IssueKind::WrongType, format!("expected a radial stop, found {}", json_type(entry)));
            continue;
        };
        match stop.get("center") {
            Some(Value::Object(center)) => {
                let center_path = format!("{}.center", entry_path);
                require_number(&center_path, center, "x", report);
                require_number(&center_path, center, "y", report);
            }
            Some(other) => report.push(
                format!("{}.center", entry_path),
                IssueKind::WrongType,
                format!("expected a point, found {}", json_type(other)),
            ),
            None => report.push(format!("{}.center", entry_path), IssueKind::MissingField, "missing mandatory 'center'"),
        }
        require_number(&entry_path, stop, "radius", report);
        if let Some(position) = stop.get("stop") {
            if !position.is_number() && !position.is_null() {
                report.push(
                    format!("{}.stop", entry_path),
                    IssueKind::WrongType,
                    format!("expected a number, found {}", json_type(position)),
                );
            }
        }
        require_color(&entry_path, stop, report);
    }
}

fn require_number(parent: &str, object: &Map<String, Value>, name: &str, report: &mut ValidationReport) {
    let path = format!("{}.{}", parent, name);
    match object.get(name) {
        Some(v) if v.is_number() => {}
        Some(v) => report.push(path, IssueKind::WrongType, format!("expected a number, found {}", json_type(v))),
        None => report.push(path, IssueKind::MissingField, format!("missing mandatory '{}'", name)),
    }
}

fn require_color(parent: &str, object: &Map<String, Value>, report: &mut ValidationReport) {
    let path = format!("{}.color", parent);
    match object.get("color") {
        Some(Value::String(s)) if s.is_empty() => {
            report.push(path, IssueKind::EmptyField, "mandatory field is empty")
        }
        Some(Value::String(_)) => {}
        Some(v) => report.push(path, IssueKind::WrongType, format!("expected a string, found {}", json_type(v))),
        None => report.push(path, IssueKind::MissingField, "missing mandatory 'color'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn small_schema() -> StyleSchema {
        StyleSchema::new()
            .fill("chart.background")
            .stroke("chartPanel.grid")
            .text("chartPanel.title")
            .optional(
                "chartPanel.watermark.text",
                LeafKind::Text,
                json!({"fillColor": "gray", "fontFamily": "Arial"}),
            )
    }

    fn valid_tree() -> Value {
        json!({
            "chart": {"background": {"fillColor": "#1d1d1d"}},
            "chartPanel": {
                "grid": {"strokeColor": "#333"},
                "title": {"fillColor": "#fff", "fontFamily": "Arial"}
            }
        })
    }

    #[test]
    fn test_valid_tree_without_optional_subtree() {
        let report = small_schema().validate(&valid_tree());
        assert!(report.is_valid(), "unexpected issues:\n{}", report);
    }

    #[test]
    fn test_root_must_be_object() {
        let report = small_schema().validate(&json!([1, 2, 3]));
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues()[0].kind, IssueKind::NotAnObject);
        assert_eq!(report.issues()[0].path, "(root)");
    }

    #[test]
    fn test_collects_every_issue_in_one_pass() {
        let tree = json!({
            "chart": {"background": {"fillColor": ""}},
            "chartPanel": {
                "grid": {"strokeColor": "#333", "lineStyle": "dashed", "width": "2"},
                "title": {"fillColor": "#fff"}
            }
        });
        let report = small_schema().validate(&tree);
        assert_eq!(report.len(), 4, "report:\n{}", report);
        assert!(report.has_issue_at("chart.background.fillColor"));
        assert!(report.has_issue_at("chartPanel.grid.lineStyle"));
        assert!(report.has_issue_at("chartPanel.grid.width"));
        assert!(report.has_issue_at("chartPanel.title.fontFamily"));

        let kinds: Vec<IssueKind> = report.issues().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::EmptyField,
                IssueKind::WrongType,
                IssueKind::InvalidEnum,
                IssueKind::MissingField
            ]
        );
    }

    #[test]
    fn test_missing_leaf_and_null_field() {
        let tree = json!({
            "chart": {"background": {"fillColor": null}},
            "chartPanel": {"title": {"fillColor": "#fff", "fontFamily": "Arial"}}
        });
        let report = small_schema().validate(&tree);
        assert!(report.has_issue_at("chart.background.fillColor"));
        assert!(report.has_issue_at("chartPanel.grid"));
        let missing_leaf = report
            .issues()
            .iter()
            .find(|i| i.path == "chartPanel.grid")
            .unwrap();
        assert_eq!(missing_leaf.kind, IssueKind::MissingLeaf);
    }

    #[test]
    fn test_blocked_parent_reported_once() {
        let tree = json!({
            "chart": {"background": {"fillColor": "#000"}},
            "chartPanel": "oops"
        });
        let report = small_schema().validate(&tree);
        let blocked: Vec<&ValidationIssue> = report
            .issues()
            .iter()
            .filter(|i| i.path == "chartPanel")
            .collect();
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].kind, IssueKind::NotAnObject);
    }

    #[test]
    fn test_optional_subtree_validated_when_present() {
        let mut tree = valid_tree();
        tree["chartPanel"]["watermark"] = json!({"text": {"fillColor": "gray"}});
        let report = small_schema().validate(&tree);
        assert_eq!(report.len(), 1);
        assert!(report.has_issue_at("chartPanel.watermark.text.fontFamily"));
    }

    #[test]
    fn test_leaf_must_be_object() {
        let mut tree = valid_tree();
        tree["chartPanel"]["grid"] = json!("#333");
        let report = small_schema().validate(&tree);
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues()[0].kind, IssueKind::NotAnObject);
        assert_eq!(report.issues()[0].path, "chartPanel.grid");
    }

    #[test]
    fn test_falsy_values_are_accepted() {
        let mut tree = valid_tree();
        tree["chartPanel"]["grid"] = json!({
            "strokeColor": "#333",
            "strokeEnabled": false,
            "width": 0
        });
        tree["chartPanel"]["title"]["decoration"] = json!("");
        let report = small_schema().validate(&tree);
        assert!(report.is_valid(), "unexpected issues:\n{}", report);
    }

    #[test]
    fn test_gradient_checks() {
        let mut tree = valid_tree();
        tree["chart"]["background"] = json!({
            "fillColor": "#000",
            "linearGradient": [{"stop": 0, "color": "red"}, {"stop": "half", "color": "blue"}],
            "radialGradient": [
                {"radius": 1, "color": "white"},
                {"center": {"x": 0, "y": 0}, "radius": 5, "color": "black"}
            ]
        });
        let report = small_schema().validate(&tree);
        assert!(report.has_issue_at("chart.background.linearGradient[1].stop"));
        assert!(report.has_issue_at("chart.background.radialGradient[0].center"));
        assert_eq!(report.len(), 2, "report:\n{}", report);
    }

    #[test]
    fn test_plain_color_gradient_accepted_mixed_rejected() {
        let mut tree = valid_tree();
        tree["chart"]["background"] = json!({"fillColor": "#000", "linearGradient": ["red", "blue"]});
        assert!(small_schema().validate(&tree).is_valid());

        tree["chart"]["background"]["linearGradient"] = json!(["red", {"stop": 1, "color": "blue"}]);
        let report = small_schema().validate(&tree);
        assert!(report.has_issue_at("chart.background.linearGradient"));
    }

    #[test]
    fn test_plain_color_gradient_rejects_empty_colors() {
        let mut tree = valid_tree();
        tree["chart"]["background"] = json!({"fillColor": "#000", "linearGradient": ["red", ""]});
        let report = small_schema().validate(&tree);
        assert_eq!(report.len(), 1, "report:\n{}", report);
        assert!(report.has_issue_at("chart.background.linearGradient[1]"));
        assert_eq!(report.issues()[0].kind, IssueKind::EmptyField);

        tree["chart"]["background"]["linearGradient"] = json!([{"stop": 0, "color": ""}]);
        let report = small_schema().validate(&tree);
        assert!(report.has_issue_at("chart.background.linearGradient[0].color"));
    }

    #[test]
    fn test_radial_gradient_needs_two_circles() {
        let circle = json!({"center": {"x": 0, "y": 0}, "radius": 1, "color": "white"});
        let mut tree = valid_tree();
        tree["chart"]["background"] = json!({"fillColor": "#000", "radialGradient": [circle.clone()]});
        let report = small_schema().validate(&tree);
        assert_eq!(report.len(), 1, "report:\n{}", report);
        assert!(report.has_issue_at("chart.background.radialGradient"));
        assert_eq!(report.issues()[0].kind, IssueKind::WrongType);

        tree["chart"]["background"]["radialGradient"] = json!([]);
        assert!(small_schema().validate(&tree).has_issue_at("chart.background.radialGradient"));

        tree["chart"]["background"]["radialGradient"] = json!([circle.clone(), circle]);
        assert!(small_schema().validate(&tree).is_valid());
    }

    #[test]
    fn test_report_display_lists_each_issue() {
        let report = small_schema().validate(&json!({}));
        let text = report.to_string();
        assert_eq!(text.lines().count(), report.len());
        assert!(text.contains("chart.background: missing fill leaf"));
    }
}
