// Conversions between engine types and generated protobuf messages
use shared::Gradient;

use crate::schema::ValidationIssue;
use crate::services::{GradientStop, ThemeIssue};

/// An empty request name selects the configured default theme.
pub fn theme_or_default<'a>(requested: &'a str, default_theme: &'a str) -> &'a str {
    if requested.is_empty() {
        default_theme
    } else {
        requested
    }
}

pub fn to_proto_issue(issue: &ValidationIssue) -> ThemeIssue {
    ThemeIssue {
        path: issue.path.clone(),
        kind: issue.kind.as_str().to_string(),
        message: issue.message.clone(),
    }
}

/// Returns whether the gradient is radial, and its stops in declared order.
pub fn to_proto_stops(gradient: Gradient) -> (bool, Vec<GradientStop>) {
    match gradient {
        Gradient::Linear(stops) => (
            false,
            stops
                .into_iter()
                .map(|s| GradientStop {
                    stop: s.stop,
                    color: s.color,
                    center_x: None,
                    center_y: None,
                    radius: None,
                })
                .collect(),
        ),
        Gradient::Radial(stops) => (
            true,
            stops
                .into_iter()
                .map(|s| GradientStop {
                    stop: s.stop,
                    color: s.color,
                    center_x: Some(s.center.x),
                    center_y: Some(s.center.y),
                    radius: Some(s.radius),
                })
                .collect(),
        ),
    }
}
