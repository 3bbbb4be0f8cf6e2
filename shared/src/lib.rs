// Style value types shared by the theme engine and its consumers.
pub mod models;
pub mod utils;

pub use models::{
    ColorStop, FillPriority, FillTheme, Gradient, LeafKind, LeafStyle, LineCap, LineJoin,
    LineStyle, Point, RadialColorStop, RadialGradientStop, StrokePriority, StrokeTheme,
    TextTheme, UnknownVariant,
};
pub use utils::StylePath;
