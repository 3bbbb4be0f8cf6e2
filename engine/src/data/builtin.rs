// Themes compiled into the engine.

pub struct BuiltinTheme {
    pub name: &'static str,
    pub json: &'static str,
}

/// Registered in this order by `ThemeRegistry::with_builtin_themes`.
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        name: "Dark",
        json: include_str!("../../themes/dark.json"),
    },
    BuiltinTheme {
        name: "Light",
        json: include_str!("../../themes/light.json"),
    },
    BuiltinTheme {
        name: "Beet",
        json: include_str!("../../themes/beet.json"),
    },
];
