// Validates theme files against the chart schema and prints one report for all of them.
//
// Usage: theme_audit [DIR]...
// Without arguments the embedded themes are audited.
use anyhow::Result;
use engine::data::{ThemeLoader, BUILTIN_THEMES};
use engine::registry::ThemeTree;
use engine::schema::chart_schema;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let schema = chart_schema();
    let dirs: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();

    let mut themes: Vec<(String, Result<ThemeTree>)> = Vec::new();
    if dirs.is_empty() {
        for builtin in BUILTIN_THEMES {
            let tree = ThemeTree::from_json_str(builtin.json).map_err(anyhow::Error::from);
            themes.push((format!("<builtin> {}", builtin.name), tree));
        }
    } else {
        for dir in &dirs {
            for (path, loaded) in ThemeLoader::load_dir(dir)? {
                themes.push((path.display().to_string(), loaded.map(|(_, tree)| tree)));
            }
        }
    }

    tracing::info!(themes = themes.len(), "Auditing themes");
    let mut failed = 0;
    for (source, loaded) in &themes {
        match loaded {
            Ok(tree) => {
                let report = schema.validate(tree.as_value());
                if report.is_valid() {
                    println!("ok      {}", source);
                } else {
                    failed += 1;
                    println!("INVALID {} ({} issue(s))", source, report.len());
                    println!("{}", report);
                }
            }
            Err(e) => {
                failed += 1;
                println!("ERROR   {}: {:#}", source, e);
            }
        }
    }

    println!("{} theme(s) checked, {} failed", themes.len(), failed);
    Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
