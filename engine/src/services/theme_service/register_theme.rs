// Handler for the RegisterTheme RPC
use std::sync::Arc;
use tokio::sync::Mutex;
use tonic::{Response, Status};

use super::helpers::to_proto_issue;
use crate::data::ThemeStore;
use crate::error::ThemeError;
use crate::registry::{SharedRegistry, ThemeTree};
use crate::services::{RegisterThemeRequest, RegisterThemeResponse};

pub async fn handle_register_theme(
    req_payload: RegisterThemeRequest,
    registry: Arc<SharedRegistry>,
    store: Option<&ThemeStore>,
    save_lock: &Mutex<()>,
) -> Result<Response<RegisterThemeResponse>, Status> {
    let tree = ThemeTree::from_json_str(&req_payload.tree_json)?;

    let name = if req_payload.name.is_empty() {
        match tree.declared_name() {
            Some(name) => name.to_string(),
            None => {
                return Err(Status::invalid_argument(
                    "Theme has no name: set the request name or a top-level \"name\" field",
                ))
            }
        }
    } else {
        req_payload.name
    };

    match registry.register(name.clone(), tree) {
        Ok(()) => {}
        Err(ThemeError::InvalidTheme { name, report }) => {
            // Validation problems go back to the author as data.
            return Ok(Response::new(RegisterThemeResponse {
                success: false,
                message: format!("Theme '{}' failed validation with {} issue(s)", name, report.len()),
                issues: report.issues().iter().map(to_proto_issue).collect(),
            }));
        }
        Err(e) => return Err(e.into()),
    }

    let mut message = format!("Registered theme '{}'", name);
    if let Some(store) = store.filter(|s| s.auto_save()) {
        // One save at a time; the snapshot is taken under the lock so the last
        // write always carries every registration published before it.
        let _guard = save_lock.lock().await;
        let snapshot = registry.snapshot();
        let store = store.clone();
        let saved = tokio::task::spawn_blocking(move || store.save(&snapshot))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|result| result);
        if let Err(e) = saved {
            tracing::error!(theme = %name, error = %format!("{:#}", e), "Failed to save theme store");
            message.push_str(&format!(" (store not saved: {})", e));
        }
    }

    Ok(Response::new(RegisterThemeResponse {
        success: true,
        message,
        issues: vec![],
    }))
}
