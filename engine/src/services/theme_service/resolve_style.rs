// Handler for the ResolveStyle RPC
use std::sync::Arc;
use shared::StylePath;
use tonic::{Response, Status};

use super::helpers::theme_or_default;
use crate::error::ThemeError;
use crate::registry::SharedRegistry;
use crate::services::{ResolveStyleRequest, ResolveStyleResponse};

pub async fn handle_resolve_style(
    req_payload: ResolveStyleRequest,
    registry: Arc<SharedRegistry>,
    default_theme: &str,
) -> Result<Response<ResolveStyleResponse>, Status> {
    let theme = theme_or_default(&req_payload.theme, default_theme);
    let path = StylePath::parse(&req_payload.path);

    let snapshot = registry.snapshot();
    let style = snapshot.resolver().resolve(theme, &path)?;
    let style_json = serde_json::to_string(&style).map_err(ThemeError::from)?;

    Ok(Response::new(ResolveStyleResponse {
        theme: theme.to_string(),
        path: path.to_string(),
        kind: style.kind().as_str().to_string(),
        style_json,
    }))
}
