// Handler for the GetTheme RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::theme_or_default;
use crate::error::ThemeError;
use crate::registry::SharedRegistry;
use crate::services::{GetThemeRequest, GetThemeResponse};

pub async fn handle_get_theme(
    req_payload: GetThemeRequest,
    registry: Arc<SharedRegistry>,
    default_theme: &str,
) -> Result<Response<GetThemeResponse>, Status> {
    let theme = theme_or_default(&req_payload.theme, default_theme);
    let tree = registry.get(theme)?;
    let tree_json = serde_json::to_string(tree.as_value()).map_err(ThemeError::from)?;

    Ok(Response::new(GetThemeResponse {
        theme: theme.to_string(),
        tree_json,
    }))
}
