// Handler for the ResolveGradient RPC
use std::sync::Arc;
use shared::StylePath;
use tonic::{Response, Status};

use super::helpers::{theme_or_default, to_proto_stops};
use crate::registry::SharedRegistry;
use crate::services::{ResolveGradientResponse, ResolveStyleRequest};

pub async fn handle_resolve_gradient(
    req_payload: ResolveStyleRequest,
    registry: Arc<SharedRegistry>,
    default_theme: &str,
) -> Result<Response<ResolveGradientResponse>, Status> {
    let theme = theme_or_default(&req_payload.theme, default_theme);
    let path = StylePath::parse(&req_payload.path);

    let snapshot = registry.snapshot();
    let response = match snapshot.resolver().resolve_gradient(theme, &path)? {
        Some(gradient) => {
            let (radial, stops) = to_proto_stops(gradient);
            ResolveGradientResponse {
                has_gradient: true,
                radial,
                stops,
            }
        }
        None => ResolveGradientResponse {
            has_gradient: false,
            radial: false,
            stops: vec![],
        },
    };
    Ok(Response::new(response))
}
