// Handler for the ListThemes RPC
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use crate::registry::SharedRegistry;
use crate::services::ThemeName;

pub async fn handle_list_themes(
    registry: Arc<SharedRegistry>,
) -> Result<Response<ReceiverStream<Result<ThemeName, Status>>>, Status> {
    // Names come from one snapshot; later registrations are not streamed.
    let names = registry.names();
    tracing::debug!(count = names.len(), "Streaming theme names");

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        for name in names {
            if let Err(e) = tx.send(Ok(ThemeName { name })).await {
                tracing::warn!(error = ?e, "Client dropped ListThemes stream");
                return;
            }
        }
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
