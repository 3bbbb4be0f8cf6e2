// engine/src/services/theme_service/mod.rs
// MyThemeEngine and its ThemeEngine impl. Each RPC is handled in its own submodule.

use super::{
    GetThemeRequest, GetThemeResponse, ListThemesRequest, RegisterThemeRequest,
    RegisterThemeResponse, ResolveGradientResponse, ResolveStyleRequest, ResolveStyleResponse,
    ThemeEngine, ThemeName,
};
use crate::config::EngineSettings;
use crate::data::ThemeStore;
use crate::registry::SharedRegistry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod get_theme;
pub mod helpers;
pub mod list_themes;
pub mod register_theme;
pub mod resolve_gradient;
pub mod resolve_style;

pub struct MyThemeEngine {
    registry: Arc<SharedRegistry>,
    default_theme: String,
    store: Option<ThemeStore>,
    save_lock: Mutex<()>,
}

impl MyThemeEngine {
    pub fn new(registry: Arc<SharedRegistry>, default_theme: impl Into<String>) -> Self {
        MyThemeEngine {
            registry,
            default_theme: default_theme.into(),
            store: None,
            save_lock: Mutex::new(()),
        }
    }

    pub fn from_settings(registry: Arc<SharedRegistry>, settings: &EngineSettings) -> Self {
        MyThemeEngine {
            registry,
            default_theme: settings.default_theme.clone(),
            store: settings.theme_store(),
            save_lock: Mutex::new(()),
        }
    }

    pub fn with_store(mut self, store: ThemeStore) -> Self {
        self.store = Some(store);
        self
    }
}

#[tonic::async_trait]
impl ThemeEngine for MyThemeEngine {
    type ListThemesStream = ReceiverStream<Result<ThemeName, Status>>;
    async fn list_themes(&self, _request: Request<ListThemesRequest>) -> Result<Response<Self::ListThemesStream>, Status> {
        tracing::info!("Received ListThemesRequest");
        list_themes::handle_list_themes(self.registry.clone()).await
    }

    async fn get_theme(&self, request: Request<GetThemeRequest>) -> Result<Response<GetThemeResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(theme = %req_payload.theme, "Received GetThemeRequest");
        get_theme::handle_get_theme(req_payload, self.registry.clone(), &self.default_theme).await
    }

    async fn resolve_style(&self, request: Request<ResolveStyleRequest>) -> Result<Response<ResolveStyleResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(theme = %req_payload.theme, path = %req_payload.path, "Received ResolveStyleRequest");
        resolve_style::handle_resolve_style(req_payload, self.registry.clone(), &self.default_theme).await
    }

    async fn resolve_gradient(&self, request: Request<ResolveStyleRequest>) -> Result<Response<ResolveGradientResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(theme = %req_payload.theme, path = %req_payload.path, "Received ResolveGradientRequest");
        resolve_gradient::handle_resolve_gradient(req_payload, self.registry.clone(), &self.default_theme).await
    }

    async fn register_theme(&self, request: Request<RegisterThemeRequest>) -> Result<Response<RegisterThemeResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(theme = %req_payload.name, bytes = req_payload.tree_json.len(), "Received RegisterThemeRequest");
        register_theme::handle_register_theme(req_payload, self.registry.clone(), self.store.as_ref(), &self.save_lock).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ThemeRegistry;
    use serde_json::{json, Value};
    use tempfile::tempdir;
    use tokio_stream::StreamExt;

    fn create_test_engine() -> MyThemeEngine {
        let registry = ThemeRegistry::with_builtin_themes().unwrap();
        MyThemeEngine::new(Arc::new(SharedRegistry::new(registry)), "Light")
    }

    fn resolve_request(theme: &str, path: &str) -> Request<ResolveStyleRequest> {
        Request::new(ResolveStyleRequest {
            theme: theme.to_string(),
            path: path.to_string(),
        })
    }

    fn custom_theme_json(name: &str) -> String {
        let registry = ThemeRegistry::with_builtin_themes().unwrap();
        let mut tree = registry.get("Dark").unwrap().as_value().clone();
        tree["name"] = json!(name);
        tree["chart"]["background"]["fillColor"] = json!("#224466");
        tree.to_string()
    }

    #[tokio::test]
    async fn test_list_themes_streams_in_registration_order() {
        let engine = create_test_engine();
        let response = engine.list_themes(Request::new(ListThemesRequest {})).await.unwrap();
        let names: Vec<String> = response
            .into_inner()
            .map(|item| item.unwrap().name)
            .collect()
            .await;
        assert_eq!(names, vec!["Dark", "Light", "Beet"]);
    }

    #[tokio::test]
    async fn test_get_theme_empty_name_uses_default() {
        let engine = create_test_engine();
        let response = engine
            .get_theme(Request::new(GetThemeRequest { theme: String::new() }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.theme, "Light");
        let tree: Value = serde_json::from_str(&response.tree_json).unwrap();
        assert_eq!(tree["name"], "Light");
    }

    #[tokio::test]
    async fn test_get_unknown_theme_is_not_found() {
        let engine = create_test_engine();
        let status = engine
            .get_theme(Request::new(GetThemeRequest { theme: "Nonexistent".into() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert!(status.message().contains("Nonexistent"));
    }

    #[tokio::test]
    async fn test_resolve_style_returns_kind_and_full_leaf() {
        let engine = create_test_engine();
        let response = engine
            .resolve_style(resolve_request("Dark", "plot.bar.candle.upCandle.fill"))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.kind, "fill");
        let style: Value = serde_json::from_str(&response.style_json).unwrap();
        assert_eq!(style["kind"], "fill");
        assert_eq!(style["fillEnabled"], true);
        assert!(style["fillColor"].is_string());
    }

    #[tokio::test]
    async fn test_resolve_style_bad_path_is_not_found() {
        let engine = create_test_engine();
        let status = engine
            .resolve_style(resolve_request("Dark", "plot.bar.candle"))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_gradient() {
        let engine = create_test_engine();
        let response = engine
            .resolve_gradient(resolve_request("Dark", "button.fill"))
            .await
            .unwrap()
            .into_inner();
        assert!(response.has_gradient);
        assert!(!response.radial);
        assert_eq!(response.stops.last().map(|s| s.stop), Some(1.0));

        let response = engine
            .resolve_gradient(resolve_request("Dark", "chart.background"))
            .await
            .unwrap()
            .into_inner();
        assert!(!response.has_gradient);
        assert!(response.stops.is_empty());

        let status = engine
            .resolve_gradient(resolve_request("Dark", "chart.border"))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_register_theme_valid_then_resolvable() {
        let engine = create_test_engine();
        let response = engine
            .register_theme(Request::new(RegisterThemeRequest {
                name: String::new(),
                tree_json: custom_theme_json("Ocean"),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(response.success, "{}", response.message);

        let resolved = engine
            .resolve_style(resolve_request("Ocean", "chart.background"))
            .await
            .unwrap()
            .into_inner();
        let style: Value = serde_json::from_str(&resolved.style_json).unwrap();
        assert_eq!(style["fillColor"], "#224466");
    }

    #[tokio::test]
    async fn test_register_theme_invalid_reports_every_issue() {
        let engine = create_test_engine();
        let tree = json!({
            "chart": {"background": {"fillColor": ""}, "border": {"strokeColor": "#000", "lineStyle": "wavy"}}
        });
        let response = engine
            .register_theme(Request::new(RegisterThemeRequest {
                name: "Broken".into(),
                tree_json: tree.to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(!response.success);
        assert!(response.issues.len() > 2);
        assert!(response
            .issues
            .iter()
            .any(|i| i.path == "chart.border.lineStyle" && i.kind == "invalid_enum"));
        assert!(response
            .issues
            .iter()
            .any(|i| i.path == "chart.background.fillColor" && i.kind == "empty_field"));

        let status = engine
            .get_theme(Request::new(GetThemeRequest { theme: "Broken".into() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn test_register_theme_malformed_json_or_missing_name() {
        let engine = create_test_engine();
        let status = engine
            .register_theme(Request::new(RegisterThemeRequest {
                name: "X".into(),
                tree_json: "{ nope".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);

        let status = engine
            .register_theme(Request::new(RegisterThemeRequest {
                name: String::new(),
                tree_json: "{}".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_register_theme_auto_saves_store() {
        let dir = tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("themes.json"));
        let engine = create_test_engine().with_store(store.clone());

        let response = engine
            .register_theme(Request::new(RegisterThemeRequest {
                name: "Ocean".into(),
                tree_json: custom_theme_json("Ocean"),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(response.success);

        let stored = store.load().unwrap().unwrap();
        assert_eq!(
            stored.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Dark", "Light", "Beet", "Ocean"]
        );
    }

    #[tokio::test]
    async fn test_concurrent_registrations_all_reach_store() {
        let dir = tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("themes.json"));
        let engine = Arc::new(create_test_engine().with_store(store.clone()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move {
                    let name = format!("Custom{}", i);
                    let request = Request::new(RegisterThemeRequest {
                        name: name.clone(),
                        tree_json: custom_theme_json(&name),
                    });
                    engine.register_theme(request).await.unwrap().into_inner()
                })
            })
            .collect();
        for handle in handles {
            let response = handle.await.unwrap();
            assert!(response.success, "{}", response.message);
            assert!(!response.message.contains("not saved"), "{}", response.message);
        }

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.len(), 3 + 8);
        for i in 0..8 {
            assert!(stored.contains_key(&format!("Custom{}", i)));
        }
    }
}
