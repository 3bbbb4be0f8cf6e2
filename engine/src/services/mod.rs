// gRPC surface of the theme engine. Message and service types are generated
// from proto/themes.proto by build.rs.
tonic::include_proto!("themes");

pub mod theme_service;

pub use theme_engine_client::ThemeEngineClient;
pub use theme_engine_server::{ThemeEngine, ThemeEngineServer};
