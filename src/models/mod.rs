pub mod config;
pub mod template;

pub use config::{AppConfig, CatalogConfig, ExportConfig, PlacementDefaults};
pub use template::{Placement, TemplateCode, TemplateSummary};
