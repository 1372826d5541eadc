pub mod catalog;
pub mod categories;
pub mod export;
pub mod template_store;
pub mod workspace;

pub use catalog::{CatalogBuilder, CatalogReport};
pub use export::{ExportReport, ExportTarget, UsbExporter};
pub use template_store::{
    decode_image_payload, DeleteReport, SaveReport, SaveTemplate, TemplateStore,
};
