pub mod catalog;
pub mod pages;
pub mod templates;
pub mod usb;

pub use catalog::{handle_generate_manual, GenerateManualResponse, __path_handle_generate_manual};
pub use pages::handle_index;
pub use templates::{
    handle_delete_template, handle_list_templates, handle_save_template, ActionResponse,
    DeleteTemplateRequest, SaveTemplateRequest,
};
pub use templates::{
    __path_handle_delete_template, __path_handle_list_templates, __path_handle_save_template,
};
pub use usb::{handle_prepare_usb, PrepareUsbRequest, PrepareUsbResponse, __path_handle_prepare_usb};
