pub mod result_panel;
pub mod spinner;
pub mod toast;

pub use result_panel::render_result_panel;
pub use spinner::spinner;
pub use toast::{Toast, ToastManager, ToastType};
