pub mod controller;
pub mod format;
pub mod keyboard;
pub mod quality;
pub mod simulated;
pub mod suppression;
pub mod surface;
pub mod timers;
pub mod widget;


pub use controller::*;
pub use keyboard::{KeyDisposition, ShortcutKey};
pub use quality::QualityRequest;
pub use simulated::SimulatedWidgetFactory;
pub use suppression::SuppressionConfig;
pub use surface::*;
pub use widget::*;
