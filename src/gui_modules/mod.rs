// Export all components and types
mod battery_box;
mod battery_canvas;
mod charge_panel;
mod header;
mod layout;
mod types;

// Re-export for easy import
pub use battery_box::*;
pub use battery_canvas::*;
pub use charge_panel::*;
pub use header::*;
pub use layout::*;
pub use types::*;
