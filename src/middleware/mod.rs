pub mod body;
pub mod layers;

pub use body::JsonOrForm;
pub use layers::{cors_layer, trace_layer};
