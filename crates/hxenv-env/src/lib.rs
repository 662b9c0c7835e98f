pub mod overlay;

pub use overlay::{EnvOverlay, PATH_VAR};
