pub mod data;
pub mod package;
pub mod platform;
pub mod resolve;
pub mod template;

pub use package::Package;
pub use platform::Platform;
pub use resolve::{neko_version_for, resolve};
