pub mod ecosystem;
pub mod version;

pub use ecosystem::{Ecosystem, Repository};
pub use version::Version;
