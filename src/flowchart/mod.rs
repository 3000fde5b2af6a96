pub mod artifact;
pub mod conversion;
pub mod definition;
pub mod graph;
pub mod json;

pub use artifact::*;
pub use conversion::*;
pub use definition::*;
pub use graph::*;
pub use json::*;
