pub mod route;
pub mod templates;

pub use route::*;
pub use templates::*;
