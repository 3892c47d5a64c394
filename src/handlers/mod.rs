pub mod upload;
pub mod preview;
pub mod query;
pub mod describe;

pub use upload::*;
pub use preview::*;
pub use query::*;
pub use describe::*;
