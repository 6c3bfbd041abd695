pub mod cohort;
pub mod error;
pub mod schema;
pub mod traits;
pub mod types;

pub use cohort::*;
pub use error::*;
pub use traits::*;
pub use types::*;
