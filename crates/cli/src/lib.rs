pub mod driver;
pub mod logging;

pub use driver::{prepare_environment, run};
