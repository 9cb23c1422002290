pub mod batch;
pub mod catalog;
pub mod results;

pub use batch::*;
pub use catalog::*;
pub use results::*;
