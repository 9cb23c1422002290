pub mod analyze;
pub mod recommend;
