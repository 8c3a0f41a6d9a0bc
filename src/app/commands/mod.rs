pub mod build;
pub mod compile;
pub mod inspect;
