mod make_runner;

pub use make_runner::{MakeExit, MakeRunner};
