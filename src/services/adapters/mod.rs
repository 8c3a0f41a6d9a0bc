pub mod shell_make;

pub use shell_make::ShellMakeRunner;
