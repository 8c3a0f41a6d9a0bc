pub mod adapters;
pub mod event_files;
pub mod project_tree;

pub use adapters::ShellMakeRunner;
pub use project_tree::ProjectTree;
