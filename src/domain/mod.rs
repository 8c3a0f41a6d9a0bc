pub mod build_vars;
pub mod dir_config;
pub mod error;
pub mod event_log;
pub mod make;
pub mod objlib;
pub mod project;
pub mod rules;
pub mod target_groups;

pub use build_vars::BuildVars;
pub use dir_config::{DirConfig, DirectoryOverride, ResolvedDirConfig};
pub use error::AppError;
pub use make::MakeInvocation;
pub use project::{Ccsid, ProjectDescriptor};
pub use rules::{TargetDecl, TargetOwnership};
pub use target_groups::TargetGroup;
