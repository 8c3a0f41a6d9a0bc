//! makei: resolve IBM i build variables and drive Better Object Builder builds.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::*;
