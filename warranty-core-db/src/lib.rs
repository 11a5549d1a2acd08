//! Storage-agnostic building blocks of the warranty persistence core:
//! entity contracts and models, the timestamp interceptor and the
//! repository traits implemented by the storage crates.

pub mod interceptor;
pub mod models;
pub mod repository;
pub mod utils;

pub use interceptor::*;
pub use models::*;
