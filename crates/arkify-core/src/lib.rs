pub mod config;
pub mod duration;
pub mod error;
pub mod git;
pub mod io;
pub mod kpi;
pub mod layout;
pub mod paths;
pub mod plan;
pub mod project;
pub mod story;
pub mod types;

pub use error::{ArkifyError, Result};
