pub mod animation;
pub mod ballistics;
pub mod batch;
pub mod config;
pub mod error;
pub mod query;
pub mod sampling;
pub mod window;
