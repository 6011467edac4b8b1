pub mod app;
pub mod backend;
pub mod config;
pub mod conversation;
pub mod message;
pub mod normalize;
pub mod paths;
