pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod models;
pub mod routes;
