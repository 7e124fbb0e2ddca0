#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

pub mod config;
pub mod error;
pub mod generate;
pub mod render;
