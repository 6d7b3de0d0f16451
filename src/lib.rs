#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

pub mod code_generator;
pub mod common;
pub mod config;
pub mod eraser;
pub mod flight;
pub mod generator;
pub mod populator;
pub mod store;
