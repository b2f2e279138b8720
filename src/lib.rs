#![allow(clippy::implicit_hasher)]

pub mod logging;
pub mod constants;
pub mod models;
pub mod normalize;
pub mod render;
pub mod storage;
pub mod refresh;
pub mod flows;
pub mod controller;
pub mod api;
pub mod components;

pub use components::app::App;
