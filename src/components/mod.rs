#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod coach_row;
pub mod crowd_monitor;
pub mod refresh_controls;
pub mod search_panel;
pub mod train_list;
