pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod navigator;
pub mod predict;
pub mod prediction;
pub mod transport;
