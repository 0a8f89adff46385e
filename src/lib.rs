// src/lib.rs

//! Car Price Bot Library

pub mod bot;
pub mod error;
pub mod handler;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
