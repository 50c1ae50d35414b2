// src/handlers/mod.rs

pub mod auth;
pub mod chatbot;
pub mod questions;
pub mod results;
pub mod tips;
