pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod request;
pub mod sorting;
pub mod web;
