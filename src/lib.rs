pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod openapi;
pub mod rest;
pub mod services;
