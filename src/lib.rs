// ABOUTME: Library crate for byoman exposing public API for testing and the binary

#![allow(missing_docs)]

pub mod app;
pub mod byobu;
pub mod cli;
pub mod components;
pub mod config;
pub mod models;
