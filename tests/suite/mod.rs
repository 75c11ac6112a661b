//! Integration test suite modules

mod catalog;
mod config;
mod controller;
