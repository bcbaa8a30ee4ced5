pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod form;
pub mod lookup;
pub mod models;
pub mod ui;
pub mod validation;
