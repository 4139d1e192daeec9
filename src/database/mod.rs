pub mod commands;
pub mod database;
pub mod options;
pub mod postgres;
pub mod repository;
pub mod request_manager;
pub mod table;
