pub mod clients;
pub mod consts;
pub mod database;
pub mod model;
