pub mod query;
pub mod table;
