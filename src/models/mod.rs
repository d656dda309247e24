pub mod catalog;
pub mod club;
pub mod fixture;
pub mod payload;
pub mod player;
pub mod request_log;
pub mod response;
pub mod schema;
