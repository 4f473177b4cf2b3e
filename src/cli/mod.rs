pub mod fields;
pub mod server;
