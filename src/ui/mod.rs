pub mod ansi;
pub mod table;
pub mod views;
pub mod width;
