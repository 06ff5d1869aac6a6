pub mod chrono;
pub mod enums;
pub mod string;
