pub mod message;
pub mod params;
