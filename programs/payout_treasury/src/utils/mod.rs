pub mod space;
pub mod time;
