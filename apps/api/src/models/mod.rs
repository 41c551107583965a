pub mod guide;
pub mod profile;
