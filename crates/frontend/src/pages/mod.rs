pub mod home;
pub mod map_display;
pub mod not_found;
