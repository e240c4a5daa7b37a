pub mod layout;
pub mod map_view;
pub mod navbar;
pub mod recommendation_card;
pub mod soil_form;
pub mod weather_card;
