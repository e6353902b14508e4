pub mod api_utils;
pub mod chart_frame;
pub mod clock;
pub mod components;
pub mod config;
pub mod icons;
pub mod number_format;
