pub mod details;

pub use details::MovieDetails;
