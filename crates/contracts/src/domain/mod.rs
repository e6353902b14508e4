pub mod a001_movie;
