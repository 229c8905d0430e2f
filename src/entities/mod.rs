pub mod comment;
pub mod film;
