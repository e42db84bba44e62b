pub mod artifact;
pub mod definition;
pub mod record;
