pub mod feedback;
pub mod nav;
pub mod user;
