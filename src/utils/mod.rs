pub mod checkbox;
pub mod courses;
pub mod document;
pub mod portal;
pub mod record;
pub mod semester;
pub mod student;
