//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read back from PostgreSQL.

mod attendance;
mod guardian;
mod student;
mod teacher;
mod user;
