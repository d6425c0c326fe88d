//! Relational persistence. Plain query functions over the shared pool;
//! queries are bound at runtime so the crate builds without a live database.

pub mod events;
pub mod sessions;
pub mod users;
