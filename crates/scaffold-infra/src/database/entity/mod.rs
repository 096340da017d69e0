//! SeaORM entities for the scaffold schema.

pub mod group;
pub mod user;
pub mod user_group;
