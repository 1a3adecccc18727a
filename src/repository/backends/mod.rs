pub mod memory;
pub mod sea_orm;

pub use memory::MemoryVisitStore;
pub use sea_orm::SeaOrmVisitStore;
