pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod store;

// Re-export commonly used items
pub use memory::MemoryUserStore;
pub use pool::{create_pool, run_migrations};
pub use postgres::PgUserStore;
pub use repos::user::{UserRepo, UserRow};
pub use store::UserStore;
