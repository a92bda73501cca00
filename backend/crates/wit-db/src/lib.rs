pub mod connection;
pub mod criteria_sql;
pub mod error;
pub mod repositories;
mod row;
mod store;

pub use connection::database::{connect, connect_in_memory, run_migrations};
pub use error::{DbError, Result};
pub use repositories::iteration_repository::IterationRepository;
pub use repositories::space_repository::SpaceRepository;
pub use repositories::work_item_repository::WorkItemRepository;
