pub mod sqlite;
mod statement;
pub mod traits;

pub use sqlite::{is_constraint_violation, SqliteStorage};
pub use statement::Statement;
pub use traits::{
    Executor, Order, OrderParseError, Query, Storage, StorageRead, StorageTx,
    StorageWrite,
};
