pub mod criteria;
pub mod exist_by_id;
pub mod find_by_id;
pub mod find_where;
pub mod load_all;
pub mod pagination;
pub mod soft_delete;
pub mod stage_changes;
pub mod tracked;

// Re-exports
pub use criteria::*;
pub use exist_by_id::*;
pub use find_by_id::*;
pub use find_where::*;
pub use load_all::*;
pub use pagination::*;
pub use soft_delete::*;
pub use stage_changes::*;
pub use tracked::*;
