//! Display formatting for terminal output
//!
//! Tables and summaries for transactions, categories, savings goals and the
//! session status. Reports format themselves; see `crate::reports`.

pub mod category;
pub mod savings;
pub mod status;
pub mod transaction;

pub use category::{format_category_details, format_category_table};
pub use savings::{format_goal_details, format_goal_table};
pub use status::format_status;
pub use transaction::{format_transaction_details, format_transaction_table};
