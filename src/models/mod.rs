mod budget;
mod category;
mod category_rule;
mod transaction;

pub use budget::Budget;
pub use category::Category;
pub use category_rule::CategoryRule;
pub use transaction::Transaction;
