pub mod clauses;
pub mod placeholders;
pub mod rules;

pub use clauses::*;
pub use placeholders::*;
pub use rules::*;
