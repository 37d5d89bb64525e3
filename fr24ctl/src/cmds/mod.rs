pub use fetch::*;
pub use list::*;

mod fetch;
mod list;
