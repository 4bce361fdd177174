//! Pure data structures implementing the [`Record`](record_store::Record) trait.

pub mod category;
pub mod ids;
pub mod priority;
pub mod ticket;
pub mod user;

pub use category::*;
pub use ids::*;
pub use priority::*;
pub use ticket::*;
pub use user::*;
