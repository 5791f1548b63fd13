//! Wire messages in, region mutations out.

mod apply;
mod dispatcher;
mod error;
mod queue;

pub use apply::{apply, Applied};
pub use dispatcher::{DispatchStats, Dispatcher};
pub use error::EventError;
pub use queue::{channel, EventQueue, EventSender};
