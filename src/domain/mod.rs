pub mod message;
pub mod types;

pub use message::Message;
pub use types::{Classification, ClassificationResult};
