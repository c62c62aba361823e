pub mod projection;
pub mod seed;
pub mod session;
pub mod simulation;
pub mod store;

pub use projection::{messages_in, DashboardStats, View};
pub use seed::{classify_seed_batch, SEED_MESSAGES};
pub use session::Session;
pub use simulation::SimulatedDraft;
