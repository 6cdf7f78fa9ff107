mod controller;
mod store;

pub use controller::{AnalysisKind, SessionController};
pub use store::SessionStore;
