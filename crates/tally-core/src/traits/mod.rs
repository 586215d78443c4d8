//! Seams to the collaborators outside this subsystem.

pub mod feedback_store;
pub mod merchant_research;

pub use feedback_store::IFeedbackStore;
pub use merchant_research::{IMerchantResearch, ResearchFinding};
