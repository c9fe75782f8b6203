// Application layer - Use case interactors

pub mod container;
pub mod honeypot_interactor;

// Re-export interactors
pub use container::AppContainer;
pub use honeypot_interactor::{FileReport, HoneypotInteractor, RunReport};
