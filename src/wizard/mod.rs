pub mod engine;
pub mod session;

pub use engine::{QuoteWizard, StepInput, WizardError, WizardStep};
pub use session::{SessionLimits, SessionView, WizardSessions};
