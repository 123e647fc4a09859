pub mod collaborate;
pub mod pitch;

pub use collaborate::{ContactForm, ContactInquiry};
pub use pitch::{PitchDraft, PitchReceipt, PitchStep, PitchWizard, Timeline, WizardError};
