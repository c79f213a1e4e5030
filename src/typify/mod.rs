//! Typification workflow: summary text, executive enrichment, fixed-field
//! autofill and form dispatch planning.

pub mod autofill;
pub mod dispatch;
pub mod summary;

pub use autofill::autofill_fixed_fields;
pub use dispatch::{plan_dispatch, plan_hidden_submission, silent_inputs, HiddenSubmission, PreparedForm};
pub use summary::{collect_data, summary_text, ActiveField};
