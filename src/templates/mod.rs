//! Issue template maintenance.
//!
//! Keeps the version dropdowns of the GitHub issue forms in line with the
//! released Courseplay and game versions.
mod error;
mod patcher;
mod versions;

pub use error::TemplateError;
pub use patcher::{
    PatchOutcome,
    TemplateReport,
    discover_templates,
    patch_template,
    patch_template_file,
    update_templates,
};
pub use versions::{
    VersionConfig,
    VersionLists,
    sort_versions,
};
