//! Top level error of the command line tool.

use thiserror::Error;

use crate::config::ConfigError;
use crate::help_menu::HelpMenuError;
use crate::log_info::LogInfoError;
use crate::templates::TemplateError;
use crate::translation::TranslationError;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    HelpMenu(#[from] HelpMenuError),

    #[error(transparent)]
    LogInfo(#[from] LogInfoError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}
