//! Range and format checks over a parsed config.
//!
//! Every section reports into one list so a single reload shows all
//! problems at once instead of the first one.

mod display;
mod framing;
mod helpers;
mod history;


use splitview_common::ConfigError;

use crate::schema::SplitViewConfig;

pub use framing::is_valid_domain_entry;

type SectionCheck = fn(&mut Vec<String>, &SplitViewConfig);

const SECTIONS: [SectionCheck; 3] = [
    display::validate_display,
    framing::validate_framing,
    history::validate_history,
];

/// Problems are joined with `"; "` into one `ValidationError`.
pub fn validate(config: &SplitViewConfig) -> Result<(), ConfigError> {
    let mut problems = Vec::new();
    for check in SECTIONS {
        check(&mut problems, config);
    }
    if problems.is_empty() {
        return Ok(());
    }
    Err(ConfigError::ValidationError(problems.join("; ")))
}
