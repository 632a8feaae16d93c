use crate::schema::SplitViewConfig;

use super::helpers::validate_range;

pub(crate) fn validate_history(errors: &mut Vec<String>, config: &SplitViewConfig) {
    validate_range(
        errors,
        "history.max_entries",
        config.history.max_entries,
        1,
        10_000,
    );
}
