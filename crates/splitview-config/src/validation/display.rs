use crate::schema::SplitViewConfig;

use super::helpers::validate_range;

pub(crate) fn validate_display(errors: &mut Vec<String>, config: &SplitViewConfig) {
    validate_range(errors, "display.max_panels", config.display.max_panels, 2, 8);
}
