//! Value normalization applied to inline property values

use std::borrow::Cow;

/// Replace every backslash with a forward slash.
///
/// All other characters pass through untouched. Values without a
/// backslash are returned borrowed.
pub fn normalize_value(value: &str) -> Cow<'_, str> {
    if value.contains('\\') {
        Cow::Owned(value.replace('\\', "/"))
    } else {
        Cow::Borrowed(value)
    }
}
