//! Reading the first usable key out of an ordered list of candidates.

use super::kinds::Kind;
use super::read_single;
use crate::logging::{format_key_list, null_sink};
use crate::options::Resolved;

/// Try each candidate in order and return the first value produced.
///
/// A failing candidate is logged as informational only: its error line is
/// swallowed and no default applies to it. Once every candidate has failed,
/// the call's default is used if there is one, otherwise a single error
/// naming all candidates is reported and `None` returned so the caller can
/// mark its owner.
pub(super) fn read_candidates<K: Kind>(
    keys: &[String],
    options: &Resolved<K::Value>,
) -> Option<K::Value> {
    let candidate_options = Resolved {
        default_value: None,
        error: null_sink(),
        ..options.clone()
    };

    for key in keys {
        if let Some(value) = read_single::<K>(key, &candidate_options) {
            return Some(value);
        }
        (options.log)(&format!("Could not use {} \"{key}\".", K::CANDIDATE_LABEL));
    }

    if let Some(value) = &options.default_value {
        (options.log)(&format!(
            "Using default for {} {}",
            format_key_list(keys),
            K::display(value)
        ));
        return Some(value.clone());
    }

    (options.error)(&format!(
        "At least one of required {}s \"{}\" was not supplied.",
        K::CANDIDATE_LABEL,
        keys.join("\" or \"")
    ));
    None
}
