//! Variable names: machine-safe identifiers derived from field labels.
//!
//! A variable name is *in sync* with a label when it equals the label's
//! derivation. Label edits keep an in-sync variable name tracking the label;
//! once the two diverge the variable name is left alone. No dirty flag is
//! stored: the comparison is recomputed from current values on every edit, so
//! a manual name that happens to equal the derivation resumes tracking.

/// Derive a snake_case identifier from a label.
///
/// Lowercases the label, collapses every run of characters outside
/// `[a-z0-9]` into a single underscore, and trims underscores from both ends.
/// Returns an empty string when nothing alphanumeric remains.
///
/// ```
/// use quotecraft_fields::derive_variable_name;
///
/// assert_eq!(derive_variable_name("Project Name!"), "project_name");
/// assert_eq!(derive_variable_name("  Budget  "), "budget");
/// assert_eq!(derive_variable_name("!!!###"), "");
/// ```
pub fn derive_variable_name(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut separator_pending = false;
    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if separator_pending && !out.is_empty() {
                out.push('_');
            }
            out.push(c);
            separator_pending = false;
        } else {
            separator_pending = true;
        }
    }
    out
}

/// True when `variable_name` is exactly what `label` derives to.
pub fn is_in_sync(label: &str, variable_name: &str) -> bool {
    variable_name == derive_variable_name(label)
}

/// Variable name a field should carry after its label changes from
/// `current_label` to `new_label`.
///
/// Follows the new label only if the current name is in sync with the
/// current label.
pub fn synced_variable_name(current_label: &str, current_variable_name: &str, new_label: &str) -> String {
    if is_in_sync(current_label, current_variable_name) {
        derive_variable_name(new_label)
    } else {
        current_variable_name.to_string()
    }
}

/// True when `name` has the machine-safe shape: lowercase alphanumerics
/// joined by single underscores, no leading or trailing underscore.
///
/// The empty string passes; callers that require a name check emptiness
/// separately.
pub fn is_machine_safe(name: &str) -> bool {
    derive_variable_name(name) == name
}
