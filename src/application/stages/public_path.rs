use crate::domain::value_objects::StoredName;

/// Public path of an accepted file: `/<prefix>/<name>`, or `/<name>` when no
/// prefix is configured.
pub fn resolve_public_path(prefix: Option<&str>, name: &StoredName) -> String {
    match prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("/{}/{}", prefix, name),
        None => format!("/{}", name),
    }
}
