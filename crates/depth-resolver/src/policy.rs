//! Expansion policy for platform-internal modules.

/// What to do with a successfully located module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Resolve the module's imports as children.
    Expand,
    /// Keep the module as a leaf.
    Leaf,
}

/// Decision table over (platform-internal, resolve-internal flag, is-root).
///
/// The root is the subject of the query, so it is expanded whatever its
/// classification. Other internal modules are expanded only on request.
pub fn expansion(internal: bool, resolve_internal: bool, is_root: bool) -> Expansion {
    match (internal, resolve_internal, is_root) {
        (false, _, _) => Expansion::Expand,
        (true, true, _) => Expansion::Expand,
        (true, false, true) => Expansion::Expand,
        (true, false, false) => Expansion::Leaf,
    }
}
