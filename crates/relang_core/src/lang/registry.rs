//! Shareable metadata for `relang_core::lang` registries.
//!
//! Every registry in `relang_core::lang` is a `const` table of small, `Copy` metadata records. This submodule holds
//! the record shape they share.

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Notes
/// - Intended for docs/tooling (e.g. to warn on legacy spellings), not for feature-gating by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}

/// Shared metadata shape for "registry-first" vocabulary items.
///
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
///
/// Registries that need extra per-item data (e.g. primitive sizes) wrap this struct in an extension record.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub stability: Stability,
}

impl<Id> LangItemInfo<Id> {
    /// Whether `spelling` is the canonical spelling or one of the aliases.
    pub fn matches(&self, spelling: &str) -> bool {
        self.canonical == spelling || self.aliases.contains(&spelling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_canonical_and_alias() {
        let info = LangItemInfo {
            id: 0u8,
            canonical: "__cdecl",
            aliases: &["_cdecl"],
            description: "test",
            stability: Stability::Stable,
        };
        assert!(info.matches("__cdecl"));
        assert!(info.matches("_cdecl"));
        assert!(!info.matches("cdecl"));
    }
}
