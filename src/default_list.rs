//! The built-in default filter list, embedded verbatim at build time so
//! behavior is reproducible across platforms.

/// Compiled-in EasyList/AdGuard-Base-style rule set, seeded into every
/// engine on first `initialize()` unless `EngineConfig::load_builtin_list_on_init`
/// is `false`.
pub const DEFAULT_FILTER_LIST: &str = include_str!("default_filter_list.txt");
