//! The compiled rule set and the query surface evaluated against it.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::default_list::DEFAULT_FILTER_LIST;
use crate::error::{FilterError, Result};
use crate::parser;
use crate::rule::{ResourceType, Rule, RuleKind};
use crate::url;

/// Construction-time configuration for a [`FilterEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether `initialize()` seeds the engine with the built-in
    /// default list on first call.
    pub load_builtin_list_on_init: bool,
    /// Soft cap on rule count; exceeding it logs a warning but never
    /// fails the load.
    pub max_rules: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            load_builtin_list_on_init: true,
            max_rules: None,
        }
    }
}

struct EngineState {
    rules: Vec<Rule>,
    whitelisted_domains: HashSet<String>,
    initialized: bool,
}

/// Holds the compiled rule set and whitelist behind a single exclusive
/// lock. Readers (`should_block`, `rule_count`) and writers
/// (`load_filter_rules`, `clear_filters`, `update_filters`) never run
/// concurrently; see SPEC_FULL.md §5 for why a coarse mutex was kept
/// over a readers-writer split.
pub struct FilterEngine {
    config: EngineConfig,
    state: Mutex<EngineState>,
}

impl FilterEngine {
    pub fn new(config: EngineConfig) -> Self {
        FilterEngine {
            config,
            state: Mutex::new(EngineState {
                rules: Vec::new(),
                whitelisted_domains: HashSet::new(),
                initialized: false,
            }),
        }
    }

    /// Idempotent. First call loads the built-in default list (unless
    /// configured otherwise) and marks the engine initialized.
    pub fn initialize(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.initialized {
            log::debug!("initialize() called on an already-initialized engine");
            return Ok(());
        }

        state.initialized = true;
        if self.config.load_builtin_list_on_init {
            let added = load_lines_into(&mut state.rules, DEFAULT_FILTER_LIST);
            log::info!("engine initialized with {} built-in rules", added);
        } else {
            log::info!("engine initialized with no built-in rules");
        }
        Ok(())
    }

    /// Parse `text` line by line and append every valid rule. Fails
    /// only when zero rules were added from non-empty input.
    pub fn load_filter_rules(&self, text: &str) -> Result<usize> {
        if text.is_empty() {
            return Err(FilterError::EmptyInput);
        }

        let mut state = self.state.lock();
        let added = load_lines_into(&mut state.rules, text);

        if added == 0 {
            return Err(FilterError::NoValidRules);
        }

        log::info!("loaded {} rules", added);
        if let Some(max) = self.config.max_rules {
            if state.rules.len() > max {
                log::warn!(
                    "rule count {} exceeds configured max_rules {}",
                    state.rules.len(),
                    max
                );
            }
        }
        Ok(added)
    }

    /// Evaluate a request. Fail-open: returns `false` if the engine is
    /// not initialized or `url` is empty.
    pub fn should_block(&self, request_url: &str, document_url: &str, type_str: &str) -> bool {
        if request_url.is_empty() {
            return false;
        }

        let state = self.state.lock();
        if let Err(e) = require_initialized(&state) {
            log::debug!("should_block: {}", e);
            return false;
        }

        let normalized = url::normalize(request_url);
        let host = url::extract_domain(&normalized);

        if state.whitelisted_domains.contains(&host) {
            return false;
        }

        let resource_type = ResourceType::parse(type_str);

        let mut any_block = false;
        for rule in state.rules.iter() {
            if rule.matches(&normalized, document_url, resource_type) {
                match rule.kind {
                    RuleKind::Allow => return false,
                    RuleKind::Block => any_block = true,
                }
            }
        }

        any_block
    }

    /// Clear the rule set and reload the built-in defaults.
    pub fn update_filters(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.rules.clear();
        state.whitelisted_domains.clear();
        let added = load_lines_into(&mut state.rules, DEFAULT_FILTER_LIST);
        log::info!("filters updated, {} built-in rules reloaded", added);
        Ok(())
    }

    /// Empty the rule set and whitelist. Leaves `initialized` untouched.
    pub fn clear_filters(&self) {
        let mut state = self.state.lock();
        state.rules.clear();
        state.whitelisted_domains.clear();
        log::debug!("filters cleared");
    }

    pub fn rule_count(&self) -> usize {
        self.state.lock().rules.len()
    }

    pub fn add_whitelisted_domain(&self, host: &str) {
        self.state.lock().whitelisted_domains.insert(host.to_ascii_lowercase());
    }

    pub fn remove_whitelisted_domain(&self, host: &str) {
        self.state.lock().whitelisted_domains.remove(&host.to_ascii_lowercase());
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }
}

fn require_initialized(state: &EngineState) -> Result<()> {
    if state.initialized {
        Ok(())
    } else {
        Err(FilterError::NotInitialized)
    }
}

fn load_lines_into(rules: &mut Vec<Rule>, text: &str) -> usize {
    let mut added = 0;
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(rule) = parser::parse_line(line) {
            if rule.valid {
                added += 1;
                rules.push(rule);
            }
        }
    }
    added
}
