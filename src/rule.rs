//! The compiled, immutable representation of one filter list line.

use std::collections::HashSet;

use regex::Regex;

use crate::url;

/// Whether a rule, once matched, blocks or allows the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Block,
    Allow,
}

/// Sub-resource kind a request is made for. Unrecognized type strings
/// map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Document,
    Script,
    Image,
    Stylesheet,
    Object,
    XmlHttpRequest,
    Subdocument,
    Ping,
    Websocket,
    Other,
}

impl ResourceType {
    pub fn parse(type_str: &str) -> ResourceType {
        match type_str {
            "document" => ResourceType::Document,
            "script" => ResourceType::Script,
            "image" => ResourceType::Image,
            "stylesheet" => ResourceType::Stylesheet,
            "object" => ResourceType::Object,
            "xmlhttprequest" => ResourceType::XmlHttpRequest,
            "subdocument" => ResourceType::Subdocument,
            "ping" => ResourceType::Ping,
            "websocket" => ResourceType::Websocket,
            _ => ResourceType::Other,
        }
    }
}

/// The compiled pattern a rule matches on.
#[derive(Debug)]
pub enum PatternForm {
    DomainAnchor(String),
    Regex(Regex),
    WildcardRegex(Regex),
    Substring(String),
}

impl PatternForm {
    fn matches_url(&self, url_str: &str) -> bool {
        match self {
            PatternForm::DomainAnchor(host) => url::domain_matches(&url::extract_domain(url_str), host),
            PatternForm::Regex(re) | PatternForm::WildcardRegex(re) => re.is_match(url_str),
            PatternForm::Substring(literal) => url_str.contains(literal.as_str()),
        }
    }
}

/// One compiled filter list rule. Immutable after construction.
#[derive(Debug)]
pub struct Rule {
    pub pattern_text: String,
    pub kind: RuleKind,
    pub form: PatternForm,
    pub include_domains: HashSet<String>,
    pub exclude_domains: HashSet<String>,
    pub include_types: HashSet<ResourceType>,
    pub exclude_types: HashSet<ResourceType>,
    pub redirect: Option<String>,
    pub valid: bool,
}

impl Rule {
    /// Evaluate this rule against a single request. Resource-type gate,
    /// then domain gate, then pattern gate; any failing gate returns
    /// false immediately.
    pub fn matches(&self, request_url: &str, document_url: &str, resource_type: ResourceType) -> bool {
        if !self.valid || request_url.is_empty() {
            return false;
        }

        if self.exclude_types.contains(&resource_type) {
            return false;
        }
        if !self.include_types.is_empty() && !self.include_types.contains(&resource_type) {
            return false;
        }

        if !self.include_domains.is_empty() || !self.exclude_domains.is_empty() {
            if document_url.is_empty() {
                if !self.include_domains.is_empty() {
                    return false;
                }
            } else {
                let doc_host = url::extract_domain(document_url);
                if self
                    .exclude_domains
                    .iter()
                    .any(|p| url::domain_matches(&doc_host, p))
                {
                    return false;
                }
                if !self.include_domains.is_empty()
                    && !self.include_domains.iter().any(|p| url::domain_matches(&doc_host, p))
                {
                    return false;
                }
            }
        }

        self.form.matches_url(request_url)
    }
}
