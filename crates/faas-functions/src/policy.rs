//! Access-string policies for cache users.
//!
//! Each cache user carries a Redis-style access string such as
//! `on ~* -@all +SET` that dictates the operations it may perform. The
//! producer can only SET, the consumer can only GET; everything else is
//! denied before any command reaches the store.

use std::collections::HashSet;

use crate::error::{CacheError, Result};

/// Parsed access string: enabled flag, key patterns, permitted and revoked
/// commands. Tokens apply in order, last one wins, as in Redis ACLs.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    enabled: bool,
    key_patterns: Vec<String>,
    allow_all_commands: bool,
    allowed_commands: HashSet<String>,
    denied_commands: HashSet<String>,
}

impl AccessPolicy {
    /// Parse a Redis-style access string.
    ///
    /// Recognized tokens: `on` / `off`, `~pattern` key patterns,
    /// `+@all` / `-@all` command category grants, and `+CMD` / `-CMD`
    /// individual command grants.
    pub fn parse(access_string: &str) -> Result<Self> {
        let mut policy = Self {
            enabled: false,
            key_patterns: Vec::new(),
            allow_all_commands: false,
            allowed_commands: HashSet::new(),
            denied_commands: HashSet::new(),
        };

        for token in access_string.split_whitespace() {
            match token {
                "on" => policy.enabled = true,
                "off" => policy.enabled = false,
                "+@all" => {
                    policy.allow_all_commands = true;
                    policy.allowed_commands.clear();
                    policy.denied_commands.clear();
                }
                "-@all" => {
                    policy.allow_all_commands = false;
                    policy.allowed_commands.clear();
                    policy.denied_commands.clear();
                }
                _ if token.starts_with('~') => {
                    policy.key_patterns.push(token[1..].to_string());
                }
                _ if token.starts_with('+') && token.len() > 1 => {
                    let command = token[1..].to_uppercase();
                    policy.denied_commands.remove(&command);
                    policy.allowed_commands.insert(command);
                }
                _ if token.starts_with('-') && token.len() > 1 => {
                    let command = token[1..].to_uppercase();
                    policy.allowed_commands.remove(&command);
                    policy.denied_commands.insert(command);
                }
                other => {
                    return Err(CacheError::AccessString(format!(
                        "unrecognized token: {other}"
                    )));
                }
            }
        }

        if access_string.trim().is_empty() {
            return Err(CacheError::AccessString("empty access string".to_string()));
        }

        Ok(policy)
    }

    /// Whether this policy permits `command` against `key`.
    #[must_use]
    pub fn permits(&self, command: &str, key: &str) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.key_matches(key) {
            return false;
        }
        let command = command.to_uppercase();
        // An explicit revocation beats a blanket grant
        if self.denied_commands.contains(&command) {
            return false;
        }
        self.allow_all_commands || self.allowed_commands.contains(&command)
    }

    fn key_matches(&self, key: &str) -> bool {
        self.key_patterns.iter().any(|pattern| {
            if pattern == "*" {
                true
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                key.starts_with(prefix)
            } else {
                key == pattern
            }
        })
    }
}
