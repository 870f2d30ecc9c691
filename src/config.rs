/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * License:
 * This file is part of the Okerew scripting language project.
 *
 * Okerew is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

/// Environment variable overriding [`InterpreterConfig::max_call_depth`].
pub const MAX_CALL_DEPTH_VAR: &str = "OKEREW_MAX_CALL_DEPTH";

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Largest accepted call depth; larger overrides are clamped to it.
pub const CALL_DEPTH_CEILING: usize = 10_000;

/// Runtime limits for one interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// How many function invocations may be active at once.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl InterpreterConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unparsable values keep the
    /// default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_CALL_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > CALL_DEPTH_CEILING => {
                    tracing::warn!(
                        value = depth,
                        ceiling = CALL_DEPTH_CEILING,
                        "{} is above the ceiling; clamping",
                        MAX_CALL_DEPTH_VAR
                    );
                    config.max_call_depth = CALL_DEPTH_CEILING;
                }
                Ok(depth) if depth > 0 => config.max_call_depth = depth,
                _ => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_MAX_CALL_DEPTH,
                    "ignoring invalid {}",
                    MAX_CALL_DEPTH_VAR
                ),
            }
        }

        config
    }
}
