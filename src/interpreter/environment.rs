/*
 * ============================================================================
 *  OKEREW - Token-Stream Scripting
 * ============================================================================
 *
 *  Interpreter state: the variable store and the context that owns it.
 *
 *  License:
 *  This file is part of the Okerew scripting language project.
 *
 *  Okerew is dual-licensed under the terms of:
 *    • The MIT License
 *    • The Apache License, Version 2.0
 *
 *  You may choose either license to govern your use of this software.
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under these licenses is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ============================================================================
 */

use std::collections::HashMap;

use crate::config::InterpreterConfig;
use crate::interpreter::calls::FunctionTable;
use crate::value::Value;

/// One flat namespace for the whole program.
///
/// Function bodies read and write the same store as their caller; there is
/// no scope chain.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: HashMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overwrites `name`.
    pub fn assign(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries sorted by name, for stable dumps.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self.values.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Everything a running script can observe or change.
///
/// Handed by reference to every statement handler and to function
/// invocation. A second script running at the same time needs its own
/// context.
#[derive(Debug, Clone, Default)]
pub struct InterpreterContext {
    pub variables: VariableStore,
    pub functions: FunctionTable,
    pub config: InterpreterConfig,

    /// Active function invocations.
    pub call_depth: usize,
}

impl InterpreterContext {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}
