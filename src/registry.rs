//! Command registry
//!
//! Binds command names to their entries. Dispatch lives in
//! [`crate::dispatcher`].

use crate::command::Command;
use crate::flags::FlagSet;
use crate::settings::Settings;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// A registered command: name, description, required flags, the command
/// itself and the flags it declared at registration.
pub struct Entry {
    name: String,
    description: String,
    required_flags: Vec<String>,
    command: Box<dyn Command>,
    flags: FlagSet,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Required flag names in registration order.
    pub fn required_flags(&self) -> &[String] {
        &self.required_flags
    }

    pub fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("required_flags", &self.required_flags)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Name-to-entry mapping plus the global flag set parsed before the
/// command name.
#[derive(Debug)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
    globals: FlagSet,
    settings: Settings,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            globals: FlagSet::new("global"),
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register `command` under `name`, declaring its flags immediately.
    ///
    /// Registering an existing name replaces the previous entry; the last
    /// registration wins.
    pub fn register<C, I, S>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        command: C,
        required_flags: I,
    ) -> &Entry
    where
        C: Command + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut flags = FlagSet::new(name.clone());
        command.flags(&mut flags);

        let entry = Entry {
            name: name.clone(),
            description: description.into(),
            required_flags: required_flags.into_iter().map(Into::into).collect(),
            command: Box::new(command),
            flags,
        };

        match self.entries.entry(name) {
            btree_map::Entry::Occupied(mut slot) => {
                tracing::warn!(command = %slot.key(), "replacing previously registered command");
                slot.insert(entry);
                slot.into_mut()
            }
            btree_map::Entry::Vacant(slot) => {
                tracing::debug!(command = %slot.key(), "registered command");
                slot.insert(entry)
            }
        }
    }

    /// Register a command with no required flags.
    pub fn add<C>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        command: C,
    ) -> &Entry
    where
        C: Command + 'static,
    {
        self.register(name, description, command, Vec::<String>::new())
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries sorted by name.
    pub fn list(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flags parsed before the command name.
    pub fn global_flags(&self) -> &FlagSet {
        &self.globals
    }

    pub fn global_flags_mut(&mut self) -> &mut FlagSet {
        &mut self.globals
    }
}
