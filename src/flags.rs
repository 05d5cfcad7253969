//! FlagSet adapter
//!
//! Typed flag declarations in the style of the classic `flag` package
//! (`-name value`, `-name=value`, boolean `-name`), parsed by clap.

mod normalization;

use crate::constants::{HELP_FLAG_ALIAS, HELP_FLAG_ID};
use clap::builder::BoolishValueParser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command as ClapCommand, value_parser};
use std::collections::BTreeSet;
use thiserror::Error;

/// Value type of a declared flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    String,
    Int,
    Uint,
    Float,
}

impl FlagKind {
    /// Whether a `-name value` form consumes the following token.
    pub fn takes_value(self) -> bool {
        !matches!(self, FlagKind::Bool)
    }

    fn type_name(self) -> &'static str {
        match self {
            FlagKind::Bool => "",
            FlagKind::String => "string",
            FlagKind::Int => "int",
            FlagKind::Uint => "uint",
            FlagKind::Float => "float",
        }
    }
}

/// A single flag declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    name: String,
    kind: FlagKind,
    default: String,
    usage: String,
}

impl FlagSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// True when the default is the zero value for its type.
    pub fn has_zero_default(&self) -> bool {
        match self.kind {
            FlagKind::String => self.default.is_empty(),
            FlagKind::Bool => self.default == "false",
            FlagKind::Int | FlagKind::Uint | FlagKind::Float => self.default == "0",
        }
    }

    /// Splits the usage text into a display type name and the help text.
    ///
    /// A back-quoted word in the usage names the value (`"config `file`"`
    /// renders as `-config file`); otherwise the kind's type name is used.
    pub fn unquote_usage(&self) -> (String, String) {
        let quoted = self.usage.find('`').and_then(|start| {
            self.usage[start + 1..]
                .find('`')
                .map(|len| (start, start + 1 + len))
        });
        if let Some((start, end)) = quoted {
            let name = self.usage[start + 1..end].to_string();
            let usage = format!(
                "{}{}{}",
                &self.usage[..start],
                name,
                &self.usage[end + 1..]
            );
            return (name, usage);
        }
        (self.kind.type_name().to_string(), self.usage.clone())
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.usage.clone())
            .default_value(self.default.clone())
            .action(ArgAction::Set);

        match self.kind {
            FlagKind::Bool => arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new()),
            FlagKind::String => arg
                .num_args(1)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(String)),
            FlagKind::Int => arg
                .num_args(1)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(i64)),
            FlagKind::Uint => arg
                .num_args(1)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(u64)),
            FlagKind::Float => arg
                .num_args(1)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(f64)),
        }
    }
}

/// Error reported when a token sequence does not fit the declared flags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FlagError {
    kind: ErrorKind,
    message: String,
}

impl FlagError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_clap(err: &clap::Error) -> Self {
        let kind = err.kind();
        let message = match (kind, err.get(ContextKind::InvalidArg)) {
            (ErrorKind::UnknownArgument, Some(ContextValue::String(arg))) => {
                let name = arg.split_once('=').map_or(arg.as_str(), |(name, _)| name);
                format!(
                    "flag provided but not defined: -{}",
                    name.trim_start_matches('-')
                )
            }
            _ => first_line(&err.to_string()),
        };
        Self { kind, message }
    }

    fn bad_syntax(token: &str) -> Self {
        Self {
            kind: ErrorKind::UnknownArgument,
            message: format!("bad flag syntax: {}", token),
        }
    }
}

fn first_line(rendered: &str) -> String {
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error: ").unwrap_or(line).to_string())
        .unwrap_or_else(|| "invalid flags".to_string())
}

/// Flag declarations for one command (or for the global scope).
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    specs: Vec<FlagSpec>,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bool(
        &mut self,
        name: impl Into<String>,
        default: bool,
        usage: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagKind::Bool, default.to_string(), usage.into())
    }

    pub fn string(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
        usage: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagKind::String, default.into(), usage.into())
    }

    pub fn int(
        &mut self,
        name: impl Into<String>,
        default: i64,
        usage: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagKind::Int, default.to_string(), usage.into())
    }

    pub fn uint(
        &mut self,
        name: impl Into<String>,
        default: u64,
        usage: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagKind::Uint, default.to_string(), usage.into())
    }

    pub fn float(
        &mut self,
        name: impl Into<String>,
        default: f64,
        usage: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagKind::Float, default.to_string(), usage.into())
    }

    /// Redeclaring a name replaces the earlier declaration.
    fn declare(
        &mut self,
        name: String,
        kind: FlagKind,
        default: String,
        usage: String,
    ) -> &mut Self {
        if name.is_empty() || name.starts_with('-') || name.contains('=') {
            tracing::warn!(flag = %name, set = %self.name, "ignoring flag with invalid name");
            return self;
        }

        let spec = FlagSpec {
            name,
            kind,
            default,
            usage,
        };
        match self.specs.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
        self
    }

    pub fn spec(&self, name: &str) -> Option<&FlagSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Declarations in declaration order.
    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The reserved `-h`/`-help` flag is only added when neither name is
    /// declared by the set itself.
    pub fn help_enabled(&self) -> bool {
        self.spec(HELP_FLAG_ID).is_none() && self.spec(HELP_FLAG_ALIAS).is_none()
    }

    /// Parses `args` (without a command name). Parsing stops at the first
    /// positional token or at `--`; everything after is returned as leftover.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParsedFlags, FlagError> {
        let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let split = normalization::split_tokens(&tokens, self)?;

        let matches = self
            .command()
            .try_get_matches_from(split.flags.iter())
            .map_err(|err| FlagError::from_clap(&err))?;

        let set = self
            .specs
            .iter()
            .filter(|s| matches.value_source(&s.name) == Some(ValueSource::CommandLine))
            .map(|s| s.name.clone())
            .collect();

        let help = self.help_enabled()
            && matches
                .try_get_one::<bool>(HELP_FLAG_ID)
                .ok()
                .flatten()
                .copied()
                .unwrap_or(false);

        Ok(ParsedFlags {
            matches,
            set,
            help,
            args: split.leftovers,
        })
    }

    fn command(&self) -> ClapCommand {
        let mut cmd = ClapCommand::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .color(ColorChoice::Never)
            .args(self.specs.iter().map(FlagSpec::to_arg));

        if self.help_enabled() {
            cmd = cmd.arg(
                Arg::new(HELP_FLAG_ID)
                    .long(HELP_FLAG_ID)
                    .alias(HELP_FLAG_ALIAS)
                    .action(ArgAction::Set)
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_value("false")
                    .default_missing_value("true")
                    .value_parser(BoolishValueParser::new()),
            );
        }
        cmd
    }
}

/// Outcome of a successful parse: flag values, which flags were explicitly
/// supplied, and leftover positional arguments.
#[derive(Debug, Clone)]
pub struct ParsedFlags {
    matches: ArgMatches,
    set: BTreeSet<String>,
    help: bool,
    args: Vec<String>,
}

impl ParsedFlags {
    /// True only if the flag appeared on the command line, whatever its value.
    pub fn is_set(&self, name: &str) -> bool {
        self.set.contains(name)
    }

    pub fn set_flags(&self) -> &BTreeSet<String> {
        &self.set
    }

    pub fn help_requested(&self) -> bool {
        self.help
    }

    /// Leftover positional arguments in input order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.value::<bool>(name).copied()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.value::<String>(name).map(String::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.value::<i64>(name).copied()
    }

    pub fn get_uint(&self, name: &str) -> Option<u64> {
        self.value::<u64>(name).copied()
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.value::<f64>(name).copied()
    }

    fn value<T>(&self, name: &str) -> Option<&T>
    where
        T: std::any::Any + Clone + Send + Sync + 'static,
    {
        self.matches.try_get_one::<T>(name).ok().flatten()
    }
}

#[cfg(test)]
mod tests;
