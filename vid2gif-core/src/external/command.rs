//! Typed argument lists for external tool invocations.
//!
//! Arguments are recorded as flags, flag/value pairs and bare values and only
//! turned into `OsString`s when a [`Command`] is built.

use super::Tool;
use std::ffi::{OsStr, OsString};
use std::process::Command;

/// One logical argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A standalone switch such as `-O3`.
    Flag(&'static str),
    /// A flag followed by its value as a separate argument (`-i input.mp4`).
    Pair(&'static str, OsString),
    /// A flag joined to its value with `=` (`--delay=10`).
    Assign(&'static str, String),
    /// A positional value.
    Value(OsString),
}

impl Arg {
    fn push_to(&self, out: &mut Vec<OsString>) {
        match self {
            Arg::Flag(flag) => out.push(OsString::from(flag)),
            Arg::Pair(flag, value) => {
                out.push(OsString::from(flag));
                out.push(value.clone());
            }
            Arg::Assign(flag, value) => out.push(OsString::from(format!("{flag}={value}"))),
            Arg::Value(value) => out.push(value.clone()),
        }
    }
}

/// Ordered arguments for a single tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgList {
    tool: Tool,
    args: Vec<Arg>,
}

impl ArgList {
    #[must_use]
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn flag(&mut self, flag: &'static str) -> &mut Self {
        self.args.push(Arg::Flag(flag));
        self
    }

    pub fn pair(&mut self, flag: &'static str, value: impl Into<OsString>) -> &mut Self {
        self.args.push(Arg::Pair(flag, value.into()));
        self
    }

    pub fn assign(&mut self, flag: &'static str, value: impl ToString) -> &mut Self {
        self.args.push(Arg::Assign(flag, value.to_string()));
        self
    }

    pub fn value(&mut self, value: impl Into<OsString>) -> &mut Self {
        self.args.push(Arg::Value(value.into()));
        self
    }

    pub fn values<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<OsString>,
    {
        self.args
            .extend(values.into_iter().map(|v| Arg::Value(v.into())));
        self
    }

    /// Index of the first argument with the given flag.
    #[must_use]
    pub fn position_of(&self, flag: &str) -> Option<usize> {
        self.args.iter().position(|arg| match arg {
            Arg::Flag(f) | Arg::Pair(f, _) | Arg::Assign(f, _) => *f == flag,
            Arg::Value(_) => false,
        })
    }

    /// Value attached to the first occurrence of `flag`, if any.
    #[must_use]
    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        self.args.iter().find_map(|arg| match arg {
            Arg::Pair(f, value) if *f == flag => Some(value.as_os_str()),
            Arg::Assign(f, value) if *f == flag => Some(OsStr::new(value.as_str())),
            _ => None,
        })
    }

    /// Serializes the list into process arguments.
    #[must_use]
    pub fn to_os_args(&self) -> Vec<OsString> {
        let mut out = Vec::with_capacity(self.args.len() * 2);
        for arg in &self.args {
            arg.push_to(&mut out);
        }
        out
    }

    /// Builds a [`Command`] running `program` with these arguments.
    #[must_use]
    pub fn to_command(&self, program: &OsStr) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(self.to_os_args());
        cmd
    }

    /// Shell-like rendering for logs and dry runs.
    #[must_use]
    pub fn display_with(&self, program: &OsStr) -> String {
        std::iter::once(program.to_os_string())
            .chain(self.to_os_args())
            .map(|arg| quote(&arg.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+%,@".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
