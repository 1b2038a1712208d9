//! Option data model and registry.
//!
//! The registry owns every registered option and its callback. It is
//! mutated only during setup; parsing reads it (and borrows callbacks
//! mutably to invoke them) but never adds or removes entries.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Zero-argument callback, used by flag options.
pub type FlagCallback = Box<dyn FnMut() -> Result<()>>;

/// One-argument callback, used by required/optional/default options,
/// positional options, and the arg0 hook. `None` is only ever passed
/// to an optional option invoked without a value.
pub type ArgCallback = Box<dyn FnMut(Option<&str>) -> Result<()>>;

/// Multi-argument callback; receives the whitespace-split sub-values.
pub type MultiCallback = Box<dyn FnMut(Vec<String>) -> Result<()>>;

/// Callback invoked with the help token that terminated parsing.
pub type HelpCallback = Box<dyn FnMut(&str)>;

/// The shape of a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// No value. `--flag`
    Flag,
    /// Exactly one following value. `--opt value`
    Required,
    /// Zero or one following value. `--opt [value]`
    Optional,
    /// Zero or one following value; the registered default fills in
    /// when none is given. `--opt [value]`
    Default,
    /// One following token, split on whitespace. `--opt 'a b c'`
    Multi,
    /// Positional argument, matched by registration order.
    Raw,
}

impl OptionKind {
    /// Whether dispatch should try to consume a following value token.
    pub(crate) fn takes_value(self) -> bool {
        matches!(
            self,
            OptionKind::Required | OptionKind::Optional | OptionKind::Default | OptionKind::Multi
        )
    }
}

/// Callback storage, tagged by arity. The tag is fixed at registration
/// to match the option kind, so dispatch never re-checks arity.
pub(crate) enum Callback {
    Flag(FlagCallback),
    Arg(ArgCallback),
    Multi(MultiCallback),
}

/// One registered option.
pub(crate) struct UserOption {
    pub long: String,
    pub short: Option<char>,
    pub kind: OptionKind,
    pub callback: Callback,
    /// Present only for `OptionKind::Default`.
    pub default_value: Option<String>,
    /// Free-form description; may contain explicit line breaks.
    pub help: String,
}

/// All options of one parser instance.
///
/// Named options live in `named` in registration order (help listing
/// depends on it); `long_index` and `short_index` are the two lookup
/// indices. Positional options live in `raw`, tried strictly in
/// registration order.
#[derive(Default)]
pub(crate) struct Registry {
    named: Vec<UserOption>,
    long_index: HashMap<String, usize>,
    short_index: HashMap<char, String>,
    raw: Vec<UserOption>,
    arg0: Option<ArgCallback>,
    help: Option<HelpCallback>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named option. Fails without touching the registry if
    /// the long or short name collides with an existing entry.
    pub fn insert(&mut self, opt: UserOption) -> Result<()> {
        if self.long_index.contains_key(&opt.long) {
            return Err(Error::DuplicateLong(opt.long));
        }
        if let Some(c) = opt.short {
            if self.short_index.contains_key(&c) {
                return Err(Error::DuplicateShort(c));
            }
            self.short_index.insert(c, opt.long.clone());
        }
        self.long_index.insert(opt.long.clone(), self.named.len());
        self.named.push(opt);
        Ok(())
    }

    /// Append a positional option. Positional names are display-only
    /// (the usage banner), so they are not checked for collisions.
    pub fn insert_raw(&mut self, opt: UserOption) {
        self.raw.push(opt);
    }

    pub fn set_arg0(&mut self, cb: ArgCallback) {
        self.arg0 = Some(cb);
    }

    pub fn set_help(&mut self, cb: HelpCallback) {
        self.help = Some(cb);
    }

    pub fn kind_of(&self, long: &str) -> Option<OptionKind> {
        self.long_index.get(long).map(|&i| self.named[i].kind)
    }

    pub fn long_for_short(&self, c: char) -> Option<&str> {
        self.short_index.get(&c).map(String::as_str)
    }

    pub fn lookup_long_mut(&mut self, long: &str) -> Option<&mut UserOption> {
        let idx = *self.long_index.get(long)?;
        self.named.get_mut(idx)
    }

    pub fn named(&self) -> &[UserOption] {
        &self.named
    }

    pub fn raw(&self) -> &[UserOption] {
        &self.raw
    }

    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    pub fn raw_mut(&mut self, idx: usize) -> &mut UserOption {
        &mut self.raw[idx]
    }

    pub fn arg0_mut(&mut self) -> Option<&mut ArgCallback> {
        self.arg0.as_mut()
    }

    pub fn help_mut(&mut self) -> Option<&mut HelpCallback> {
        self.help.as_mut()
    }
}
