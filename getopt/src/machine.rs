//! The parsing state machine.
//!
//! Each parse walks `Arg0 -> ChooseParsing -> {ParseLongArg,
//! ParseShortArg, ParseConcat, ParseRaw} -> ChooseParsing -> ... ->
//! End`. The dispatch states pop at least one token from the pending
//! queue, so the loop always terminates. Handlers never print; they
//! record an error in the session and let the caller render it on
//! entry to `End`.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::option::{Callback, OptionKind, Registry};

/// Token spellings that request the help screen.
pub(crate) const HELP_TOKENS: [&str; 5] = ["-h", "--help", "/h", "/help", "/?"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Arg0,
    ChooseParsing,
    ParseLongArg,
    ParseShortArg,
    ParseConcat,
    ParseRaw,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    ParseNext,
    Exit,
    Error,
    Help,
    DoLongArg,
    DoShortArg,
    DoConcat,
    DoRaw,
}

/// The transition table. Pairs without an edge fall through to `End`;
/// handlers only emit transitions listed for their state, so the
/// fallback is not reachable during a parse.
pub(crate) fn next_state(state: State, transition: Transition) -> State {
    use State::*;
    use Transition::*;
    match (state, transition) {
        (Arg0, ParseNext) => ChooseParsing,
        (ChooseParsing, DoLongArg) => ParseLongArg,
        (ChooseParsing, DoShortArg) => ParseShortArg,
        (ChooseParsing, DoConcat) => ParseConcat,
        (ChooseParsing, DoRaw) => ParseRaw,
        (ParseLongArg | ParseShortArg | ParseConcat | ParseRaw, ParseNext) => ChooseParsing,
        _ => End,
    }
}

/// What the classifier makes of the front token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenClass {
    Help,
    ShortOption,
    LongOption,
    ConcatShortOptions,
    Positional,
}

/// Purely lexical classification; never consults the registry.
pub(crate) fn classify(token: &str) -> TokenClass {
    if HELP_TOKENS.contains(&token) {
        return TokenClass::Help;
    }
    // `-` plus exactly one character, e.g. `-d`. Checked before the
    // long-option prefix, so a bare `--` resolves as an (unknown)
    // short option rather than an empty long name.
    if token.starts_with('-') && token.chars().count() == 2 {
        return TokenClass::ShortOption;
    }
    if token.starts_with("--") {
        return TokenClass::LongOption;
    }
    if token.starts_with('-') && token.chars().count() > 2 {
        return TokenClass::ConcatShortOptions;
    }
    TokenClass::Positional
}

/// Transient state of one `parse` call.
pub(crate) struct Session {
    /// The full original argument vector; `args[0]` feeds the usage
    /// banner.
    pub args: Vec<String>,
    /// Tokens still to be consumed.
    pub queue: VecDeque<String>,
    pub error: Option<Error>,
    /// Index of the next unsatisfied positional option.
    pub raw_cursor: usize,
}

impl Session {
    pub fn new(args: Vec<String>) -> Self {
        let queue = args.iter().cloned().collect();
        Session {
            args,
            queue,
            error: None,
            raw_cursor: 0,
        }
    }

    pub fn program_name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    fn fail(&mut self, err: Error) -> Transition {
        self.error = Some(err);
        Transition::Error
    }
}

/// Drive the machine to completion and report the transition that
/// entered `End` (`Exit`, `Help` or `Error`).
pub(crate) fn run(registry: &mut Registry, session: &mut Session) -> Transition {
    let mut state = State::Arg0;
    let mut last = Transition::Exit;
    while state != State::End {
        let transition = match state {
            State::Arg0 => on_arg0(registry, session),
            State::ChooseParsing => on_choose(session),
            State::ParseLongArg => on_long_arg(registry, session),
            State::ParseShortArg => on_short_arg(registry, session),
            State::ParseConcat => on_concat(registry, session),
            State::ParseRaw => on_raw(registry, session),
            State::End => break,
        };
        last = transition;
        state = next_state(state, transition);
    }
    last
}

/// Pop argv[0] (the invocation path) and feed it to the arg0 callback
/// if one is registered.
fn on_arg0(registry: &mut Registry, session: &mut Session) -> Transition {
    let Some(arg0) = session.queue.pop_front() else {
        return session.fail(Error::EmptyArgv);
    };
    if let Some(cb) = registry.arg0_mut() {
        if let Err(err) = cb(Some(&arg0)) {
            return session.fail(err);
        }
    }
    if session.queue.is_empty() {
        Transition::Exit
    } else {
        Transition::ParseNext
    }
}

fn on_choose(session: &mut Session) -> Transition {
    let Some(front) = session.queue.front() else {
        return Transition::Exit;
    };
    match classify(front) {
        TokenClass::Help => Transition::Help,
        TokenClass::ShortOption => Transition::DoShortArg,
        TokenClass::LongOption => Transition::DoLongArg,
        TokenClass::ConcatShortOptions => Transition::DoConcat,
        TokenClass::Positional => Transition::DoRaw,
    }
}

fn on_long_arg(registry: &mut Registry, session: &mut Session) -> Transition {
    let Some(token) = session.queue.pop_front() else {
        return Transition::Exit;
    };
    let long = token.strip_prefix("--").unwrap_or(&token).to_string();
    dispatch_named(registry, session, &long, &token)
}

fn on_short_arg(registry: &mut Registry, session: &mut Session) -> Transition {
    let Some(token) = session.queue.pop_front() else {
        return Transition::Exit;
    };
    let Some(c) = token.chars().nth(1) else {
        return session.fail(Error::Unknown(token));
    };
    let Some(long) = registry.long_for_short(c).map(str::to_string) else {
        return session.fail(Error::Unknown(token));
    };
    dispatch_named(registry, session, &long, &token)
}

/// Shared dispatch for a name-addressed option, after long-name
/// resolution. `spelled` is the token as the user wrote it, kept for
/// error messages.
fn dispatch_named(
    registry: &mut Registry,
    session: &mut Session,
    long: &str,
    spelled: &str,
) -> Transition {
    let Some(kind) = registry.kind_of(long) else {
        return session.fail(Error::Unknown(spelled.to_string()));
    };

    // Consume the following token as this option's value, unless it
    // looks like another option.
    let value = if kind.takes_value() {
        take_value(session)
    } else {
        None
    };

    let Some(opt) = registry.lookup_long_mut(long) else {
        return session.fail(Error::Unknown(spelled.to_string()));
    };
    let default_value = opt.default_value.clone();

    let outcome: Result<()> = match &mut opt.callback {
        Callback::Flag(cb) => cb(),
        Callback::Arg(cb) => match kind {
            OptionKind::Required => match &value {
                Some(v) => cb(Some(v)),
                None => return session.fail(Error::MissingValue(long.to_string())),
            },
            OptionKind::Optional => cb(value.as_deref()),
            OptionKind::Default => cb(value.as_deref().or(default_value.as_deref())),
            // Registration pairs one-arg callbacks only with the three
            // kinds above.
            _ => Ok(()),
        },
        Callback::Multi(cb) => match &value {
            Some(v) => cb(v.split_whitespace().map(str::to_string).collect()),
            None => return session.fail(Error::MissingValue(long.to_string())),
        },
    };

    match outcome {
        Ok(()) => Transition::ParseNext,
        Err(err) => session.fail(err),
    }
}

/// Invoke each grouped short flag left to right, e.g. `-abc`.
fn on_concat(registry: &mut Registry, session: &mut Session) -> Transition {
    let Some(token) = session.queue.pop_front() else {
        return Transition::Exit;
    };
    for c in token.chars().skip(1) {
        let Some(long) = registry.long_for_short(c).map(str::to_string) else {
            return session.fail(Error::Unknown(format!("-{c}")));
        };
        let Some(opt) = registry.lookup_long_mut(&long) else {
            return session.fail(Error::Unknown(format!("-{c}")));
        };
        // Only flags may be grouped: a value-taking option inside the
        // group would fight its neighbours over the following token.
        let outcome = match &mut opt.callback {
            Callback::Flag(cb) => cb(),
            _ => return session.fail(Error::NotGroupable(c)),
        };
        if let Err(err) = outcome {
            return session.fail(err);
        }
    }
    Transition::ParseNext
}

/// Feed one positional token to the next unsatisfied positional
/// option. Overflow tokens (more positionals than registered options)
/// are routed to the last registered option; with no positional
/// options at all, a positional token is an error.
fn on_raw(registry: &mut Registry, session: &mut Session) -> Transition {
    let Some(token) = session.queue.pop_front() else {
        return Transition::Exit;
    };
    if registry.raw_len() == 0 {
        return session.fail(Error::UnexpectedArgument(token));
    }
    let idx = session.raw_cursor.min(registry.raw_len() - 1);
    session.raw_cursor += 1;

    let outcome = match &mut registry.raw_mut(idx).callback {
        Callback::Arg(cb) => cb(Some(&token)),
        // Positional options are only ever registered with one-arg
        // callbacks.
        _ => Ok(()),
    };
    match outcome {
        Ok(()) => Transition::ParseNext,
        Err(err) => session.fail(err),
    }
}

/// Pop the front token as an option value, unless it is option-looking
/// (leading dash) or the queue is empty.
fn take_value(session: &mut Session) -> Option<String> {
    match session.queue.front() {
        Some(front) if !front.starts_with('-') => session.queue.pop_front(),
        _ => None,
    }
}
