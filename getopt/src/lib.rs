//! Callback-driven command-line option parsing.
//!
//! Options are registered up front with a long name, an optional short
//! name, a description and a callback; [`GetOpt::parse`] then walks the
//! argument vector and invokes the callbacks as options are
//! recognized. Long options (`--verbose`), short options (`-v`),
//! grouped short flags (`-abc`) and positional arguments are
//! supported, along with a generated help screen reachable through
//! `-h`, `--help`, `/h`, `/help` and `/?`.
//!
//! ```no_run
//! use getopt::GetOpt;
//!
//! let mut opts = GetOpt::new();
//! opts.add_flag("verbose", Some('v'), "Print more.", || {
//!     println!("verbose on");
//!     Ok(())
//! })?;
//! opts.add_required("out", Some('o'), "Output file.", |v| {
//!     println!("out = {}", v.unwrap_or(""));
//!     Ok(())
//! })?;
//! opts.parse_env()?;
//! # Ok::<(), getopt::Error>(())
//! ```
//!
//! Callbacks return [`Result`]; a callback error aborts the parse,
//! prints the error together with the help screen, and is returned to
//! the caller.

mod error;
mod help;
mod machine;
mod option;

use std::io::Write;

pub use crate::error::{Error, Result};
pub use crate::option::{ArgCallback, FlagCallback, HelpCallback, MultiCallback, OptionKind};

use crate::machine::{run, Session, Transition};
use crate::option::{Callback, Registry, UserOption};

/// A configured parser: the option registry plus output settings.
///
/// All diagnostics (help screen, parse errors) go to the configured
/// sink, standard output by default. Parsing is reentrant; each call
/// to [`parse`](GetOpt::parse) starts from a fresh session, so one
/// instance can parse several argument vectors in sequence.
pub struct GetOpt {
    registry: Registry,
    help_intro: Option<String>,
    help_outro: Option<String>,
    out: Box<dyn Write>,
    program: Option<String>,
}

impl Default for GetOpt {
    fn default() -> Self {
        Self::new()
    }
}

impl GetOpt {
    /// A parser writing diagnostics to standard output.
    pub fn new() -> Self {
        Self::with_output(std::io::stdout())
    }

    /// A parser writing diagnostics to the given sink.
    pub fn with_output(out: impl Write + 'static) -> Self {
        GetOpt {
            registry: Registry::new(),
            help_intro: None,
            help_outro: None,
            out: Box::new(out),
            program: None,
        }
    }

    // -- registration --

    /// Register a valueless option. `--verbose` / `-v`
    pub fn add_flag(
        &mut self,
        long: &str,
        short: Option<char>,
        help: &str,
        callback: impl FnMut() -> Result<()> + 'static,
    ) -> Result<()> {
        self.registry.insert(UserOption {
            long: long.to_string(),
            short,
            kind: OptionKind::Flag,
            callback: Callback::Flag(Box::new(callback)),
            default_value: None,
            help: help.to_string(),
        })
    }

    /// Register an option that requires one following value. The
    /// callback always receives `Some`; a missing value fails the
    /// parse instead.
    pub fn add_required(
        &mut self,
        long: &str,
        short: Option<char>,
        help: &str,
        callback: impl FnMut(Option<&str>) -> Result<()> + 'static,
    ) -> Result<()> {
        self.add_arg(long, short, OptionKind::Required, None, help, callback)
    }

    /// Register an option whose value may be omitted; the callback
    /// receives `None` when it is.
    pub fn add_optional(
        &mut self,
        long: &str,
        short: Option<char>,
        help: &str,
        callback: impl FnMut(Option<&str>) -> Result<()> + 'static,
    ) -> Result<()> {
        self.add_arg(long, short, OptionKind::Optional, None, help, callback)
    }

    /// Register an option whose value falls back to `default_value`
    /// when omitted.
    pub fn add_default(
        &mut self,
        long: &str,
        short: Option<char>,
        help: &str,
        default_value: &str,
        callback: impl FnMut(Option<&str>) -> Result<()> + 'static,
    ) -> Result<()> {
        self.add_arg(
            long,
            short,
            OptionKind::Default,
            Some(default_value.to_string()),
            help,
            callback,
        )
    }

    fn add_arg(
        &mut self,
        long: &str,
        short: Option<char>,
        kind: OptionKind,
        default_value: Option<String>,
        help: &str,
        callback: impl FnMut(Option<&str>) -> Result<()> + 'static,
    ) -> Result<()> {
        self.registry.insert(UserOption {
            long: long.to_string(),
            short,
            kind,
            callback: Callback::Arg(Box::new(callback)),
            default_value,
            help: help.to_string(),
        })
    }

    /// Register an option taking one following token that is split on
    /// whitespace before reaching the callback, e.g.
    /// `--files 'a.txt b.txt'`.
    pub fn add_multi(
        &mut self,
        long: &str,
        short: Option<char>,
        help: &str,
        callback: impl FnMut(Vec<String>) -> Result<()> + 'static,
    ) -> Result<()> {
        self.registry.insert(UserOption {
            long: long.to_string(),
            short,
            kind: OptionKind::Multi,
            callback: Callback::Multi(Box::new(callback)),
            default_value: None,
            help: help.to_string(),
        })
    }

    /// Register a positional argument. Positionals are filled in
    /// registration order; surplus positional tokens all go to the
    /// last registered one, so a trailing "rest" argument can collect
    /// a variable tail.
    pub fn add_raw(
        &mut self,
        name: &str,
        help: &str,
        callback: impl FnMut(Option<&str>) -> Result<()> + 'static,
    ) {
        self.registry.insert_raw(UserOption {
            long: name.to_string(),
            short: None,
            kind: OptionKind::Raw,
            callback: Callback::Arg(Box::new(callback)),
            default_value: None,
            help: help.to_string(),
        });
    }

    /// Register a hook for the first argument (the invocation path).
    /// It runs before any option dispatch.
    pub fn add_arg0_callback(
        &mut self,
        callback: impl FnMut(Option<&str>) -> Result<()> + 'static,
    ) {
        self.registry.set_arg0(Box::new(callback));
    }

    /// Register a hook invoked with the token that requested help
    /// (one of `-h`, `--help`, `/h`, `/help`, `/?`), just before the
    /// help screen is printed.
    pub fn add_help_callback(&mut self, callback: impl FnMut(&str) + 'static) {
        self.registry.set_help(Box::new(callback));
    }

    /// Free-form text printed above the usage banner.
    pub fn help_intro(&mut self, text: &str) {
        self.help_intro = Some(text.to_string());
    }

    /// Free-form text printed below the option table.
    pub fn help_outro(&mut self, text: &str) {
        self.help_outro = Some(text.to_string());
    }

    // -- parsing --

    /// Parse an argument vector. The first element is the invocation
    /// path (as in `std::env::args`), not an option.
    ///
    /// A help request prints the help screen and returns `Ok` without
    /// running any further callbacks. Any parse error is printed
    /// together with the help screen and returned.
    pub fn parse<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut session = Session::new(args);
        if !session.program_name().is_empty() {
            self.program = Some(session.program_name().to_string());
        }

        match run(&mut self.registry, &mut session) {
            Transition::Help => {
                let token = session
                    .queue
                    .front()
                    .cloned()
                    .unwrap_or_else(|| "--help".to_string());
                if let Some(cb) = self.registry.help_mut() {
                    cb(&token);
                }
                self.render_help(session.program_name());
                Ok(())
            }
            Transition::Error => {
                let err = session
                    .error
                    .take()
                    .unwrap_or_else(|| Error::Callback("parsing failed".to_string()));
                let _ = write!(self.out, "problem parsing provided options:\n{}\n\n", err);
                self.render_help(session.program_name());
                Err(err)
            }
            _ => Ok(()),
        }
    }

    /// Parse the process argument vector.
    pub fn parse_env(&mut self) -> Result<()> {
        self.parse(std::env::args())
    }

    /// Print the help screen to the configured sink.
    pub fn print_help(&mut self) {
        let program = self.program.clone().unwrap_or_default();
        self.render_help(&program);
    }

    fn render_help(&mut self, program: &str) {
        help::print_help(
            &mut self.out,
            &self.registry,
            program,
            self.help_intro.as_deref(),
            self.help_outro.as_deref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared byte sink so tests can inspect what the parser printed.
    #[derive(Clone, Default)]
    struct SharedOut(Rc<RefCell<Vec<u8>>>);

    impl SharedOut {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl std::io::Write for SharedOut {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn push(log: &Log, entry: impl Into<String>) {
        log.borrow_mut().push(entry.into());
    }

    fn argv(tail: &[&str]) -> Vec<String> {
        let mut v = vec!["tool".to_string()];
        v.extend(tail.iter().map(|s| s.to_string()));
        v
    }

    // -- flags --

    #[test]
    fn long_flag_fires_once() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c, "verbose");
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["--verbose"])).unwrap();
        assert_eq!(*calls.borrow(), ["verbose"]);
    }

    #[test]
    fn short_flag_resolves_to_long() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c, "verbose");
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["-v"])).unwrap();
        assert_eq!(*calls.borrow(), ["verbose"]);
    }

    #[test]
    fn grouped_flags_fire_in_token_order() {
        let calls = log();
        let mut opts = GetOpt::with_output(SharedOut::default());
        for (long, short) in [("alpha", 'a'), ("bravo", 'b'), ("charlie", 'c')] {
            let c = calls.clone();
            opts.add_flag(long, Some(short), "", move || {
                push(&c, long);
                Ok(())
            })
            .unwrap();
        }
        opts.parse(argv(&["-cab"])).unwrap();
        assert_eq!(*calls.borrow(), ["charlie", "alpha", "bravo"]);
    }

    #[test]
    fn grouped_value_taker_is_rejected() {
        let calls = log();
        let c1 = calls.clone();
        let c2 = calls.clone();
        let out = SharedOut::default();
        let mut opts = GetOpt::with_output(out.clone());
        opts.add_flag("alpha", Some('a'), "", move || {
            push(&c1, "alpha");
            Ok(())
        })
        .unwrap();
        opts.add_required("out", Some('o'), "", move |v| {
            push(&c2, format!("out={}", v.unwrap_or("")));
            Ok(())
        })
        .unwrap();
        let err = opts.parse(argv(&["-ao", "x"])).unwrap_err();
        assert!(matches!(err, Error::NotGroupable('o')));
        // The flag before the offender already ran.
        assert_eq!(*calls.borrow(), ["alpha"]);
        assert!(out.text().contains("problem parsing provided options:"));
    }

    // -- values --

    #[test]
    fn required_receives_its_value() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_required("out", Some('o'), "", move |v| {
            push(&c, format!("out={}", v.unwrap_or("")));
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["--out", "file.txt"])).unwrap();
        assert_eq!(*calls.borrow(), ["out=file.txt"]);
    }

    #[test]
    fn required_without_value_fails_and_prints_help() {
        let out = SharedOut::default();
        let mut opts = GetOpt::with_output(out.clone());
        opts.add_required("out", Some('o'), "", |_| Ok(())).unwrap();
        let err = opts.parse(argv(&["--out"])).unwrap_err();
        assert!(matches!(err, Error::MissingValue(ref l) if l == "out"));
        let text = out.text();
        assert!(text.contains("problem parsing provided options:"), "{text}");
        assert!(text.contains("missing value for option --out"), "{text}");
        assert!(text.contains("Usage:"), "{text}");
    }

    #[test]
    fn required_does_not_eat_a_following_option() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_required("out", None, "", |_| Ok(())).unwrap();
        opts.add_flag("verbose", Some('v'), "", || Ok(())).unwrap();
        let err = opts.parse(argv(&["--out", "--verbose"])).unwrap_err();
        assert!(matches!(err, Error::MissingValue(_)));
    }

    #[test]
    fn optional_with_and_without_value() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_optional("level", Some('l'), "", move |v| {
            push(&c, format!("level={:?}", v));
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["--level", "3"])).unwrap();
        opts.parse(argv(&["--level"])).unwrap();
        assert_eq!(*calls.borrow(), ["level=Some(\"3\")", "level=None"]);
    }

    #[test]
    fn default_fills_in_when_value_omitted() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_default("mode", Some('m'), "", "fast", move |v| {
            push(&c, format!("mode={}", v.unwrap_or("")));
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["--mode", "slow"])).unwrap();
        opts.parse(argv(&["--mode"])).unwrap();
        assert_eq!(*calls.borrow(), ["mode=slow", "mode=fast"]);
    }

    #[test]
    fn multi_splits_on_whitespace() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_multi("files", Some('f'), "", move |vs| {
            push(&c, vs.join(","));
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["--files", "a.txt  b.txt\tc.txt"])).unwrap();
        assert_eq!(*calls.borrow(), ["a.txt,b.txt,c.txt"]);
    }

    #[test]
    fn multi_without_token_is_missing_value() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_multi("files", None, "", |_| Ok(())).unwrap();
        let err = opts.parse(argv(&["--files"])).unwrap_err();
        assert!(matches!(err, Error::MissingValue(ref l) if l == "files"));
    }

    // -- positionals --

    #[test]
    fn positionals_fill_in_registration_order() {
        let calls = log();
        let c1 = calls.clone();
        let c2 = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_raw("input", "", move |v| {
            push(&c1, format!("input={}", v.unwrap_or("")));
            Ok(())
        });
        opts.add_raw("output", "", move |v| {
            push(&c2, format!("output={}", v.unwrap_or("")));
            Ok(())
        });
        opts.parse(argv(&["a.txt", "b.txt"])).unwrap();
        assert_eq!(*calls.borrow(), ["input=a.txt", "output=b.txt"]);
    }

    #[test]
    fn surplus_positionals_go_to_the_last_one() {
        let calls = log();
        let c1 = calls.clone();
        let c2 = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_raw("input", "", move |v| {
            push(&c1, format!("input={}", v.unwrap_or("")));
            Ok(())
        });
        opts.add_raw("rest", "", move |v| {
            push(&c2, format!("rest={}", v.unwrap_or("")));
            Ok(())
        });
        opts.parse(argv(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(*calls.borrow(), ["input=a", "rest=b", "rest=c", "rest=d"]);
    }

    #[test]
    fn positional_without_any_registered_is_an_error() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", None, "", || Ok(())).unwrap();
        let err = opts.parse(argv(&["stray"])).unwrap_err();
        assert!(matches!(err, Error::UnexpectedArgument(ref t) if t == "stray"));
    }

    #[test]
    fn positionals_interleave_with_options() {
        let calls = log();
        let c1 = calls.clone();
        let c2 = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c1, "verbose");
            Ok(())
        })
        .unwrap();
        opts.add_raw("input", "", move |v| {
            push(&c2, format!("input={}", v.unwrap_or("")));
            Ok(())
        });
        opts.parse(argv(&["a.txt", "-v", "b.txt"])).unwrap();
        assert_eq!(*calls.borrow(), ["input=a.txt", "verbose", "input=b.txt"]);
    }

    // -- help --

    #[test]
    fn help_suppresses_remaining_callbacks() {
        for spelling in ["-h", "--help", "/h", "/help", "/?"] {
            let calls = log();
            let c = calls.clone();
            let out = SharedOut::default();
            let mut opts = GetOpt::with_output(out.clone());
            opts.add_flag("verbose", Some('v'), "Print more.", move || {
                push(&c, "verbose");
                Ok(())
            })
            .unwrap();
            opts.parse(argv(&[spelling, "-v"])).unwrap();
            assert!(calls.borrow().is_empty(), "{spelling}");
            assert!(out.text().contains("Usage:"), "{spelling}");
            assert!(out.text().contains("--verbose"), "{spelling}");
        }
    }

    #[test]
    fn help_callback_sees_the_spelling_used() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_help_callback(move |token| push(&c, token));
        opts.parse(argv(&["/?"])).unwrap();
        assert_eq!(*calls.borrow(), ["/?"]);
    }

    #[test]
    fn help_after_options_still_runs_the_earlier_ones() {
        let calls = log();
        let c = calls.clone();
        let out = SharedOut::default();
        let mut opts = GetOpt::with_output(out.clone());
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c, "verbose");
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["-v", "--help"])).unwrap();
        assert_eq!(*calls.borrow(), ["verbose"]);
        assert!(out.text().contains("Usage:"));
    }

    #[test]
    fn intro_and_outro_reach_the_screen() {
        let out = SharedOut::default();
        let mut opts = GetOpt::with_output(out.clone());
        opts.help_intro("A sample tool.");
        opts.help_outro("See the manual.");
        opts.parse(argv(&["--help"])).unwrap();
        let text = out.text();
        assert!(text.contains("A sample tool."), "{text}");
        assert!(text.contains("See the manual."), "{text}");
    }

    // -- errors --

    #[test]
    fn unknown_long_option() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        let err = opts.parse(argv(&["--nope"])).unwrap_err();
        assert!(matches!(err, Error::Unknown(ref t) if t == "--nope"));
    }

    #[test]
    fn unknown_short_option() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        let err = opts.parse(argv(&["-x"])).unwrap_err();
        assert!(matches!(err, Error::Unknown(ref t) if t == "-x"));
    }

    #[test]
    fn error_stops_further_dispatch() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c, "verbose");
            Ok(())
        })
        .unwrap();
        let err = opts.parse(argv(&["--nope", "-v"])).unwrap_err();
        assert!(matches!(err, Error::Unknown(_)));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn callback_rejection_aborts_the_parse() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_required("port", Some('p'), "", |v| {
            let v = v.unwrap_or("");
            v.parse::<u16>()
                .map(|_| ())
                .map_err(|_| Error::Callback(format!("not a port number: '{v}'")))
        })
        .unwrap();
        opts.parse(argv(&["--port", "80"])).unwrap();
        let err = opts.parse(argv(&["--port", "eighty"])).unwrap_err();
        assert!(matches!(err, Error::Callback(ref m) if m.contains("eighty")));
    }

    #[test]
    fn empty_argv_is_an_error() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        let err = opts.parse(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyArgv));
    }

    #[test]
    fn duplicate_registration_is_reported() {
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", Some('v'), "", || Ok(())).unwrap();
        let err = opts.add_flag("verbose", None, "", || Ok(())).unwrap_err();
        assert!(matches!(err, Error::DuplicateLong(_)));
        let err = opts
            .add_required("version", Some('v'), "", |_| Ok(()))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateShort('v')));
    }

    // -- sessions --

    #[test]
    fn arg0_hook_runs_first() {
        let calls = log();
        let c1 = calls.clone();
        let c2 = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_arg0_callback(move |v| {
            push(&c1, format!("arg0={}", v.unwrap_or("")));
            Ok(())
        });
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c2, "verbose");
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&["-v"])).unwrap();
        assert_eq!(*calls.borrow(), ["arg0=tool", "verbose"]);
    }

    #[test]
    fn program_name_alone_parses_clean() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", None, "", move || {
            push(&c, "verbose");
            Ok(())
        })
        .unwrap();
        opts.parse(argv(&[])).unwrap();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn instance_is_reusable_across_parses() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_raw("input", "", move |v| {
            push(&c, v.unwrap_or("").to_string());
            Ok(())
        });
        opts.parse(argv(&["first"])).unwrap();
        opts.parse(argv(&["second"])).unwrap();
        // The positional cursor resets between parses.
        assert_eq!(*calls.borrow(), ["first", "second"]);
    }

    #[test]
    fn identical_vectors_replay_identically() {
        let calls = log();
        let c1 = calls.clone();
        let c2 = calls.clone();
        let c3 = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c1, "verbose");
            Ok(())
        })
        .unwrap();
        opts.add_required("out", None, "", move |v| {
            push(&c2, format!("out={}", v.unwrap_or("")));
            Ok(())
        })
        .unwrap();
        opts.add_raw("input", "", move |v| {
            push(&c3, format!("input={}", v.unwrap_or("")));
            Ok(())
        });

        let vector = argv(&["-v", "--out", "x", "pos"]);
        opts.parse(vector.clone()).unwrap();
        let first: Vec<String> = calls.borrow().clone();
        opts.parse(vector).unwrap();

        let mut expected = first.clone();
        expected.extend(first);
        assert_eq!(*calls.borrow(), expected);
    }

    #[test]
    fn print_help_names_the_latest_program() {
        let out = SharedOut::default();
        let mut opts = GetOpt::with_output(out.clone());
        opts.parse(vec!["first-tool".to_string()]).unwrap();
        opts.parse(vec!["second-tool".to_string()]).unwrap();
        opts.print_help();
        let text = out.text();
        assert!(text.contains("Usage: second-tool"), "{text}");
        assert!(!text.contains("first-tool"), "{text}");
    }

    #[test]
    fn parse_recovers_after_an_error() {
        let calls = log();
        let c = calls.clone();
        let mut opts = GetOpt::with_output(SharedOut::default());
        opts.add_flag("verbose", Some('v'), "", move || {
            push(&c, "verbose");
            Ok(())
        })
        .unwrap();
        assert!(opts.parse(argv(&["--nope"])).is_err());
        opts.parse(argv(&["-v"])).unwrap();
        assert_eq!(*calls.borrow(), ["verbose"]);
    }
}
