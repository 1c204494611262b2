//! This crate implements an option scanner for command lines following the
//! traditional `getopt_long` conventions.  It performs no I/O, it never
//! reorders the command line and it leaves the meaning of every option up to
//! you.
//!
//! The goal of this crate is that it's small, strictly POSIX in how it stops
//! and that it behaves the same way every time you feed it the same command
//! line.
//!
//! # Example
//!
//! Scanning happens via the [`Scanner`] type and an option table of [`Opt`]s:
//!
//! ```
//! use argument_getopt::{Error, Kind, Opt, Scanner};
//!
//! fn main() -> Result<(), Error> {
//!     let table = [
//!         Opt::new("amend", 'a', Kind::None),
//!         Opt::new("delay", 'd', Kind::Required),
//!         Opt::new("color", 'c', Kind::Optional),
//!     ];
//!     let args = ["prog", "-ad10", "--color=red", "file.txt"];
//!     let mut scanner = Scanner::new();
//!
//!     while let Some(m) = scanner.next(&table, &args)? {
//!         if m.is_either('a', "amend") {
//!             println!("amending");
//!         } else if m.is_either('d', "delay") {
//!             println!("delay is {}", m.optarg());
//!         } else if m.is_long("color") {
//!             println!("color is {:?}", m.optarg());
//!         }
//!     }
//!
//!     assert_eq!(scanner.remaining(&args), ["file.txt"]);
//!     Ok(())
//! }
//! ```
//!
//! Here is what's happening:
//!
//! * The option table is an ordered slice of [`Opt`].  Each entry has a long
//!   name, a short name (or both) and a [`Kind`] telling the scanner whether
//!   it takes an argument.
//! * [`Scanner::next`] pulls one option from the command line per call.  If
//!   the options are exhausted, `Ok(None)` is returned.  The first element of
//!   the command line is the program name and is never looked at.
//! * Every [`Match`] carries the table entry that matched and its argument
//!   ([`Match::optarg`]).  Use [`Match::is_short`], [`Match::is_long`] or
//!   [`Match::is_either`] to dispatch.
//! * [`Scanner::remaining`] returns everything the scanner has not consumed.
//!
//! If you don't need to step yourself, [`parse`] runs the whole loop and
//! collects the matches, the remaining arguments and the first error.
//!
//! # General Scanning Rules
//!
//! * Short options may be clustered: `-abc` is `-a -b -c`.  A short option
//!   that takes an argument ends the cluster and the rest of the token is its
//!   argument, so `-abcblue` is `-a -b -c blue` if `c` takes one.
//! * Short options are any `char`, not only ASCII.  Clusters are walked by
//!   character, so `-πe` works like you would expect.
//! * Long options are written `--name` or `--name=value`.  Names must match
//!   exactly, abbreviations are not accepted.
//! * [`Kind::Required`] options take the attached value (`-d10`,
//!   `--delay=10`) or otherwise consume the next argument (`-d 10`,
//!   `--delay 10`), even if that argument looks like an option.
//! * [`Kind::Optional`] options only ever take an attached value.  If there
//!   is none the argument is the empty string, which is indistinguishable from
//!   an explicitly empty value (`--color=`).
//! * Scanning stops at the first argument that is not an option.  A lone `-`
//!   is not an option.  Arguments are never permuted.
//! * `--` stops scanning and is swallowed: it is not part of
//!   [`remaining`](Scanner::remaining).
//! * If the table has duplicate entries the first one wins.
//!
//! # Limitations and Error Handling
//!
//! When the [`Scanner`] encounters an error it's not recoverable and the
//! scanner must not be stepped further (eg: it might be left in the middle of
//! a short option cluster).  The offending argument however is still part of
//! [`remaining`](Scanner::remaining) for unknown options, so you can report it
//! or hand it off somewhere else.
//!
//! The scanner logs its steps through the [`log`] facade at `trace` and
//! `debug` level.  It never installs a logger itself.
use std::fmt;
use std::iter::FusedIterator;

use log::{debug, trace};

/// Represents a scanning error.
///
/// The error carries the option it is about.  For unknown options that is
/// only a partial [`Opt`] with just the short or just the long name that was
/// typed; its [`Kind`] is then meaningless and reported as [`Kind::None`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} '{flag}'", describe(.kind))]
pub struct Error {
    kind: ErrorKind,
    opt: Opt,
    flag: String,
}

impl Error {
    fn new(kind: ErrorKind, opt: Opt, flag: String) -> Error {
        Error { kind, opt, flag }
    }

    fn unknown_short(c: char) -> Error {
        let opt = Opt {
            long: None,
            short: Some(c),
            kind: Kind::None,
        };
        Error::new(ErrorKind::Invalid, opt, format!("-{}", c))
    }

    fn unknown_long(name: &str) -> Error {
        let opt = Opt {
            long: Some(name.to_string()),
            short: None,
            kind: Kind::None,
        };
        Error::new(ErrorKind::Invalid, opt, format!("--{}", name))
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The option the error is about.
    pub fn opt(&self) -> &Opt {
        &self.opt
    }

    /// The option as it was spelled on the command line (eg: `-x` or `--foo`).
    pub fn flag(&self) -> &str {
        &self.flag
    }
}

fn describe(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Invalid => "invalid option",
        ErrorKind::Missing => "missing argument for",
        ErrorKind::TooMany => "unexpected argument for",
    }
}

/// The kind of a scanning error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The short or long option is not in the table.
    Invalid,
    /// A [`Kind::Required`] option had no argument, neither attached nor
    /// as a following argument.
    Missing,
    /// A [`Kind::None`] long option was given a value with `=`.
    TooMany,
}

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// The option takes no argument.
    #[default]
    None,
    /// The option requires an argument, attached or following.
    Required,
    /// The option takes an argument only if it's attached.
    Optional,
}

/// A declared option in the option table.
///
/// An option has a long name, a short name or both.  Options without either
/// never match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opt {
    long: Option<String>,
    short: Option<char>,
    kind: Kind,
}

impl Opt {
    /// Creates an option with both a long and a short name.
    ///
    /// An empty long name or a `'\0'` short name mean the option does not
    /// have that form.
    pub fn new(long: &str, short: char, kind: Kind) -> Opt {
        Opt {
            long: Some(long).filter(|x| !x.is_empty()).map(str::to_string),
            short: Some(short).filter(|&x| x != '\0'),
            kind,
        }
    }

    /// Creates an option that only has a long name.
    pub fn long(name: &str, kind: Kind) -> Opt {
        Opt::new(name, '\0', kind)
    }

    /// Creates an option that only has a short name.
    pub fn short(c: char, kind: Kind) -> Opt {
        Opt::new("", c, kind)
    }

    /// The long name without the leading dashes.
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The short name without the leading dash.
    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    /// Whether the option takes an argument.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Is this a specific short option?
    pub fn is_short(&self, c: char) -> bool {
        self.short == Some(c)
    }

    /// Is this a specific long option?
    pub fn is_long(&self, name: &str) -> bool {
        self.long.as_deref() == Some(name)
    }

    /// Is this the option with the given short or the given long name?
    pub fn is_either(&self, c: char, name: &str) -> bool {
        self.is_short(c) || self.is_long(name)
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.short, self.long.as_deref()) {
            (Some(c), Some(name)) => write!(f, "-{}/--{}", c, name),
            (Some(c), None) => write!(f, "-{}", c),
            (None, Some(name)) => write!(f, "--{}", name),
            (None, None) => Ok(()),
        }
    }
}

/// A successfully scanned option.
///
/// It holds the table entry that matched and the argument.  For
/// [`Kind::None`] options the argument is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    opt: Opt,
    optarg: String,
}

impl Match {
    fn new(opt: &Opt, optarg: &str) -> Match {
        Match {
            opt: opt.clone(),
            optarg: optarg.to_string(),
        }
    }

    /// The table entry that matched.
    pub fn opt(&self) -> &Opt {
        &self.opt
    }

    /// The argument of the option.
    pub fn optarg(&self) -> &str {
        &self.optarg
    }

    /// Consumes the match and returns the argument.
    pub fn into_optarg(self) -> String {
        self.optarg
    }

    /// Is this a specific short option?
    pub fn is_short(&self, c: char) -> bool {
        self.opt.is_short(c)
    }

    /// Is this a specific long option?
    pub fn is_long(&self, name: &str) -> bool {
        self.opt.is_long(name)
    }

    /// Is this the option with the given short or the given long name?
    pub fn is_either(&self, c: char, name: &str) -> bool {
        self.opt.is_either(c, name)
    }
}

/// Where the scanner is within the current argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    /// Byte offset of the next short option in the current argument.  It
    /// always sits on a char boundary.
    ShortCluster(usize),
}

/// A `getopt_long` style option scanner.
///
/// The scanner only holds a cursor into the command line.  Both the option
/// table and the arguments are passed to every call of [`next`](Self::next)
/// and must not change between calls.  For basic instructions consult the
/// crate documentation.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    /// Index of the current argument.  `0` means the scanner was not stepped
    /// yet.
    index: usize,
    state: State,
}

impl Scanner {
    /// Creates a scanner positioned before the first argument.
    pub fn new() -> Scanner {
        Scanner::default()
    }

    /// Scans the next option.
    ///
    /// `args` is the full command line, the first element being the program
    /// name.  Returns `Ok(None)` once the first non-option argument, a `--`
    /// or the end of the command line is reached.  That is the end of the
    /// options, stepping on after a `--` would scan what follows it.
    ///
    /// After an error the scanner must not be stepped again.
    pub fn next<S: AsRef<str>>(
        &mut self,
        table: &[Opt],
        args: &[S],
    ) -> Result<Option<Match>, Error> {
        let rv = self.step(table, args);
        if let Err(ref err) = rv {
            debug!("scanning failed at argument {}: {}", self.index, err);
        }
        rv
    }

    /// Returns an iterator that steps the scanner until it stops.
    ///
    /// The iterator ends after the first error.
    pub fn options<'s, 't, 'a, S: AsRef<str>>(
        &'s mut self,
        table: &'t [Opt],
        args: &'a [S],
    ) -> Options<'s, 't, 'a, S> {
        Options {
            scanner: self,
            table,
            args,
            done: false,
        }
    }

    /// Returns the arguments that were not consumed.
    ///
    /// This excludes the program name and a consumed `--`.  After an error
    /// about an unknown option the offending argument is the first element.
    pub fn remaining<'a, S>(&self, args: &'a [S]) -> &'a [S] {
        args.get(self.index.max(1)..).unwrap_or_default()
    }

    fn step<S: AsRef<str>>(&mut self, table: &[Opt], args: &[S]) -> Result<Option<Match>, Error> {
        if self.index == 0 {
            self.index = 1;
        }

        let arg = match args.get(self.index) {
            Some(arg) => arg.as_ref(),
            None => {
                debug!("end of arguments");
                return Ok(None);
            }
        };

        if let State::ShortCluster(pos) = self.state {
            return self.short(table, args, arg, pos);
        }

        if arg.len() < 2 || !arg.starts_with('-') {
            debug!("stopping at non-option {:?}", arg);
            Ok(None)
        } else if arg == "--" {
            debug!("stopping after --");
            self.index += 1;
            Ok(None)
        } else if let Some(body) = arg.strip_prefix("--") {
            self.long(table, args, body)
        } else {
            self.short(table, args, arg, 1)
        }
    }

    /// Decodes the short option at byte offset `pos` of `arg`.
    fn short<S: AsRef<str>>(
        &mut self,
        table: &[Opt],
        args: &[S],
        arg: &str,
        pos: usize,
    ) -> Result<Option<Match>, Error> {
        let mut chars = match arg.get(pos..) {
            Some(rest) => rest.chars(),
            None => return self.leave_cluster(table, args),
        };
        let c = match chars.next() {
            Some(c) => c,
            None => return self.leave_cluster(table, args),
        };
        let attached = chars.as_str();
        let opt = find_short(table, c).ok_or_else(|| Error::unknown_short(c))?;
        trace!("short option -{} ({:?})", c, opt.kind());

        match opt.kind() {
            Kind::None => {
                if attached.is_empty() {
                    self.advance(1);
                } else {
                    self.state = State::ShortCluster(pos + c.len_utf8());
                }
                Ok(Some(Match::new(opt, "")))
            }
            Kind::Required if attached.is_empty() => {
                let value = match args.get(self.index + 1) {
                    Some(value) => value.as_ref(),
                    None => {
                        return Err(Error::new(
                            ErrorKind::Missing,
                            opt.clone(),
                            format!("-{}", c),
                        ))
                    }
                };
                trace!("-{} takes argument {:?}", c, value);
                self.advance(2);
                Ok(Some(Match::new(opt, value)))
            }
            Kind::Required | Kind::Optional => {
                trace!("-{} takes attached argument {:?}", c, attached);
                self.advance(1);
                Ok(Some(Match::new(opt, attached)))
            }
        }
    }

    /// Decodes a long option, `body` is the argument without the `--`.
    fn long<S: AsRef<str>>(
        &mut self,
        table: &[Opt],
        args: &[S],
        body: &str,
    ) -> Result<Option<Match>, Error> {
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let opt = find_long(table, name).ok_or_else(|| Error::unknown_long(name))?;
        trace!("long option --{} ({:?})", name, opt.kind());
        self.advance(1);

        match (opt.kind(), attached) {
            (Kind::None, Some(_)) => Err(Error::new(
                ErrorKind::TooMany,
                opt.clone(),
                format!("--{}", name),
            )),
            (Kind::None, None) | (Kind::Optional, None) => Ok(Some(Match::new(opt, ""))),
            (Kind::Required, Some(value)) | (Kind::Optional, Some(value)) => {
                trace!("--{} takes attached argument {:?}", name, value);
                Ok(Some(Match::new(opt, value)))
            }
            (Kind::Required, None) => {
                let value = match args.get(self.index) {
                    Some(value) => value.as_ref(),
                    None => {
                        return Err(Error::new(
                            ErrorKind::Missing,
                            opt.clone(),
                            format!("--{}", name),
                        ))
                    }
                };
                trace!("--{} takes argument {:?}", name, value);
                self.advance(1);
                Ok(Some(Match::new(opt, value)))
            }
        }
    }

    /// Moves past an exhausted cluster and scans on from the next argument.
    fn leave_cluster<S: AsRef<str>>(
        &mut self,
        table: &[Opt],
        args: &[S],
    ) -> Result<Option<Match>, Error> {
        self.advance(1);
        self.step(table, args)
    }

    /// Moves `n` arguments forward and resets the state.
    fn advance(&mut self, n: usize) {
        self.state = State::Idle;
        self.index += n;
    }
}

/// Iterator over the options of a command line.
///
/// Created by [`Scanner::options`].  It yields until the scanner stops and
/// ends right after yielding an error.
#[derive(Debug)]
pub struct Options<'s, 't, 'a, S> {
    scanner: &'s mut Scanner,
    table: &'t [Opt],
    args: &'a [S],
    done: bool,
}

impl<S: AsRef<str>> Iterator for Options<'_, '_, '_, S> {
    type Item = Result<Match, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next(self.table, self.args) {
            Ok(Some(m)) => Some(Ok(m)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: AsRef<str>> FusedIterator for Options<'_, '_, '_, S> {}

/// The outcome of [`parse`].
#[derive(Debug, Clone)]
pub struct Parsed<'a, S> {
    /// The options in the order they were scanned.
    pub matches: Vec<Match>,
    /// The arguments that were not consumed.
    pub remaining: &'a [S],
    /// The error that stopped scanning, if any.
    pub error: Option<Error>,
}

impl<'a, S> Parsed<'a, S> {
    /// Converts into a result, failing if scanning stopped on an error.
    pub fn into_result(self) -> Result<(Vec<Match>, &'a [S]), Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.matches, self.remaining)),
        }
    }
}

/// Scans a whole command line.
///
/// This steps a fresh [`Scanner`] until it stops or fails and collects what
/// it found.  Matches scanned before an error are kept.
pub fn parse<'a, S: AsRef<str>>(table: &[Opt], args: &'a [S]) -> Parsed<'a, S> {
    let mut scanner = Scanner::new();
    let mut matches = Vec::new();
    let mut error = None;
    for rv in scanner.options(table, args) {
        match rv {
            Ok(m) => matches.push(m),
            Err(err) => error = Some(err),
        }
    }
    Parsed {
        matches,
        remaining: scanner.remaining(args),
        error,
    }
}

fn find_long<'t>(table: &'t [Opt], name: &str) -> Option<&'t Opt> {
    table.iter().find(|opt| opt.is_long(name))
}

fn find_short(table: &[Opt], c: char) -> Option<&Opt> {
    table.iter().find(|opt| opt.is_short(c))
}
