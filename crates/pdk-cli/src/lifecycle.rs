//! How an invocation concluded, and which command it concluded in.
//!
//! clap either hands back matches or an error; the error kind tells us
//! whether the user asked for help, passed a bad flag, or passed the wrong
//! positional arguments. Each of those is reported once, under the name of
//! the deepest command the command line reached.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgMatches, Command};

/// Root-level flag consumed by the front-end itself.
pub const LOG_LEVEL_FLAG: &str = "--log-level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    /// The command parsed and ran.
    Run,
    /// Positional arguments failed validation.
    ArgsError,
    /// A flag was unknown, malformed or conflicting.
    FlagError,
    /// Help was displayed.
    Help,
    /// `--version`: bypasses every hook, nothing is reported.
    Untracked,
}

impl Conclusion {
    pub fn from_error(err: &clap::Error) -> Self {
        let names_flag = match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) => arg.starts_with('-'),
            Some(ContextValue::Strings(args)) => args.iter().any(|a| a.starts_with('-')),
            _ => false,
        };

        match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::MissingSubcommand => Conclusion::Help,
            ErrorKind::DisplayVersion => Conclusion::Untracked,
            ErrorKind::InvalidSubcommand => Conclusion::ArgsError,
            ErrorKind::UnknownArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::MissingRequiredArgument
            | ErrorKind::TooManyValues
            | ErrorKind::TooFewValues
            | ErrorKind::WrongNumberOfValues => {
                if names_flag {
                    Conclusion::FlagError
                } else {
                    Conclusion::ArgsError
                }
            }
            _ => Conclusion::FlagError,
        }
    }

    pub fn is_tracked(self) -> bool {
        self != Conclusion::Untracked
    }
}

/// Name of the leaf command selected by successfully parsed `matches`.
pub fn matched_command_name<'a>(root: &'a Command, matches: &'a ArgMatches) -> &'a str {
    let mut name = root.get_name();
    let mut current = matches;
    while let Some((sub, sub_matches)) = current.subcommand() {
        name = sub;
        current = sub_matches;
    }
    name
}

fn takes_value(cmd: &Command, matches_flag: impl Fn(&clap::Arg) -> bool) -> bool {
    cmd.get_arguments()
        .find(|arg| matches_flag(arg))
        .is_some_and(|arg| arg.get_action().takes_values())
}

/// Name of the deepest command `args` reaches, for command lines clap
/// rejected. `args[0]` is the program name.
///
/// Values of value-taking flags are skipped so they are never mistaken for
/// subcommands, and a bare `help` word is stepped over so `pdk help build`
/// resolves to `build`. Works on both fresh and already-parsed commands.
pub fn resolve_command_name(root: &Command, args: &[String]) -> String {
    resolve_command_path(root, args)
        .pop()
        .unwrap_or_else(|| root.get_name().to_string())
}

/// Names of the commands `args` walks through below the root, outermost
/// first. Empty when the root itself is the deepest command.
pub fn resolve_command_path(root: &Command, args: &[String]) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = root;
    let mut tokens = args.iter().skip(1);

    while let Some(token) = tokens.next() {
        if token == "--" {
            break;
        }
        if let Some(long) = token.strip_prefix("--") {
            let value_attached = long.contains('=');
            let takes = |cmd: &Command| takes_value(cmd, |arg| arg.get_long() == Some(long));
            if !value_attached && (takes(current) || takes(root)) {
                tokens.next();
            }
            continue;
        }
        if let Some(shorts) = token.strip_prefix('-').filter(|s| !s.is_empty()) {
            let mut chars = shorts.chars();
            if let (Some(short), None) = (chars.next(), chars.next()) {
                let takes = |cmd: &Command| takes_value(cmd, |arg| arg.get_short() == Some(short));
                if takes(current) || takes(root) {
                    tokens.next();
                }
            }
            continue;
        }
        // clap's generated `help` subcommand, present once the command is built.
        let help_word = token == "help"
            && current.has_subcommands()
            && !current.is_disable_help_subcommand_set();
        if help_word {
            continue;
        }
        match current.find_subcommand(token) {
            Some(sub) => {
                path.push(sub.get_name().to_string());
                current = sub;
            }
            None => break,
        }
    }

    path
}

/// clap's rendered help for the deepest command `args` reaches, as a
/// `DisplayHelp` error ready to print.
pub fn help_for(root: &Command, args: &[String]) -> Option<clap::Error> {
    let argv = std::iter::once(root.get_name().to_string())
        .chain(std::iter::once("help".to_string()))
        .chain(resolve_command_path(root, args));
    match root.clone().try_get_matches_from(argv) {
        Err(err) if err.kind() == ErrorKind::DisplayHelp => Some(err),
        _ => None,
    }
}

/// The command line split into what the front-end keeps and what the
/// external program receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFlags {
    pub log_level: Option<String>,
    pub forwarded: Vec<String>,
}

impl RootFlags {
    /// Pull `--log-level` out of the root flags (before the first
    /// subcommand); everything else is forwarded in order. `args[0]` is the
    /// program name and is dropped.
    pub fn scan(args: &[String]) -> Self {
        let mut log_level = None;
        let mut forwarded = Vec::with_capacity(args.len().saturating_sub(1));
        let mut at_root = true;
        let mut tokens = args.iter().skip(1);

        while let Some(token) = tokens.next() {
            if at_root {
                if token == LOG_LEVEL_FLAG {
                    log_level = tokens.next().cloned();
                    continue;
                }
                if let Some(value) = token
                    .strip_prefix(LOG_LEVEL_FLAG)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    log_level = Some(value.to_string());
                    continue;
                }
                if !token.starts_with('-') {
                    at_root = false;
                }
            }
            forwarded.push(token.clone());
        }

        Self {
            log_level,
            forwarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("pdk")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    fn conclusion(args: &[&str]) -> Conclusion {
        let err = crate::build_command()
            .try_get_matches_from(argv(args))
            .err()
            .unwrap_or_else(|| panic!("{args:?} parsed successfully"));
        Conclusion::from_error(&err)
    }

    /// Resolve on a command that has already been through clap, as
    /// `dispatch` does.
    fn resolve(args: &[&str]) -> String {
        let args = argv(args);
        let mut cmd = crate::build_command();
        let _ = cmd.try_get_matches_from_mut(&args);
        resolve_command_name(&cmd, &args)
    }

    #[test]
    fn help_requests_conclude_as_help() {
        assert_eq!(conclusion(&["--help"]), Conclusion::Help);
        assert_eq!(conclusion(&["build", "--help"]), Conclusion::Help);
        assert_eq!(conclusion(&["help", "build"]), Conclusion::Help);
        assert_eq!(conclusion(&[]), Conclusion::Help);
        assert_eq!(conclusion(&["new"]), Conclusion::Help);
        assert_eq!(conclusion(&["get"]), Conclusion::Help);
        assert_eq!(conclusion(&["new", "--debug"]), Conclusion::Help);
        assert_eq!(conclusion(&["--debug"]), Conclusion::Help);
    }

    #[test]
    fn version_flag_is_untracked() {
        let c = conclusion(&["--version"]);
        assert_eq!(c, Conclusion::Untracked);
        assert!(!c.is_tracked());
    }

    #[test]
    fn bad_flags_conclude_as_flag_errors() {
        assert_eq!(conclusion(&["build", "--bogus"]), Conclusion::FlagError);
        assert_eq!(conclusion(&["validate", "--format"]), Conclusion::FlagError);
        assert_eq!(conclusion(&["update", "--noop", "--force"]), Conclusion::FlagError);
        assert_eq!(conclusion(&["--log-level", "loud", "build"]), Conclusion::FlagError);
        assert_eq!(
            conclusion(&["new", "function", "f", "--type", "v3"]),
            Conclusion::FlagError
        );
    }

    #[test]
    fn bad_positionals_conclude_as_args_errors() {
        assert_eq!(conclusion(&["build", "extra"]), Conclusion::ArgsError);
        assert_eq!(conclusion(&["new", "fact", "a", "b"]), Conclusion::ArgsError);
        assert_eq!(conclusion(&["new", "class"]), Conclusion::ArgsError);
        assert_eq!(conclusion(&["set", "config", "user.name"]), Conclusion::ArgsError);
        assert_eq!(conclusion(&["completion", "tcsh"]), Conclusion::ArgsError);
        assert_eq!(conclusion(&["bogus"]), Conclusion::ArgsError);
    }

    #[test]
    fn parsed_command_lines_name_the_leaf() {
        let cmd = crate::build_command();
        let cases: &[(&[&str], &str)] = &[
            (&["build"], "build"),
            (&["new", "fact", "hostname"], "fact"),
            (&["release", "prep"], "prep"),
            (&["release", "--skip-build"], "release"),
            (&["get", "config", "--json"], "config"),
            (&["test", "unit", "--list"], "unit"),
            (&["bundle", "exec", "rake", "--help"], "bundle"),
            (&["--log-level", "debug", "version"], "version"),
        ];
        for (args, expected) in cases {
            let matches = cmd.clone().try_get_matches_from(argv(args)).unwrap();
            assert_eq!(matched_command_name(&cmd, &matches), *expected, "{args:?}");
        }
    }

    #[test]
    fn rejected_command_lines_resolve_deepest_command() {
        assert_eq!(resolve(&["help", "build"]), "build");
        assert_eq!(resolve(&["new", "fact", "--bogus"]), "fact");
        assert_eq!(resolve(&["new", "fact", "a", "b"]), "fact");
        assert_eq!(resolve(&["--log-level", "debug", "build", "x"]), "build");
        assert_eq!(resolve(&["--log-level=debug", "release", "publish", "-x"]), "publish");
        assert_eq!(resolve(&["get", "config", "--nope"]), "config");
        assert_eq!(resolve(&[]), "pdk");
        assert_eq!(resolve(&["bogus", "build"]), "pdk");
    }

    #[test]
    fn help_word_is_stepped_over_on_parsed_commands() {
        assert_eq!(resolve(&["help", "validate"]), "validate");
        assert_eq!(resolve(&["help", "new", "fact"]), "fact");
        assert_eq!(resolve(&["new", "help", "fact"]), "fact");
        assert_eq!(resolve(&["help"]), "pdk");

        let fresh = crate::build_command();
        let args = argv(&["help", "release", "prep"]);
        assert_eq!(resolve_command_name(&fresh, &args), "prep");
        assert_eq!(resolve(&["help", "release", "prep"]), "prep");
    }

    #[test]
    fn missing_subcommand_renders_group_help() {
        let args = argv(&["new", "--debug"]);
        let mut cmd = crate::build_command();
        let _ = cmd.try_get_matches_from_mut(&args);

        assert_eq!(resolve_command_path(&cmd, &args), ["new"]);
        let help = help_for(&cmd, &args).expect("help for `new`");
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert_eq!(help.exit_code(), 0);
        assert!(help.to_string().contains("fact"));
    }

    #[test]
    fn flag_values_are_not_taken_for_subcommands() {
        // `prep` is the value of --version here, not the subcommand.
        assert_eq!(resolve(&["release", "--version", "prep", "--bogus"]), "release");
        assert_eq!(resolve(&["validate", "--format", "junit", "--bogus"]), "validate");
    }

    #[test]
    fn root_flags_strip_log_level_only_before_subcommand() {
        let flags =
            RootFlags::scan(&argv(&["--log-level", "debug", "--debug", "new", "fact", "x"]));
        assert_eq!(flags.log_level.as_deref(), Some("debug"));
        assert_eq!(flags.forwarded, ["--debug", "new", "fact", "x"]);

        let flags = RootFlags::scan(&argv(&["--log-level=info", "build"]));
        assert_eq!(flags.log_level.as_deref(), Some("info"));
        assert_eq!(flags.forwarded, ["build"]);

        let flags = RootFlags::scan(&argv(&["bundle", "exec", "--log-level", "x"]));
        assert_eq!(flags.log_level, None);
        assert_eq!(flags.forwarded, ["bundle", "exec", "--log-level", "x"]);
    }

    #[test]
    fn root_flags_tolerate_dangling_log_level() {
        let flags = RootFlags::scan(&argv(&["--log-level"]));
        assert_eq!(flags.log_level, None);
        assert!(flags.forwarded.is_empty());
    }
}
