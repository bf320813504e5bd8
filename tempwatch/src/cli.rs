//! Command-line flags.

use crate::config::Overrides;
use crate::types::Unit;

pub struct ParsedArgs {
    pub overrides: Overrides,
    pub offline: bool,
    pub once: bool,
    pub json: bool,
    pub save: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ArgError {
    /// `--help`: print and exit cleanly.
    Help(String),
    Invalid(String),
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--interval SECS|-i SECS] [--capacity N|-c N] [--url URL|-u URL] \
         [--selector CSS] [--location NAME] [--timeout SECS] [--celsius] [--offline] \
         [--once] [--json] [--save]\n\
         \n\
         Keys: r refresh now, q/Esc quit. Logs: RUST_LOG=debug (written to the config dir)."
    )
}

fn number<T: std::str::FromStr>(flag: &str, v: Option<String>) -> Result<T, ArgError> {
    let v = v.ok_or_else(|| ArgError::Invalid(format!("{flag} needs a value")))?;
    v.parse::<T>()
        .map_err(|_| ArgError::Invalid(format!("invalid value for {flag}: {v:?}")))
}

fn text(flag: &str, v: Option<String>) -> Result<String, ArgError> {
    match v {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ArgError::Invalid(format!("{flag} needs a value"))),
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "tempwatch".into());
    let mut o = Overrides::default();
    let mut offline = false;
    let mut once = false;
    let mut json = false;
    let mut save = false;

    while let Some(arg) = it.next() {
        // --flag=value is the same as --flag value
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = || inline.clone().or_else(|| it.next());
        match flag.as_str() {
            "-h" | "--help" => return Err(ArgError::Help(usage(&prog))),
            "--interval" | "-i" => o.interval_secs = Some(number(&flag, value())?),
            "--capacity" | "-c" => o.capacity = Some(number(&flag, value())?),
            "--timeout" => o.timeout_secs = Some(number(&flag, value())?),
            "--url" | "-u" => o.url = Some(text(&flag, value())?),
            "--selector" => o.selector = Some(text(&flag, value())?),
            "--location" => o.location = Some(text(&flag, value())?),
            "--celsius" => o.unit = Some(Unit::Celsius),
            "--offline" => offline = true,
            "--once" => once = true,
            "--json" => json = true,
            "--save" => save = true,
            _ => {
                return Err(ArgError::Invalid(format!(
                    "Unexpected argument {arg:?}. {}",
                    usage(&prog)
                )))
            }
        }
    }
    Ok(ParsedArgs {
        overrides: o,
        offline,
        once,
        json,
        save,
    })
}
