use super::{FlagError, FlagSet};

/// Tokens split at the end of the flag section.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct SplitTokens {
    /// Flag tokens rewritten to clap's `--name` form, with their values.
    pub flags: Vec<String>,
    pub leftovers: Vec<String>,
}

fn is_flag_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Rewrites single-dash flags (`-env=prod`, `-v`) to `--env=prod`, `--v` and
/// cuts the token list at the first positional or at a `--` terminator.
///
/// A flag that takes a value and has no `=value` part keeps the following
/// token as its value, even when that token starts with `-`. A name that is
/// empty or starts with `-` or `=` (`---env`, `-=x`) is bad syntax.
pub(super) fn split_tokens(tokens: &[&str], flags: &FlagSet) -> Result<SplitTokens, FlagError> {
    let mut split = SplitTokens::default();
    let mut iter = tokens.iter();

    while let Some(&token) = iter.next() {
        if token == "--" {
            break;
        }
        if !is_flag_token(token) {
            split.leftovers.push(token.to_string());
            break;
        }

        let rewritten = if token.starts_with("--") {
            token.to_string()
        } else {
            tracing::trace!(token, "rewriting single-dash flag");
            format!("-{}", token)
        };

        let body = &rewritten[2..];
        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            return Err(FlagError::bad_syntax(token));
        }
        let (name, inline_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };
        let takes_value = flags
            .spec(name)
            .is_some_and(|spec| spec.kind().takes_value());

        split.flags.push(rewritten);
        if takes_value && !inline_value {
            if let Some(&value) = iter.next() {
                split.flags.push(value.to_string());
            }
        }
    }

    split.leftovers.extend(iter.map(|t| t.to_string()));
    Ok(split)
}
