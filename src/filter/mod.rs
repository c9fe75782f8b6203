//! Structured ffmpeg filter-graph builder
//!
//! Filters are joined with `,` inside a chain, chains with `;`, and filter
//! arguments with `:`. ffmpeg unescapes argument values twice: the graph
//! parser first, then the option parser of the filter itself. Values are
//! escaped for both levels here so callers never escape by hand.

use std::borrow::Cow;
use std::fmt;

/// Characters the option parser treats specially
const OPTION_SPECIAL: &[char] = &[':', '\\', '\''];
/// Characters the graph parser treats specially
const GRAPH_SPECIAL: &[char] = &[',', ';', '[', ']', '\\', '\''];

/// Escape a filter argument value for the option and graph parsers.
///
/// `:`, `\` and `'` are backslash-escaped for the option level, then the
/// whole value is single-quoted for the graph level. A `'` inside that
/// quoting is written as `'\''`.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if !value.contains(OPTION_SPECIAL) && !value.contains(GRAPH_SPECIAL) {
        return Cow::Borrowed(value);
    }

    let mut option_level = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        if OPTION_SPECIAL.contains(&ch) {
            option_level.push('\\');
        }
        option_level.push(ch);
    }

    let mut quoted = String::with_capacity(option_level.len() + 2);
    quoted.push('\'');
    for ch in option_level.chars() {
        if ch == '\'' {
            // Backslashes are literal inside quotes: close, escape, reopen.
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}

/// Format a timestamp in seconds the way ffmpeg expressions expect it
pub fn timestamp(seconds: f64) -> String {
    format!("{}", seconds)
}

/// `between(t,start,end)` enable expression
pub fn between(start: f64, end: f64) -> String {
    format!("between(t,{},{})", timestamp(start), timestamp(end))
}

/// `gte(t,start)` enable expression
pub fn from_time(start: f64) -> String {
    format!("gte(t,{})", timestamp(start))
}

#[derive(Debug, Clone, PartialEq)]
enum FilterArg {
    Positional(String),
    Named(String, String),
}

/// A single filter with its arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    name: String,
    args: Vec<FilterArg>,
}

impl Filter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add an unnamed argument
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(FilterArg::Positional(value.into()));
        self
    }

    /// Add a `key=value` argument
    pub fn option(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.args
            .push(FilterArg::Named(key.into(), value.to_string()));
        self
    }

    /// Timeline `enable` option
    pub fn enable(self, expression: impl Into<String>) -> Self {
        self.option("enable", expression.into())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            f.write_str(if i == 0 { "=" } else { ":" })?;
            match arg {
                FilterArg::Positional(value) => write!(f, "{}", escape_value(value))?,
                FilterArg::Named(key, value) => write!(f, "{}={}", key, escape_value(value))?,
            }
        }
        Ok(())
    }
}

/// A linear chain of filters with labelled input and output pads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    inputs: Vec<String>,
    filters: Vec<Filter>,
    outputs: Vec<String>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input pad label, e.g. `0:v` or `ad2`
    pub fn input(mut self, label: impl Into<String>) -> Self {
        self.inputs.push(label.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add an output pad label
    pub fn output(mut self, label: impl Into<String>) -> Self {
        self.outputs.push(label.into());
        self
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.inputs {
            write!(f, "[{}]", label)?;
        }
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", filter)?;
        }
        for label in &self.outputs {
            write!(f, "[{}]", label)?;
        }
        Ok(())
    }
}

/// A complete graph for `-filter_complex`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGraph {
    chains: Vec<FilterChain>,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(mut self, chain: FilterChain) -> Self {
        self.chains.push(chain);
        self
    }

    pub fn extend(mut self, chains: impl IntoIterator<Item = FilterChain>) -> Self {
        self.chains.extend(chains);
        self
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.chains.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", chain)?;
        }
        Ok(())
    }
}
