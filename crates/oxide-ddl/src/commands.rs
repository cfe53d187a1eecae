//! The operations behind each subcommand.
//!
//! Every command takes its inputs already read and returns the text to
//! print, so the binary only deals with argument parsing and logging.

use std::io::Read;
use std::path::Path;

use oxide_ddl_core::format::{FormatFrame, FormatState};
use oxide_ddl_core::{parse_statement, parse_statements, FormatSettings, Node, Statement};
use tracing::{debug, info};

use crate::error::{CliError, Result};
use crate::tree::TreeNode;

/// Name used for standard input in messages.
pub const STDIN_NAME: &str = "<stdin>";

/// One named piece of DDL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// File path, or [`STDIN_NAME`].
    pub name: String,
    /// The text.
    pub text: String,
}

impl Input {
    /// Wraps in-memory text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Reads a file.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: name.clone(),
            source,
        })?;
        Ok(Self { name, text })
    }

    /// Reads standard input to the end.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if standard input cannot be read.
    pub fn stdin() -> Result<Self> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Io {
                path: String::from(STDIN_NAME),
                source,
            })?;
        Ok(Self::new(STDIN_NAME, text))
    }

    /// Parses every statement in the input.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Parse`] for the first invalid statement.
    pub fn parse(&self) -> Result<Vec<Statement>> {
        let statements = parse_statements(&self.text).map_err(|source| CliError::Parse {
            path: self.name.clone(),
            message: source.describe(&self.text),
            source,
        })?;
        debug!(input = %self.name, statements = statements.len(), "loaded statements");
        Ok(statements)
    }
}

/// Reads the given files, or standard input when there are none.
///
/// # Errors
///
/// Returns [`CliError::Io`] for the first unreadable input.
pub fn read_inputs<P: AsRef<Path>>(files: &[P]) -> Result<Vec<Input>> {
    if files.is_empty() {
        return Ok(vec![Input::stdin()?]);
    }
    files.iter().map(|p| Input::from_path(p.as_ref())).collect()
}

/// Formatted text ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    /// The text.
    pub text: String,
    /// A plain-text dictionary password is part of `text`.
    pub credentials_written: bool,
}

impl Rendered {
    /// Appends one statement, terminated by `;`. In multi-line layout
    /// statements are separated by a blank line.
    fn push(&mut self, node: &dyn Node, settings: &FormatSettings) {
        if !self.text.is_empty() && !settings.is_one_line() {
            self.text.push('\n');
        }
        let mut state = FormatState::default();
        node.format(settings, &mut state, FormatFrame::default(), &mut self.text);
        self.text.push_str(";\n");
        self.credentials_written |= state.credentials_written;
    }
}

/// `fmt`: the canonical text of every statement.
///
/// # Errors
///
/// Returns [`CliError::Parse`] if an input is not valid DDL.
pub fn format_inputs(inputs: &[Input], settings: &FormatSettings) -> Result<Rendered> {
    let mut rendered = Rendered::default();
    for input in inputs {
        for statement in input.parse()? {
            rendered.push(&statement, settings);
        }
    }
    Ok(rendered)
}

/// `check`: verifies that formatting every statement is a fixed point.
/// Returns the number of statements checked.
///
/// # Errors
///
/// Returns [`CliError::Parse`] if an input is not valid DDL, and
/// [`CliError::Reparse`] or [`CliError::RoundTrip`] for the first unstable
/// statement.
pub fn check_inputs(inputs: &[Input], settings: &FormatSettings) -> Result<usize> {
    let plain = settings.with_highlight(false);
    let mut checked = 0;
    for input in inputs {
        for (i, statement) in input.parse()?.iter().enumerate() {
            let index = i + 1;
            let first = statement.to_sql_with(&plain);
            let reparsed = parse_statement(&first).map_err(|err| CliError::Reparse {
                path: input.name.clone(),
                index,
                message: err.describe(&first),
            })?;
            let second = reparsed.to_sql_with(&plain);
            if first != second {
                return Err(CliError::RoundTrip {
                    path: input.name.clone(),
                    index,
                    first,
                    second,
                });
            }
            checked += 1;
        }
    }
    info!(statements = checked, "formatting is stable");
    Ok(checked)
}

/// `rewrite`: every CREATE / ATTACH statement without its `ON CLUSTER`
/// qualifier and retargeted at `database`. Queries pass through unchanged.
///
/// # Errors
///
/// Returns [`CliError::Parse`] if an input is not valid DDL.
pub fn rewrite_inputs(
    inputs: &[Input],
    database: &str,
    settings: &FormatSettings,
) -> Result<Rendered> {
    let mut rendered = Rendered::default();
    for input in inputs {
        for statement in input.parse()? {
            match statement.as_create() {
                Some(create) => {
                    let local = create.rewrite_without_on_cluster(database);
                    rendered.push(&local, settings);
                }
                None => rendered.push(&statement, settings),
            }
        }
    }
    Ok(rendered)
}

/// `tree`: node identities of every statement, as an indented dump or as
/// JSON.
///
/// # Errors
///
/// Returns [`CliError::Parse`] if an input is not valid DDL, and
/// [`CliError::Serialization`] if JSON output fails.
pub fn tree_inputs(inputs: &[Input], json: bool) -> Result<String> {
    let mut statements = vec![];
    for input in inputs {
        statements.extend(input.parse()?);
    }

    if json {
        let trees: Vec<TreeNode> = statements
            .iter()
            .map(|s| TreeNode::from_node(s))
            .collect();
        let mut out = serde_json::to_string_pretty(&trees)?;
        out.push('\n');
        return Ok(out);
    }

    Ok(statements.iter().map(Node::dump_tree).collect())
}
