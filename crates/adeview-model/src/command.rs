//! Command lines for the `ade` client.
//!
//! A [`Command`] is an ordered token list: the executable, its subcommand,
//! then arguments. The constructors below are the only shapes the resolver
//! produces or runs.
use std::fmt;

use serde::Serialize;

use crate::{ADE_TOOL, Label, Series, ViewName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Command(Vec<String>);

impl Command {
    pub fn new(program: impl Into<String>, subcommand: impl Into<String>) -> Self {
        Self(vec![program.into(), subcommand.into()])
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.0.push(arg.into());
        self
    }

    /// `ade showlabels -series <series> -latest -public`
    pub fn show_latest_public_labels(series: &Series) -> Self {
        Self::new(ADE_TOOL, "showlabels")
            .arg("-series")
            .arg(series.as_str())
            .arg("-latest")
            .arg("-public")
    }

    /// `ade createview -force -label <label> <view>`
    pub fn create_view_from_label(label: &Label, view: &ViewName) -> Self {
        Self::new(ADE_TOOL, "createview")
            .arg("-force")
            .arg("-label")
            .arg(label.as_str())
            .arg(view.as_str())
    }

    /// `ade createview -force -latest -series <series> <view>`
    pub fn create_view_from_latest(series: &Series, view: &ViewName) -> Self {
        Self::new(ADE_TOOL, "createview")
            .arg("-force")
            .arg("-latest")
            .arg("-series")
            .arg(series.as_str())
            .arg(view.as_str())
    }

    pub fn program(&self) -> &str {
        &self.0[0]
    }

    /// Everything after the program name, subcommand included.
    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A command always holds at least the program and its subcommand.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
