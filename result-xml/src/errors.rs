// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while normalizing and serializing results.

use std::{fmt, string::FromUtf8Error};
use thiserror::Error;

/// An error that occurs while serializing a [`SuiteResult`](crate::SuiteResult).
///
/// Returned by [`XmlBuilder::serialize`](crate::XmlBuilder::serialize),
/// [`XmlBuilder::render`](crate::XmlBuilder::render) and
/// [`XmlBuilder::to_string`](crate::XmlBuilder::to_string).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The XML writer failed.
    #[error("error serializing result XML")]
    Xml {
        #[from]
        inner: quick_xml::Error,
    },

    /// The serialized document was not valid UTF-8.
    #[error("serialized result XML is not valid UTF-8")]
    Utf8 {
        #[from]
        inner: FromUtf8Error,
    },
}

/// An error that occurs while deserializing a raw execution result from JSON.
///
/// The inner error records the path to the field that failed to deserialize.
#[derive(Debug, Error)]
#[error("failed to parse execution result at `{}`", .inner.path())]
pub struct InputParseError {
    #[source]
    inner: serde_path_to_error::Error<serde_json::Error>,
}

impl InputParseError {
    pub(crate) fn new(inner: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self { inner }
    }

    /// Returns the path to the field that could not be deserialized.
    pub fn path(&self) -> String {
        self.inner.path().to_string()
    }
}

/// A raw execution result violated a structural invariant.
///
/// Returned by [`normalize`](crate::normalize). No report is produced for an input that fails
/// this way.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("malformed execution result at `{path}`: {kind}")]
pub struct MalformedResultError {
    path: ResultPath,
    kind: MalformedResultKind,
}

impl MalformedResultError {
    pub(crate) fn new(path: ResultPath, kind: MalformedResultKind) -> Self {
        Self { path, kind }
    }

    /// The location of the offending node.
    pub fn path(&self) -> &ResultPath {
        &self.path
    }

    /// What was wrong with the node.
    pub fn kind(&self) -> &MalformedResultKind {
        &self.kind
    }
}

/// The kind of structural problem found in a raw execution result.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum MalformedResultKind {
    /// An execution time was negative.
    NegativeExecutionTime {
        /// The value found, in milliseconds.
        millis: i64,
    },

    /// The execution times of a node's children add up to more than a `Duration` can hold.
    ExecutionTimeOverflow,

    /// A specification had an empty name.
    EmptySpecName,

    /// A scenario had an empty name.
    EmptyScenarioName,
}

impl fmt::Display for MalformedResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeExecutionTime { millis } => {
                write!(f, "execution time is negative ({millis}ms)")
            }
            Self::ExecutionTimeOverflow => {
                write!(f, "total execution time of children is too large")
            }
            Self::EmptySpecName => write!(f, "specification name is empty"),
            Self::EmptyScenarioName => write!(f, "scenario name is empty"),
        }
    }
}

/// A path-like locator for a node in the execution result tree, e.g.
/// `suite/spec[0]/scenario[2]/step[1]`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResultPath {
    components: Vec<PathComponent>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum PathComponent {
    Named(&'static str),
    Indexed(&'static str, usize),
}

impl ResultPath {
    /// The path of the suite root.
    pub fn suite() -> Self {
        Self {
            components: vec![PathComponent::Named("suite")],
        }
    }

    /// Returns a new path with a named child appended, e.g. `beforeSpec`.
    pub fn join(&self, name: &'static str) -> Self {
        self.with(PathComponent::Named(name))
    }

    /// Returns a new path with an indexed child appended, e.g. `scenario[2]`.
    pub fn join_index(&self, name: &'static str, index: usize) -> Self {
        self.with(PathComponent::Indexed(name, index))
    }

    fn with(&self, component: PathComponent) -> Self {
        let mut components = self.components.clone();
        components.push(component);
        Self { components }
    }
}

impl fmt::Display for ResultPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match component {
                PathComponent::Named(name) => f.write_str(name)?,
                PathComponent::Indexed(name, index) => write!(f, "{name}[{index}]")?,
            }
        }
        Ok(())
    }
}
