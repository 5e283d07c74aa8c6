// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn test-suite execution results into an XML report.
//!
//! A run is described by a [`RawSuiteResult`](raw::RawSuiteResult), usually deserialized from
//! the JSON record handed over by the test host. [`normalize`] validates it and rolls statuses,
//! counts and times up into a [`SuiteResult`], which an [`XmlBuilder`] then renders:
//!
//! ```
//! use result_xml::{XmlBuilder, normalize, raw::RawSuiteResult};
//!
//! let raw = RawSuiteResult::from_json_str(r#"{"specResults": []}"#)?;
//! let suite = normalize(&raw)?;
//! let xml = XmlBuilder::new().to_string(&suite)?;
//! assert!(xml.contains(r#"<result status="passed""#));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod errors;
mod normalize;
pub mod raw;
mod report;
mod serialize;

pub use builder::*;
pub use errors::*;
pub use normalize::*;
pub use report::*;
pub use serialize::TIMESTAMP_FORMAT;
