//! Error types for binding registration and configuration.

use std::path::PathBuf;

use quill_host::HostError;
use thiserror::Error;

/// Failure while installing the dialogue bindings on a host.
#[derive(Debug, Error)]
pub enum RegistrarError {
	/// The host refused a registration (type already bound, missing adapter).
	#[error("host rejected dialogue bindings: {0}")]
	Host(#[from] HostError),
}

/// Errors that can occur when loading [`crate::BindingsConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A field parsed but holds an unusable value.
	#[error("invalid value for '{field}': {reason}")]
	Invalid {
		field: &'static str,
		reason: &'static str,
	},
}
