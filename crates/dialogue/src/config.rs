use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Naming and resource settings for [`crate::register_dialogue_bindings`].
///
/// Every field has a default; a TOML file only needs the keys it overrides:
///
/// ```toml
/// type-prefix = "ESM3_Dialogue"
/// sound-root = "sound"
/// iter-adapter = "ipairsForArray"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BindingsConfig {
	/// Prefix of every script-visible type name (`<prefix>_Info`, `<prefix>_Type4`, ...).
	pub type_prefix: String,
	/// Directory sound references are placed under.
	pub sound_root: String,
	/// Host iteration adapter wired into `__pairs` and `__ipairs`.
	pub iter_adapter: String,
}

impl Default for BindingsConfig {
	fn default() -> Self {
		Self {
			type_prefix: "ESM3_Dialogue".to_owned(),
			sound_root: "sound".to_owned(),
			iter_adapter: quill_host::IPAIRS_FOR_ARRAY.to_owned(),
		}
	}
}

impl BindingsConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.type_prefix.trim().is_empty() {
			return Err(ConfigError::Invalid {
				field: "type-prefix",
				reason: "must not be empty",
			});
		}
		if self.iter_adapter.trim().is_empty() {
			return Err(ConfigError::Invalid {
				field: "iter-adapter",
				reason: "must not be empty",
			});
		}
		Ok(())
	}

	/// Script-visible name of the filtered store for `kind`, e.g. `ESM3_Dialogue_Type4`.
	pub fn kind_type_name(&self, kind: quill_store::DialogueKind) -> String {
		format!("{}_Type{}", self.type_prefix, kind.code())
	}
}
