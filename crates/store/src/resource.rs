//! Resource path normalization.
//!
//! Records reference resources with whatever separators and casing the
//! authoring tool produced. Paths handed to scripts are normalized: lowercase,
//! forward slashes, no empty segments, relative to the data root.

/// Normalizes a resource path.
pub fn normalize_path(path: &str) -> String {
	let mut out = String::with_capacity(path.len());
	for ch in path.chars() {
		let ch = if ch == '\\' { '/' } else { ch.to_ascii_lowercase() };
		if ch == '/' && (out.is_empty() || out.ends_with('/')) {
			continue;
		}
		out.push(ch);
	}
	out
}

/// Resource roots used to complete record-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
	sound_prefix: String,
}

impl Default for ResourcePaths {
	fn default() -> Self {
		Self::new("sound")
	}
}

impl ResourcePaths {
	pub fn new(sound_root: &str) -> Self {
		let root = normalize_path(sound_root);
		let root = root.trim_end_matches('/');
		let sound_prefix = if root.is_empty() { String::new() } else { format!("{root}/") };
		Self { sound_prefix }
	}

	/// Normalizes a sound reference and places it under the sound root.
	pub fn correct_sound_path(&self, path: &str) -> String {
		let normalized = normalize_path(path);
		if normalized.starts_with(&self.sound_prefix) {
			normalized
		} else {
			format!("{}{normalized}", self.sound_prefix)
		}
	}
}
