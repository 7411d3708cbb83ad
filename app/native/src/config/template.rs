//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with every option and its default.
///
/// The template is valid JSONC and parses to `TilegapsConfig::default()`.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// tilegaps Configuration File
// ===========================
// This file uses JSONC format (JSON with comments).
// Every option below is set to its default value.
// Changes are picked up while `tilegaps watch` is running.

{
  // ============================================================================
  // Gaps
  // ============================================================================
  // Gap sizes in pixels. Window edges close to a screen edge or to a quarter,
  // half or three-quarter division of the screen snap into place, leaving
  // these gaps. Neighboring windows are pulled apart or together so exactly
  // `mid` pixels separate them.
  "gaps": {
    // Gap between windows and the top edge of the screen
    "top": 12,

    // Gap between windows and the left edge of the screen
    "left": 12,

    // Gap between windows and the right edge of the screen
    "right": 12,

    // Gap between windows and the bottom edge of the screen
    "bottom": 12,

    // Gap between two adjacent windows
    "mid": 12
  },

  // ============================================================================
  // Offsets
  // ============================================================================
  // Space reserved along each screen edge, for panels that float above the
  // desktop without reserving space of their own.
  "offsets": {
    "top": 0,
    "left": 0,
    "right": 0,
    "bottom": 0
  },

  // ============================================================================
  // Maximized Windows
  // ============================================================================
  // When false, maximized windows (and windows that exactly fill the screen)
  // are left alone.
  "includeMaximized": false
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
