//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for command shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Analyze-submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Discard-draft shortcut display
/// - macOS: "Cmd+D"
/// - Linux/Windows: "Ctrl+D"
#[cfg(target_os = "macos")]
pub const DISCARD_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const DISCARD_SHORTCUT: &str = "Ctrl+D";
