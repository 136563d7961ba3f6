//! Toolbar button composition per responsive size tier.
//!
//! Each tier carries a fixed base button list. Per render, CMS-specific
//! replacements are applied (the editor's stock link/image/file dialogs
//! are swapped for the CMS asset pickers), then buttons whose backing
//! capability is disabled are removed.

use crate::settings::PluginSet;

/// Responsive toolbar size tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Lg,
    Md,
    Sm,
    Xs,
    /// The quick-insert popup shown on empty lines.
    Quick,
}

impl Tier {
    /// All tiers, in the order the init script emits them.
    pub const ALL: [Tier; 5] = [Tier::Lg, Tier::Md, Tier::Sm, Tier::Xs, Tier::Quick];

    /// Tier name as used in configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Lg => "lg",
            Tier::Md => "md",
            Tier::Sm => "sm",
            Tier::Xs => "xs",
            Tier::Quick => "quick",
        }
    }
}

const LG_BUTTONS: &[&str] = &[
    "fullscreen",
    "bold",
    "italic",
    "underline",
    "strikeThrough",
    "subscript",
    "superscript",
    "|",
    "undo",
    "redo",
    "|",
    "fontFamily",
    "fontSize",
    "color",
    "inlineStyle",
    "paragraphStyle",
    "paragraphFormat",
    "|",
    "align",
    "formatOL",
    "formatUL",
    "outdent",
    "indent",
    "quote",
    "-",
    "insertLink",
    "insertImage",
    "insertVideo",
    "insertFile",
    "insertTable",
    "|",
    "selectAll",
    "clearFormatting",
    "|",
    "print",
    "spellChecker",
];

const MD_BUTTONS: &[&str] = &[
    "fullscreen",
    "bold",
    "italic",
    "underline",
    "fontFamily",
    "fontSize",
    "color",
    "paragraphStyle",
    "paragraphFormat",
    "align",
    "formatOL",
    "formatUL",
    "outdent",
    "indent",
    "quote",
    "insertHR",
    "insertLink",
    "insertImage",
    "insertVideo",
    "insertFile",
    "insertTable",
    "undo",
    "redo",
    "clearFormatting",
];

const SM_BUTTONS: &[&str] = &[
    "fullscreen",
    "bold",
    "italic",
    "underline",
    "fontFamily",
    "fontSize",
    "insertLink",
    "insertImage",
    "insertTable",
    "undo",
    "redo",
];

const XS_BUTTONS: &[&str] = &[
    "bold",
    "italic",
    "insertLink",
    "insertImage",
    "insertFile",
    "undo",
    "redo",
];

const QUICK_BUTTONS: &[&str] = &["ul", "ol", "insertLink", "insertImage", "insertFile"];

/// Capabilities whose buttons are removed when the corresponding editor
/// sub-plugin is not enabled.
const CAPABILITIES: &[&str] = &["link", "image", "file"];

/// The fixed base button list for a tier.
fn base_buttons(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Lg => LG_BUTTONS,
        Tier::Md => MD_BUTTONS,
        Tier::Sm => SM_BUTTONS,
        Tier::Xs => XS_BUTTONS,
        Tier::Quick => QUICK_BUTTONS,
    }
}

/// Swap the editor's stock insert dialogs for the CMS asset pickers.
fn replace_button(button: &'static str) -> &'static str {
    match button {
        "link" | "insertLink" => "insertLinkEntry",
        "image" | "insertImage" => "insertAssetImage",
        "file" | "insertFile" => "insertAssetFile",
        other => other,
    }
}

/// Compute the button list for one tier, given the effective enabled
/// sub-plugin set.
///
/// Filtering only applies to a concrete, non-empty set: any button whose
/// name contains a disabled capability (case-insensitive) is removed. The
/// wildcard and an empty list both leave the full replaced list intact.
pub fn toolbar_buttons(tier: Tier, enabled: &PluginSet) -> Vec<&'static str> {
    let mut buttons: Vec<&'static str> = base_buttons(tier)
        .iter()
        .copied()
        .map(replace_button)
        .collect();

    if enabled.is_all() || enabled.is_empty_list() {
        return buttons;
    }

    for capability in CAPABILITIES {
        if !enabled.contains(capability) {
            buttons.retain(|button| !button.to_ascii_lowercase().contains(capability));
        }
    }

    buttons
}
