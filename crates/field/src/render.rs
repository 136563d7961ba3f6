//! Editor bootstrap markup: asset includes and the initialization script.

use crate::config::EditorConfig;
use crate::settings::{CssInclude, PluginSet};
use crate::toolbar::{toolbar_buttons, Tier};

/// CSS and JS include URLs for one field render, in include order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorAssets {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

/// An image transform offered in the asset insertion modal.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImageTransform {
    pub handle: String,
    pub name: String,
}

/// Reformat an input name into an element id: `fields[body]` becomes
/// `fields-body`.
pub fn format_input_id(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Prefix an element id with its form namespace, when any.
pub fn namespace_input_id(namespace: Option<&str>, id: &str) -> String {
    match namespace {
        Some(namespace) if !namespace.is_empty() => {
            format!("{}-{}", format_input_id(namespace), id)
        }
        _ => id.to_string(),
    }
}

/// Minimal HTML escaping for attribute and text content.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Build the include lists for one render: the bundled editor library,
/// the CMS replacement buttons, and the optional custom CSS file.
pub fn editor_assets(config: &EditorConfig, custom_css: Option<&CssInclude>) -> EditorAssets {
    let res = config.resources_url.trim_end_matches('/');
    let version = &config.editor_version;

    let mut css = vec![
        "//cdnjs.cloudflare.com/ajax/libs/font-awesome/4.4.0/css/font-awesome.min.css".to_string(),
        format!("{res}/lib/v{version}/css/editor.pkgd.min.css"),
        format!("{res}/lib/v{version}/css/editor_style.min.css"),
        format!("{res}/css/theme.css"),
    ];
    if let Some(custom) = custom_css {
        css.push(custom.href(&config.resources_url));
    }

    let js = vec![
        format!("{res}/lib/v{version}/js/editor.pkgd.min.js"),
        format!("{res}/js/generic.js"),
        format!("{res}/js/icons.js"),
        format!("{res}/js/buttons/file.js"),
        format!("{res}/js/buttons/image.js"),
        format!("{res}/js/buttons/link.js"),
        format!("{res}/js/quick/file.js"),
        format!("{res}/js/quick/image.js"),
        format!("{res}/js/quick/link.js"),
    ];

    EditorAssets { css, js }
}

/// Emit the script exposing image transforms to the insertion modal.
/// Returns `None` when no transforms are defined.
pub fn transforms_script(transforms: &[ImageTransform]) -> Option<String> {
    if transforms.is_empty() {
        return None;
    }
    let json = serde_json::to_string(transforms).unwrap_or_else(|_| "[]".to_string());
    Some(format!("var _richtextTransforms = {json};"))
}

/// Emit the editor initialization script for a namespaced element id.
///
/// `pluginsEnabled` is only emitted for a concrete, non-empty set; the
/// toolbar arrays are always present, one per tier.
pub fn init_script(
    namespaced_id: &str,
    license_key: &str,
    enabled: &PluginSet,
    paragraph_styles: &[(String, String)],
) -> String {
    let mut options = Vec::new();

    options.push(format!("key: {}", js_string(license_key)));
    options.push("theme: 'cms'".to_string());

    if let PluginSet::List(list) = enabled {
        if !list.is_empty() {
            let names: Vec<&str> = list.iter().map(String::as_str).collect();
            options.push(format!("pluginsEnabled: {}", js_string_array(&names)));
        }
    }

    for tier in Tier::ALL {
        let buttons = toolbar_buttons(tier, enabled);
        let option = match tier {
            Tier::Lg => "toolbarButtons",
            Tier::Md => "toolbarButtonsMD",
            Tier::Sm => "toolbarButtonsSM",
            Tier::Xs => "toolbarButtonsXS",
            Tier::Quick => "quickInsertButtons",
        };
        options.push(format!("{option}: {}", js_string_array(&buttons)));
    }

    if !paragraph_styles.is_empty() {
        let entries: Vec<String> = paragraph_styles
            .iter()
            .map(|(class, label)| format!("{}: {}", js_string(class), js_string(label)))
            .collect();
        options.push(format!("paragraphStyles: {{ {} }}", entries.join(", ")));
    }

    format!(
        "$('#{namespaced_id}').richtextEditor({{\n    {}\n}});",
        options.join("\n    , ")
    )
}

/// Quote a string as a JS literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Quote a string slice as a JS array literal.
fn js_string_array(items: &[&str]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_input_id() {
        assert_eq!(format_input_id("fields[body]"), "fields-body");
        assert_eq!(format_input_id("body"), "body");
        assert_eq!(format_input_id("my field!"), "my-field");
    }

    #[test]
    fn test_namespace_input_id() {
        assert_eq!(namespace_input_id(Some("ns"), "body"), "ns-body");
        assert_eq!(namespace_input_id(None, "body"), "body");
        assert_eq!(namespace_input_id(Some(""), "body"), "body");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<>&\"'"), "&lt;&gt;&amp;&quot;&#x27;");
    }

    #[test]
    fn test_editor_assets_versioned_paths() {
        let config = EditorConfig::default();
        let assets = editor_assets(&config, None);

        assert!(assets
            .css
            .iter()
            .any(|url| url.contains("lib/v2.2.7/css/editor.pkgd.min.css")));
        assert!(assets
            .js
            .iter()
            .any(|url| url.contains("lib/v2.2.7/js/editor.pkgd.min.js")));
    }

    #[test]
    fn test_editor_assets_custom_css_appended() {
        let config = EditorConfig::default();
        let custom = CssInclude {
            css_type: None,
            file: "site/editor.css".to_string(),
        };
        let assets = editor_assets(&config, Some(&custom));
        assert_eq!(assets.css.last().unwrap(), "/site/editor.css");
    }

    #[test]
    fn test_init_script_wildcard_omits_plugins_enabled() {
        let script = init_script("ns-body", "KEY", &PluginSet::All, &[]);
        assert!(script.contains("$('#ns-body')"));
        assert!(script.contains("key: \"KEY\""));
        assert!(!script.contains("pluginsEnabled"));
        assert!(script.contains("toolbarButtons:"));
        assert!(script.contains("quickInsertButtons:"));
    }

    #[test]
    fn test_init_script_concrete_set_lists_plugins() {
        let enabled = PluginSet::List(vec!["link".to_string(), "charCounter".to_string()]);
        let script = init_script("body", "", &enabled, &[]);
        assert!(script.contains("pluginsEnabled: [\"link\",\"charCounter\"]"));
        assert!(script.contains("insertLinkEntry"));
        assert!(!script.contains("insertAssetImage"));
    }

    #[test]
    fn test_init_script_paragraph_styles() {
        let styles = vec![("intro".to_string(), "Intro Paragraph".to_string())];
        let script = init_script("body", "", &PluginSet::All, &styles);
        assert!(script.contains("paragraphStyles: { \"intro\": \"Intro Paragraph\" }"));
    }

    #[test]
    fn test_init_script_escapes_license_key() {
        let script = init_script("body", "k\"ey", &PluginSet::All, &[]);
        assert!(script.contains("key: \"k\\\"ey\""));
    }

    #[test]
    fn test_transforms_script() {
        assert!(transforms_script(&[]).is_none());

        let transforms = vec![ImageTransform {
            handle: "thumb".to_string(),
            name: "Thumbnail".to_string(),
        }];
        let script = transforms_script(&transforms).unwrap();
        assert!(script.starts_with("var _richtextTransforms = ["));
        assert!(script.contains("\"handle\":\"thumb\""));
    }
}
