//! Purpose: Render component registry records as markdown documentation.
//! Exports: `component_markdown`, `catalog_markdown`.
//! Role: Pure string builders shared by the MCP handler and the CLI.
//! Invariants: Output is a deterministic function of the input record.
//! Invariants: Section order and headings are stable published text.

use std::fmt::Write;

use crate::registry::{ComponentInfo, Registry};

/// Full markdown document for a single component: title, selector,
/// description, optional import snippet, props, usage examples, and a
/// numbered best-practices list.
pub fn component_markdown(info: &ComponentInfo) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# {} Component\n", info.name);
    let _ = writeln!(doc, "**Selector:** `{}`\n", info.selector);
    let _ = writeln!(doc, "**Description:** {}\n", info.description);

    if let Some(import) = &info.import {
        doc.push_str("## Import\n\n");
        let _ = writeln!(doc, "```typescript\n{import}\n```\n");
    }

    doc.push_str("## Props\n\n");
    for prop in &info.props {
        let _ = writeln!(doc, "### {}", prop.name);
        let _ = writeln!(doc, "- **Type:** `{}`", prop.ty);
        let _ = writeln!(
            doc,
            "- **Required:** {}",
            if prop.required { "Yes" } else { "No" }
        );
        let _ = writeln!(
            doc,
            "- **Default:** `{}`",
            prop.default.as_deref().unwrap_or("null")
        );
        let _ = writeln!(doc, "- **Description:** {}\n", prop.description);
    }

    doc.push_str("## Usage Examples\n\n");
    for example in &info.examples {
        let _ = writeln!(doc, "### {}", example.title);
        let _ = writeln!(doc, "{}\n", example.description);
        let _ = writeln!(doc, "```html\n{}\n```\n", example.code);
    }

    doc.push_str("## Best Practices\n\n");
    for (index, practice) in info.best_practices.iter().enumerate() {
        let _ = writeln!(doc, "{}. {practice}", index + 1);
    }

    doc
}

/// Summary listing of every registered component with selector and
/// description, in registry order.
pub fn catalog_markdown(registry: &Registry) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "# Available Components in {}\n", registry.library());

    for info in registry.components() {
        let _ = writeln!(doc, "## {}", info.name);
        let _ = writeln!(doc, "- **Selector:** `{}`", info.selector);
        let _ = writeln!(doc, "- **Description:** {}\n", info.description);
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::{catalog_markdown, component_markdown};
    use crate::registry::Registry;

    #[test]
    fn button_document_has_expected_sections() {
        let registry = Registry::builtin();
        let doc = component_markdown(registry.get("button").expect("button"));

        assert!(doc.contains("# Button Component"));
        assert!(doc.contains("**Selector:** `dai-button`"));
        assert!(doc.contains("## Import"));
        assert!(doc.contains("import { DeayButtonComponent } from '@deay/ui';"));
        assert!(doc.contains("## Props"));
        assert!(doc.contains("## Usage Examples"));
        assert!(doc.contains("## Best Practices"));

        let prop_headings = doc.matches("\n### ").count();
        // 4 props + 4 examples
        assert_eq!(prop_headings, 8);
        for name in ["variant", "size", "disabled", "loading"] {
            assert!(doc.contains(&format!("### {name}\n")), "missing prop {name}");
        }
    }

    #[test]
    fn input_document_lists_seven_props() {
        let registry = Registry::builtin();
        let info = registry.get("input").expect("input");
        let doc = component_markdown(info);

        let props_section = doc
            .split("## Props")
            .nth(1)
            .and_then(|rest| rest.split("## Usage Examples").next())
            .expect("props section");
        assert_eq!(props_section.matches("### ").count(), 7);
    }

    #[test]
    fn props_render_type_required_default_description() {
        let registry = Registry::builtin();
        let doc = component_markdown(registry.get("button").expect("button"));

        assert!(doc.contains("- **Type:** `'sm' | 'md' | 'lg'`"));
        assert!(doc.contains("- **Required:** No"));
        assert!(doc.contains("- **Default:** `'md'`"));
    }

    #[test]
    fn examples_render_as_fenced_html_blocks() {
        let registry = Registry::builtin();
        let doc = component_markdown(registry.get("button").expect("button"));

        assert!(doc.contains("### Loading State"));
        assert!(doc.contains("```html\n<dai-button size=\"md\" [loading]=\"true\">"));
    }

    #[test]
    fn best_practices_are_numbered_from_one() {
        let registry = Registry::builtin();
        let info = registry.get("input").expect("input");
        let doc = component_markdown(info);

        assert!(doc.contains("\n1. Label: 16px Poppins"));
        let last = format!("{}. {}", info.best_practices.len(), "Error messages");
        assert!(doc.contains(&last));
    }

    #[test]
    fn catalog_lists_every_component_and_selector() {
        let registry = Registry::builtin();
        let doc = catalog_markdown(&registry);

        assert!(doc.contains("# Available Components in @deay/ui"));
        for info in registry.components() {
            assert!(doc.contains(&format!("## {}", info.name)));
            assert!(doc.contains(&format!("`{}`", info.selector)));
        }
    }
}
