//! Purpose: Hold the immutable registry of documented `@deay/ui` components.
//! Exports: `Registry`, `ComponentInfo`, `Prop`, `Example`.
//! Role: Read-only lookup table built once at startup and shared by reference.
//! Invariants: Keys are the lowercase component names and are unique.
//! Invariants: Insertion order is preserved for listing; lookup ignores case.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prop {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    pub default: Option<String>,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Example {
    pub title: String,
    pub description: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub name: String,
    pub selector: String,
    pub description: String,
    pub import: Option<String>,
    pub props: Vec<Prop>,
    pub examples: Vec<Example>,
    pub best_practices: Vec<String>,
}

impl ComponentInfo {
    /// Registry key for this component (lowercase display name).
    pub fn key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

pub struct Registry {
    library: String,
    components: Vec<ComponentInfo>,
}

impl Registry {
    /// Build the registry of all documented components.
    pub fn builtin() -> Self {
        Self {
            library: "@deay/ui".to_string(),
            components: vec![button(), input()],
        }
    }

    /// Display name of the documented component library.
    pub fn library(&self) -> &str {
        &self.library
    }

    /// Case-insensitive lookup; unknown names are not an error.
    pub fn get(&self, name: &str) -> Option<&ComponentInfo> {
        self.components
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(name))
    }

    /// Registered keys in insertion order, each exactly once.
    pub fn component_names(&self) -> Vec<String> {
        self.components.iter().map(ComponentInfo::key).collect()
    }

    pub fn components(&self) -> &[ComponentInfo] {
        &self.components
    }

    /// Examples for a named component; empty when the name is unknown.
    pub fn examples(&self, name: &str) -> &[Example] {
        self.get(name).map(|info| info.examples.as_slice()).unwrap_or(&[])
    }
}

fn prop(name: &str, ty: &str, required: bool, default: Option<&str>, description: &str) -> Prop {
    Prop {
        name: name.to_string(),
        ty: ty.to_string(),
        required,
        default: default.map(str::to_string),
        description: description.to_string(),
    }
}

fn example(title: &str, description: &str, code: &str) -> Example {
    Example {
        title: title.to_string(),
        description: description.to_string(),
        code: code.to_string(),
    }
}

fn button() -> ComponentInfo {
    ComponentInfo {
        name: "Button".to_string(),
        selector: "dai-button".to_string(),
        description: "Primary button component following Figma design specifications. \
                      Features three sizes (sm, md, lg), loading state with spinner, and full \
                      accessibility support. Built with Angular 19+ signal inputs."
            .to_string(),
        import: Some("import { DeayButtonComponent } from '@deay/ui';".to_string()),
        props: vec![
            prop(
                "variant",
                "'primary'",
                false,
                Some("'primary'"),
                "Visual style variant (only primary available per Figma design)",
            ),
            prop(
                "size",
                "'sm' | 'md' | 'lg'",
                false,
                Some("'md'"),
                "Size: Small (24px), Medium (32px), or Large (40px)",
            ),
            prop(
                "disabled",
                "boolean",
                false,
                Some("false"),
                "Disables the button with Primary/400 color",
            ),
            prop(
                "loading",
                "boolean",
                false,
                Some("false"),
                "Shows spinner and disables button with Primary/500 color",
            ),
        ],
        examples: vec![
            example(
                "Primary Button - Medium",
                "Standard medium-sized primary button",
                "<dai-button size=\"md\">\n  Button\n</dai-button>",
            ),
            example(
                "Button Sizes",
                "All three size variants",
                "<dai-button size=\"sm\">Button</dai-button>\n\
                 <dai-button size=\"md\">Button</dai-button>\n\
                 <dai-button size=\"lg\">Button</dai-button>",
            ),
            example(
                "Loading State",
                "Button with loading spinner",
                "<dai-button size=\"md\" [loading]=\"true\">\n  Button\n</dai-button>",
            ),
            example(
                "Disabled State",
                "Disabled button",
                "<dai-button size=\"md\" [disabled]=\"true\">\n  Button\n</dai-button>",
            ),
        ],
        best_practices: vec![
            "Use size=\"sm\" for dense UI areas and tables (height: 24px, font: 12px)".to_string(),
            "Use size=\"md\" for standard buttons (height: 32px, font: 14px)".to_string(),
            "Use size=\"lg\" for prominent CTAs (height: 40px, font: 16px)".to_string(),
            "Loading state automatically disables the button and shows spinner".to_string(),
            "Disabled state uses Primary/400 color (#9098FA)".to_string(),
            "Hover state uses Primary/600 color (#5164F7)".to_string(),
            "Focus state shows Primary/800 border (#112EAC)".to_string(),
            "Font: Poppins, weight 400".to_string(),
            "Border radius: 50px (fully rounded)".to_string(),
            "Button is zoneless-ready and uses OnPush change detection".to_string(),
        ],
    }
}

fn input() -> ComponentInfo {
    ComponentInfo {
        name: "Input".to_string(),
        selector: "dai-input".to_string(),
        description: "Input component following Figma design specifications. Features three \
                      sizes (sm, md, lg), error states, disabled states, and Angular Forms \
                      integration via ControlValueAccessor. Uses Poppins font family."
            .to_string(),
        import: Some("import { DeayInputComponent } from '@deay/ui';".to_string()),
        props: vec![
            prop(
                "label",
                "string",
                false,
                Some("''"),
                "Label text displayed above the input (16px Poppins)",
            ),
            prop(
                "placeholder",
                "string",
                false,
                Some("'Text'"),
                "Placeholder text shown when empty",
            ),
            prop(
                "type",
                "'text' | 'password' | 'email'",
                false,
                Some("'text'"),
                "HTML input type",
            ),
            prop(
                "size",
                "'sm' | 'md' | 'lg'",
                false,
                Some("'md'"),
                "Size: Small, Medium (44px height), or Large (50px height)",
            ),
            prop(
                "disabled",
                "boolean",
                false,
                Some("false"),
                "Disables with gray background (#DFDFDF)",
            ),
            prop(
                "errorMessage",
                "string",
                false,
                Some("''"),
                "Error message triggers error styling with red border",
            ),
            prop(
                "value",
                "string (model)",
                false,
                Some("''"),
                "Two-way bound value (Angular 19+ model)",
            ),
        ],
        examples: vec![
            example(
                "Small Input",
                "Compact input for tight spaces",
                "<dai-input\n  label=\"Label\"\n  size=\"sm\"\n  placeholder=\"Text\"\n/>",
            ),
            example(
                "Medium Input (Default)",
                "Standard input size",
                "<dai-input\n  label=\"Label\"\n  size=\"md\"\n  placeholder=\"Text\"\n/>",
            ),
            example(
                "Large Input",
                "Large input for prominence",
                "<dai-input\n  label=\"Label\"\n  size=\"lg\"\n  placeholder=\"Text\"\n/>",
            ),
            example(
                "Error State",
                "Input with validation error",
                "<dai-input\n  label=\"Label\"\n  size=\"md\"\n  placeholder=\"Text\"\n  \
                 [errorMessage]=\"'Error Message'\"\n/>",
            ),
            example(
                "Disabled State",
                "Disabled input",
                "<dai-input\n  label=\"Label\"\n  size=\"md\"\n  placeholder=\"Text\"\n  \
                 [disabled]=\"true\"\n/>",
            ),
            example(
                "Two-way Binding",
                "Using Angular 19+ model binding",
                "<dai-input\n  label=\"Email\"\n  size=\"md\"\n  placeholder=\"Text\"\n  \
                 [(value)]=\"email\"\n/>",
            ),
            example(
                "Reactive Forms",
                "Integration with Angular reactive forms",
                "<dai-input\n  label=\"Email\"\n  size=\"md\"\n  [formControl]=\"emailControl\"\n  \
                 [errorMessage]=\"emailControl.errors ? 'Error Message' : ''\"\n/>",
            ),
        ],
        best_practices: vec![
            "Label: 16px Poppins, weight 400, line-height 1.5em, color #000000".to_string(),
            "Input text: 14px Poppins, weight 400, line-height 1.5em".to_string(),
            "Placeholder color: #ABA7AF".to_string(),
            "Default border: #E5E0EB (1px)".to_string(),
            "Focus border sm: #061764 (2px)".to_string(),
            "Focus border md/lg: #112EAC (1px)".to_string(),
            "Error border: #D51A52 (2px)".to_string(),
            "Error text: #D51A52, 14px Poppins".to_string(),
            "Disabled background and border: #DFDFDF".to_string(),
            "Border radius: 50px (fully rounded)".to_string(),
            "Gap between elements: 8px".to_string(),
            "Padding sm: 8px 12px".to_string(),
            "Padding md: 12px (height: 44px)".to_string(),
            "Padding lg: 14px 12px (height: 50px)".to_string(),
            "Use size=\"sm\" for compact forms".to_string(),
            "Use size=\"md\" for standard forms (default)".to_string(),
            "Use size=\"lg\" for prominent inputs".to_string(),
            "Always provide labels for accessibility".to_string(),
            "Error messages automatically show with ARIA attributes".to_string(),
        ],
    }
}
