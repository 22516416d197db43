//! Component synthesis: one self-contained client component per variant.

use crate::ident::VariantNames;
use crate::layout::{render_skeleton, Capabilities};
use crate::profile::SectionProfile;
use crate::schema::ComponentSchema;

/// Produce the full module text for a schema's template component.
pub fn synthesize_component(schema: &ComponentSchema, profile: &SectionProfile) -> String {
    let names = VariantNames::derive(&schema.component_name);
    let caps = Capabilities {
        has_image: schema.has_image,
        image_folder: &profile.image_folder,
    };
    let body = render_skeleton(schema.layout_type, &caps);

    let mut out = String::new();
    out.push_str("\"use client\";\n");
    out.push_str("import React, { useState } from \"react\";\n");
    out.push_str(&format!(
        "import {{ {} }} from \"{}\";\n",
        names.interface, profile.types_import
    ));
    out.push_str("import { EditableText } from \"@/components/ui/editable-text\";\n");
    if schema.has_image {
        out.push_str("import { EditableImage } from \"@/components/ui/editable-image\";\n");
    }
    out.push('\n');

    out.push_str(&format!(
        r#"interface {template}Props {{
  {prop}: {iface};
  isEditable?: boolean;
  onUpdate?: (updatedData: Partial<{iface}>) => void;
}}

export function {template}({{
  {prop},
  isEditable = false,
  onUpdate,
}}: {template}Props) {{
  const [data, setData] = useState({prop});

  // Handle text field updates
  const handleTextUpdate = (field: keyof {iface}) => (value: string) => {{
    const updatedData = {{ ...data, [field]: value }};
    setData(updatedData);
    onUpdate?.({{ [field]: value }} as Partial<{iface}>);
  }};
"#,
        template = names.template_component,
        prop = profile.data_prop,
        iface = names.interface,
    ));

    if schema.has_image {
        out.push_str(IMAGE_HANDLERS);
    }

    out.push_str(&format!("\n  return (\n    {}\n  );\n}}\n", body));
    out
}

const IMAGE_HANDLERS: &str = r#"
  // Handle image updates
  const handleImageUpdate = (imageUrl: string, altText?: string) => {
    const updatedData = {
      ...data,
      imageUrl,
      imageAlt: altText || data.imageAlt,
    };
    setData(updatedData);
    onUpdate?.({
      imageUrl,
      imageAlt: updatedData.imageAlt,
    });
  };

  // Handle alt text updates
  const handleAltUpdate = (altText: string) => {
    const updatedData = { ...data, imageAlt: altText };
    setData(updatedData);
    onUpdate?.({ imageAlt: altText });
  };
"#;
