//! Layout template library: the fixed JSX skeletons a variant can use.
//!
//! Every skeleton binds the same editable fields (`title`, `description`,
//! and for the split family `subtitle`). Only the split skeleton carries an
//! image region; `minimal` and `card-grid` are image-less layouts and ignore
//! `has_image`.

use crate::schema::LayoutType;

/// The closed set of skeletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skeleton {
    Split,
    Minimal,
    CardGrid,
    /// Fallback for layouts without a dedicated skeleton; renders as `Split`.
    Default,
}

impl Skeleton {
    pub fn for_layout(layout: LayoutType) -> Self {
        match layout {
            LayoutType::SplitLayout => Skeleton::Split,
            LayoutType::Minimal => Skeleton::Minimal,
            LayoutType::CardGrid => Skeleton::CardGrid,
            LayoutType::FullWidth => Skeleton::Default,
        }
    }
}

/// Flags that gate optional skeleton regions.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities<'a> {
    pub has_image: bool,
    /// Upload folder passed to the image editor.
    pub image_folder: &'a str,
}

/// Render the skeleton body for a layout.
pub fn render_skeleton(layout: LayoutType, caps: &Capabilities<'_>) -> String {
    match Skeleton::for_layout(layout) {
        Skeleton::Split | Skeleton::Default => split(caps),
        Skeleton::Minimal => MINIMAL.to_string(),
        Skeleton::CardGrid => CARD_GRID.to_string(),
    }
}

fn split(caps: &Capabilities<'_>) -> String {
    let mut body = String::from(SPLIT_CONTENT);
    if caps.has_image {
        body.push_str("\n\n");
        body.push_str(&image_region(caps.image_folder));
    }
    body.push_str(SPLIT_CLOSE);
    body
}

fn image_region(folder: &str) -> String {
    format!(
        r#"          {{/* Image Section */}}
          <div>
            <div className="relative aspect-[4/3] w-full overflow-hidden rounded-lg">
              <EditableImage
                src={{data.imageUrl}}
                alt={{data.imageAlt || data.title}}
                onImageChange={{handleImageUpdate}}
                onAltChange={{handleAltUpdate}}
                isEditable={{isEditable}}
                className="h-full w-full object-cover"
                width={{600}}
                height={{450}}
                priority
                cloudinaryOptions={{{{
                  folder: "{folder}",
                  resourceType: "image",
                }}}}
                showAltEditor={{isEditable}}
              />
            </div>
          </div>"#,
        folder = folder,
    )
}

const SPLIT_CONTENT: &str = r#"<section className="bg-background py-16">
      <div className="container mx-auto max-w-7xl px-4">
        <div className="grid grid-cols-1 items-center gap-8 md:grid-cols-2 md:gap-16">
          {/* Content Section */}
          <div>
            <EditableText
              value={data.title}
              onChange={handleTextUpdate("title")}
              as="h2"
              className="text-foreground mb-3 text-3xl font-bold md:text-4xl"
              isEditable={isEditable}
              placeholder="Enter main title..."
            />

            <EditableText
              value={data.subtitle}
              onChange={handleTextUpdate("subtitle")}
              as="p"
              className="text-primary mb-4 text-lg font-semibold"
              isEditable={isEditable}
              placeholder="Enter subtitle..."
            />

            <EditableText
              value={data.description}
              onChange={handleTextUpdate("description")}
              as="p"
              className="text-muted-foreground leading-relaxed"
              isEditable={isEditable}
              placeholder="Enter description..."
              multiline={true}
            />
          </div>"#;

const SPLIT_CLOSE: &str = r#"
        </div>
      </div>
    </section>"#;

const MINIMAL: &str = r#"<section className="bg-background py-20">
      <div className="container mx-auto max-w-4xl px-4 text-center">
        <EditableText
          value={data.title}
          onChange={handleTextUpdate("title")}
          as="h2"
          className="text-foreground mb-6 text-4xl font-bold md:text-5xl"
          isEditable={isEditable}
          placeholder="Enter main title..."
        />

        <EditableText
          value={data.description}
          onChange={handleTextUpdate("description")}
          as="p"
          className="text-muted-foreground mx-auto max-w-2xl text-lg leading-relaxed"
          isEditable={isEditable}
          placeholder="Enter description..."
          multiline={true}
        />
      </div>
    </section>"#;

const CARD_GRID: &str = r#"<section className="bg-background py-16">
      <div className="container mx-auto max-w-7xl px-4">
        <div className="mb-12 text-center">
          <EditableText
            value={data.title}
            onChange={handleTextUpdate("title")}
            as="h2"
            className="text-foreground mb-4 text-3xl font-bold md:text-4xl"
            isEditable={isEditable}
            placeholder="Enter main title..."
          />

          <EditableText
            value={data.description}
            onChange={handleTextUpdate("description")}
            as="p"
            className="text-muted-foreground mx-auto max-w-2xl text-lg"
            isEditable={isEditable}
            placeholder="Enter description..."
            multiline={true}
          />
        </div>
      </div>
    </section>"#;
