//! Input Dispatcher
//!
//! Picks the extra-field editing form for a template. Holds no values of its
//! own: forms read from a [`ContentRecord`] and emit [`ContentPatch`]es.

use serde::Serialize;

use crate::model::{ContentPatch, ContentRecord};
use crate::schema::FieldDescriptor;
use crate::templates::{TemplateCatalog, TemplateId};

/// Extra-field form of one template. Only templates whose catalog entry
/// declares fields have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InputForm {
    template: TemplateId,
}

impl InputForm {
    /// `None` for templates that only use title, description and icon.
    pub fn for_template(id: TemplateId) -> Option<Self> {
        TemplateCatalog::new()
            .entry(id)
            .has_extra_fields()
            .then_some(InputForm { template: id })
    }

    pub fn for_slug(slug: &str) -> Option<Self> {
        TemplateId::parse(slug).and_then(Self::for_template)
    }

    pub fn template(self) -> TemplateId {
        self.template
    }

    pub fn fields(self) -> &'static [FieldDescriptor] {
        TemplateCatalog::new().entry(self.template).fields
    }

    /// Descriptors paired with the current values; absent values read as "".
    pub fn bind(self, content: &ContentRecord) -> Vec<BoundField> {
        self.fields()
            .iter()
            .map(|descriptor| BoundField {
                descriptor: *descriptor,
                value: content.extended.get(descriptor.key).unwrap_or_default().to_string(),
            })
            .collect()
    }
}

pub fn has_template_inputs(id: TemplateId) -> bool {
    InputForm::for_template(id).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundField {
    #[serde(flatten)]
    pub descriptor: FieldDescriptor,
    pub value: String,
}

impl FieldDescriptor {
    /// Patch produced by editing this field.
    pub fn edit(&self, value: impl Into<String>) -> ContentPatch {
        ContentPatch::new().field(self.key, value)
    }
}
