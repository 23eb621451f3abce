use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::tools::ResizeHandle;

/// Which axes a component may be resized on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeCapability {
    pub width: bool,
    pub height: bool,
}

impl ResizeCapability {
    pub const NONE: Self = Self { width: false, height: false };
    pub const BOTH: Self = Self { width: true, height: true };

    /// Handles offered to the user: edges for each resizable axis, corners
    /// only when both axes are resizable.
    pub fn handles(&self) -> Vec<ResizeHandle> {
        let mut handles = Vec::new();
        if self.height {
            handles.extend([ResizeHandle::TOP, ResizeHandle::BOTTOM]);
        }
        if self.width {
            handles.extend([ResizeHandle::LEFT, ResizeHandle::RIGHT]);
        }
        if self.width && self.height {
            handles.extend([
                ResizeHandle::TOP_LEFT,
                ResizeHandle::TOP_RIGHT,
                ResizeHandle::BOTTOM_LEFT,
                ResizeHandle::BOTTOM_RIGHT,
            ]);
        }
        handles
    }

    pub fn allows(&self, handle: ResizeHandle) -> bool {
        self.handles().contains(&handle)
    }
}

/// A placeable component kind shown in the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub resize: ResizeCapability,
    /// Model slot name -> human readable label
    #[serde(default)]
    pub model: Vec<(String, String)>,
}

impl ComponentDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            resize: ResizeCapability::NONE,
            model: Vec::new(),
        }
    }

    pub fn with_resize(mut self, resize: ResizeCapability) -> Self {
        self.resize = resize;
        self
    }

    pub fn with_model_slot(mut self, slot: impl Into<String>, label: impl Into<String>) -> Self {
        self.model.push((slot.into(), label.into()));
        self
    }
}

/// Catalog of component kinds, iterated in registration (palette) order
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: Vec<ComponentDefinition>,
    index: HashMap<String, usize>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component: ComponentDefinition) -> EditorResult<()> {
        if self.index.contains_key(&component.key) {
            return Err(EditorError::DuplicateComponent(component.key));
        }
        log::debug!("Registered component `{}`", component.key);
        self.index.insert(component.key.clone(), self.components.len());
        self.components.push(component);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ComponentDefinition> {
        self.index.get(key).map(|&i| &self.components[i])
    }

    pub fn require(&self, key: &str) -> EditorResult<&ComponentDefinition> {
        self.get(key)
            .ok_or_else(|| EditorError::UnknownComponent(key.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
