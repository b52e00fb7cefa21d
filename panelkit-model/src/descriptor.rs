//! Metadata shared by every entity kind.

use crate::naming;
use crate::{CanSee, ElementKind, ModelError, RequestContext};
use serde_json::Value;
use std::fmt;

/// Open key/value bag forwarded to the frontend untouched.
pub type Meta = serde_json::Map<String, Value>;

/// Identity, presentation and visibility metadata of one entity.
#[derive(Clone)]
pub struct Descriptor {
    kind: ElementKind,
    class: String,
    name: Option<String>,
    uri_key: Option<String>,
    components: Vec<String>,
    group: Option<String>,
    icon: Option<String>,
    meta: Meta,
    can_see: Option<CanSee>,
}

impl Descriptor {
    pub fn new(kind: ElementKind, class: impl Into<String>) -> Self {
        Self {
            kind,
            class: class.into(),
            name: None,
            uri_key: None,
            components: Vec::new(),
            group: None,
            icon: None,
            meta: Meta::new(),
            can_see: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Class name the entity was declared under.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Explicit uri key, or one derived from the class name.
    pub fn uri_key(&self) -> String {
        match &self.uri_key {
            Some(key) => key.clone(),
            None => naming::uri_key_for(&self.class, Some(self.kind.class_suffix())),
        }
    }

    /// Explicit display name, or one derived from the class name.
    pub fn name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => naming::display_name_for(&self.class, Some(self.kind.class_suffix())),
        }
    }

    /// Primary component, if any is declared.
    pub fn component(&self) -> Option<&str> {
        self.components.first().map(String::as_str)
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn authorize(&self, ctx: &RequestContext) -> bool {
        match &self.can_see {
            Some(callback) => callback(ctx),
            None => true,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.components.is_empty() {
            return Err(ModelError::MissingComponent {
                kind: self.kind,
                class: self.class.clone(),
            });
        }
        if let Some(index) = self.components.iter().position(|c| c.trim().is_empty()) {
            return Err(ModelError::EmptyComponent {
                kind: self.kind,
                class: self.class.clone(),
                index,
            });
        }
        let uri_key = self.uri_key();
        if !naming::is_valid_uri_key(&uri_key) {
            return Err(ModelError::InvalidUriKey {
                kind: self.kind,
                class: self.class.clone(),
                uri_key,
            });
        }
        if self.name().trim().is_empty() {
            return Err(ModelError::EmptyName {
                kind: self.kind,
                class: self.class.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn set_uri_key(&mut self, uri_key: String) {
        self.uri_key = Some(uri_key);
    }

    pub(crate) fn set_components(&mut self, components: Vec<String>) {
        self.components = components;
    }

    pub(crate) fn set_group(&mut self, group: String) {
        self.group = Some(group);
    }

    pub(crate) fn set_icon(&mut self, icon: String) {
        self.icon = Some(icon);
    }

    pub(crate) fn set_can_see(&mut self, callback: CanSee) {
        self.can_see = Some(callback);
    }

    /// Shallow merge: colliding keys are overwritten, the rest accumulate.
    pub(crate) fn merge_meta<I, K>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in partial {
            self.meta.insert(key.into(), value);
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("kind", &self.kind)
            .field("class", &self.class)
            .field("name", &self.name)
            .field("uri_key", &self.uri_key)
            .field("components", &self.components)
            .field("group", &self.group)
            .field("icon", &self.icon)
            .field("meta", &self.meta)
            .field("can_see", &self.can_see.is_some())
            .finish()
    }
}

/// Generates the `with_*` builders every entity kind shares.
///
/// The type must hold its metadata in a `descriptor: Descriptor` field.
macro_rules! impl_descriptor_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn with_name(mut self, name: impl Into<String>) -> Self {
                self.descriptor.set_name(name.into());
                self
            }

            pub fn with_uri_key(mut self, uri_key: impl Into<String>) -> Self {
                self.descriptor.set_uri_key(uri_key.into());
                self
            }

            /// Sets a single component, replacing any previously declared.
            pub fn with_component(mut self, component: impl Into<String>) -> Self {
                self.descriptor.set_components(vec![component.into()]);
                self
            }

            pub fn with_group(mut self, group: impl Into<String>) -> Self {
                self.descriptor.set_group(group.into());
                self
            }

            pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
                self.descriptor.set_icon(icon.into());
                self
            }

            /// Merges `partial` into the meta bag.
            pub fn with_meta<I, K>(mut self, partial: I) -> Self
            where
                I: IntoIterator<Item = (K, serde_json::Value)>,
                K: Into<String>,
            {
                self.descriptor.merge_meta(partial);
                self
            }

            /// Restricts visibility to requests accepted by `callback`.
            pub fn can_see<F>(mut self, callback: F) -> Self
            where
                F: Fn(&$crate::RequestContext) -> bool + Send + Sync + 'static,
            {
                self.descriptor.set_can_see(std::sync::Arc::new(callback));
                self
            }

            /// Restricts visibility to users holding `ability`.
            pub fn can_see_when(self, ability: impl Into<String>) -> Self {
                let ability = ability.into();
                self.can_see(move |ctx| ctx.can(&ability))
            }

            pub fn meta(&self) -> &$crate::Meta {
                self.descriptor.meta()
            }

            pub fn component(&self) -> Option<&str> {
                self.descriptor.component()
            }

            pub fn icon(&self) -> Option<&str> {
                self.descriptor.icon()
            }
        }
    };
}

pub(crate) use impl_descriptor_builders;
