// ABOUTME: Best-effort rendering of templated string properties on arbitrary objects
// ABOUTME: Types declare getter/setter pairs; failures are logged per property and skipped

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use super::engine::TemplateEnvironment;
use super::error::{PropertySkipped, SkipReason};
use super::render::{render_string, OPEN_MARKER};

pub type Getter<T> = fn(&T) -> Option<&str>;
pub type Setter<T> = fn(&mut T, String);
pub type FallibleSetter<T> = fn(&mut T, String) -> std::result::Result<(), String>;

enum Mutator<T> {
    Missing,
    Infallible(Setter<T>),
    Fallible(FallibleSetter<T>),
}

/// A named string property: a getter and, usually, the matching setter
pub struct StringProperty<T> {
    name: &'static str,
    getter: Getter<T>,
    mutator: Mutator<T>,
}

impl<T> StringProperty<T> {
    pub fn new(name: &'static str, getter: Getter<T>, setter: Setter<T>) -> Self {
        Self {
            name,
            getter,
            mutator: Mutator::Infallible(setter),
        }
    }

    /// A property whose setter can reject the value
    pub fn fallible(name: &'static str, getter: Getter<T>, setter: FallibleSetter<T>) -> Self {
        Self {
            name,
            getter,
            mutator: Mutator::Fallible(setter),
        }
    }

    /// A getter without a setter; never rendered
    pub fn read_only(name: &'static str, getter: Getter<T>) -> Self {
        Self {
            name,
            getter,
            mutator: Mutator::Missing,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self.mutator, Mutator::Missing)
    }

    fn set(&self, object: &mut T, value: String) -> std::result::Result<(), String> {
        match self.mutator {
            Mutator::Missing => Err("no setter".to_string()),
            Mutator::Infallible(setter) => {
                setter(object, value);
                Ok(())
            }
            Mutator::Fallible(setter) => setter(object, value),
        }
    }
}

impl<T> std::fmt::Debug for StringProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringProperty")
            .field("name", &self.name)
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Types whose string properties can be rendered in place
pub trait Reflectable: Sized {
    fn string_properties() -> Vec<StringProperty<Self>>;
}

/// Render every writable property of `object` whose value contains `{{`.
/// Properties that fail are left unchanged and logged.
pub fn render_properties<'a, T, E>(env: &E, object: &'a mut T, context: &JsonValue) -> &'a mut T
where
    T: Reflectable,
    E: TemplateEnvironment + ?Sized,
{
    let properties = T::string_properties();
    render_properties_with(env, object, &properties, context)
}

/// Same as [`render_properties`] with an explicit property list
pub fn render_properties_with<'a, T, E>(
    env: &E,
    object: &'a mut T,
    properties: &[StringProperty<T>],
    context: &JsonValue,
) -> &'a mut T
where
    E: TemplateEnvironment + ?Sized,
{
    for skipped in render_each(env, object, properties, context) {
        warn!("render_properties: {}", skipped);
    }
    object
}

/// Render like [`render_properties`] and return the properties that were skipped
pub fn render_properties_checked<T, E>(
    env: &E,
    object: &mut T,
    context: &JsonValue,
) -> Vec<PropertySkipped>
where
    T: Reflectable,
    E: TemplateEnvironment + ?Sized,
{
    let properties = T::string_properties();
    let skipped = render_each(env, object, &properties, context);
    for entry in &skipped {
        warn!("render_properties: {}", entry);
    }
    skipped
}

fn render_each<T, E>(
    env: &E,
    object: &mut T,
    properties: &[StringProperty<T>],
    context: &JsonValue,
) -> Vec<PropertySkipped>
where
    E: TemplateEnvironment + ?Sized,
{
    properties
        .iter()
        .filter_map(|property| render_property(env, object, property, context).err())
        .collect()
}

fn render_property<T, E>(
    env: &E,
    object: &mut T,
    property: &StringProperty<T>,
    context: &JsonValue,
) -> std::result::Result<(), PropertySkipped>
where
    E: TemplateEnvironment + ?Sized,
{
    if !property.is_writable() {
        debug!(property = property.name, "no setter, skipping");
        return Ok(());
    }

    let template = match (property.getter)(object) {
        Some(value) if value.contains(OPEN_MARKER) => value.to_string(),
        _ => return Ok(()),
    };

    let rendered = render_string(env, &template, context).map_err(|e| PropertySkipped {
        property: property.name,
        reason: SkipReason::Render(e),
    })?;

    property
        .set(object, rendered)
        .map_err(|message| PropertySkipped {
            property: property.name,
            reason: SkipReason::Mutator(message),
        })?;

    debug!(property = property.name, "rendered property");
    Ok(())
}
