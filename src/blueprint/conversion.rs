use super::definition::Blueprint;
use crate::error::SchemaError;

/// A trait for custom data models that can be converted into a [`Blueprint`].
///
/// This is the primary extension point for making tsunagi format-agnostic. By
/// implementing this trait on your own authoring structs, you provide a
/// translation layer that lets the compiler process any upstream format that
/// can express components and sequence flows.
///
/// # Example
///
/// ```rust,no_run
/// use tsunagi::blueprint::{Blueprint, EndpointDefinition, IntoBlueprint};
/// use tsunagi::error::SchemaError;
///
/// struct MyFlowDoc { name: String }
///
/// impl IntoBlueprint for MyFlowDoc {
///     fn into_blueprint(self) -> Result<Blueprint, SchemaError> {
///         Ok(Blueprint {
///             id: "generated".to_string(),
///             name: self.name,
///             version: "1.0.0".to_string(),
///             endpoints: vec![EndpointDefinition::default()],
///         })
///     }
/// }
/// ```
pub trait IntoBlueprint {
    /// Consumes the object and converts it into a compiler-ready blueprint.
    fn into_blueprint(self) -> Result<Blueprint, SchemaError>;
}

impl IntoBlueprint for Blueprint {
    fn into_blueprint(self) -> Result<Blueprint, SchemaError> {
        Ok(self)
    }
}
