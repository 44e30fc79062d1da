use crate::decl::{Docs, QualifiedName, RegistryDeclaration, ScalarConstant, ScalarMapping};
use crate::error::Result;
use crate::ir::IrCustomScalar;
use crate::resolve::names;
use crate::validate;

pub const REGISTRY_DOC: &str =
    "Auto generated constants for custom scalars. Use them to register your response adapters.";

pub const UNMAPPED_NOTE: &str =
    "No mapping was registered for this custom scalar. Add one to the custom scalar mapping option.";

/// The custom scalars of one schema, checked for unique names.
#[derive(Debug, Clone)]
pub struct CustomScalarRegistry<'ir> {
    namespace: &'ir str,
    scalars: &'ir [IrCustomScalar],
}

impl<'ir> CustomScalarRegistry<'ir> {
    pub fn new(namespace: &'ir str, scalars: &'ir [IrCustomScalar]) -> Result<Self> {
        validate::check_scalars(scalars)?;
        Ok(Self { namespace, scalars })
    }

    /// One constant per scalar, in input order. Unmapped scalars still get a
    /// constant, annotated so the consumer knows to register a mapping.
    pub fn build(&self) -> RegistryDeclaration {
        tracing::debug!(count = self.scalars.len(), "build custom scalar registry");
        RegistryDeclaration {
            name: names::REGISTRY_NAME.to_string(),
            type_name: QualifiedName::new(self.namespace, [names::REGISTRY_NAME]),
            doc: REGISTRY_DOC.to_string(),
            constants: self
                .scalars
                .iter()
                .map(|scalar| constant(scalar, self.namespace))
                .collect(),
        }
    }
}

fn constant(scalar: &IrCustomScalar, namespace: &str) -> ScalarConstant {
    if scalar.mapped_type.is_none() {
        tracing::debug!(scalar = %scalar.name, "no mapping registered");
    }
    ScalarConstant {
        name: names::identifier(&scalar.name),
        type_name: custom_scalar_type_name(scalar, namespace),
        value: ScalarMapping {
            graphql_name: scalar.name.clone(),
            mapped_type: scalar.mapped_type.clone(),
        },
        docs: Docs::new(scalar.description.as_deref(), scalar.deprecation_reason.as_deref()),
        unmapped_note: scalar.mapped_type.is_none().then(|| UNMAPPED_NOTE.to_string()),
    }
}

/// Holder type for a single scalar: `<namespace>.Scalars.<Name>`.
pub fn custom_scalar_type_name(scalar: &IrCustomScalar, namespace: &str) -> QualifiedName {
    QualifiedName::new(
        namespace,
        [names::SCALARS_HOLDER.to_string(), names::capitalize(&names::identifier(&scalar.name))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;
    use pretty_assertions::assert_eq;

    fn scalar(name: &str, mapped: Option<&str>) -> IrCustomScalar {
        IrCustomScalar {
            name: name.into(),
            mapped_type: mapped.map(Into::into),
            description: None,
            deprecation_reason: None,
        }
    }

    #[test]
    fn constants_keep_input_order_and_flag_unmapped() {
        let scalars = vec![scalar("DateTime", Some("java.time.Instant")), scalar("JSON", None)];
        let registry = CustomScalarRegistry::new("com.example", &scalars).unwrap().build();

        assert_eq!(registry.constants.len(), 2);
        assert_eq!(registry.constants[0].name, "DateTime");
        assert_eq!(registry.constants[1].name, "JSON");
        assert!(!registry.constants[0].is_unmapped());
        assert!(registry.constants[1].is_unmapped());
        assert_eq!(registry.constants[1].unmapped_note.as_deref(), Some(UNMAPPED_NOTE));
    }

    #[test]
    fn constant_value_pairs_name_with_mapping() {
        let scalars = vec![scalar("DateTime", Some("java.time.Instant")), scalar("JSON", None)];
        let registry = CustomScalarRegistry::new("com.example", &scalars).unwrap().build();
        assert_eq!(registry.constants[0].value, ScalarMapping {
            graphql_name: "DateTime".into(),
            mapped_type: Some("java.time.Instant".into()),
        });
        assert_eq!(registry.constants[1].value.mapped_type, None);
    }

    #[test]
    fn registry_is_named_in_namespace() {
        let registry = CustomScalarRegistry::new("com.example", &[]).unwrap().build();
        assert_eq!(registry.type_name.to_string(), "com.example.CustomScalars");
        assert_eq!(registry.doc, REGISTRY_DOC);
        assert!(registry.constants.is_empty());
    }

    #[test]
    fn description_and_deprecation_are_attached() {
        let mut s = scalar("Url", Some("java.net.URI"));
        s.description = Some("An RFC 3986 URL".into());
        s.deprecation_reason = Some("Use `Uri`".into());
        let scalars = [s];
        let registry = CustomScalarRegistry::new("x", &scalars).unwrap().build();
        assert_eq!(registry.constants[0].docs, Docs {
            description: Some("An RFC 3986 URL".into()),
            deprecation_reason: Some("Use `Uri`".into()),
        });
    }

    #[test]
    fn duplicate_names_fail_construction() {
        let scalars = vec![scalar("Date", None), scalar("Date", Some("java.util.Date"))];
        let err = CustomScalarRegistry::new("x", &scalars).unwrap_err();
        assert_eq!(err, IrError::DuplicateScalar { name: "Date".into() });
    }

    #[test]
    fn holder_type_name_is_capitalized() {
        let s = scalar("geoPoint", None);
        assert_eq!(
            custom_scalar_type_name(&s, "com.example").to_string(),
            "com.example.Scalars.GeoPoint"
        );
    }

    #[test]
    fn constants_carry_their_holder_type() {
        let scalars =
            vec![scalar("DateTime", Some("java.time.Instant")), scalar("geo-point", None)];
        let registry = CustomScalarRegistry::new("com.example", &scalars).unwrap().build();
        let holders: Vec<_> = registry.constants.iter().map(|c| c.type_name.to_string()).collect();
        assert_eq!(holders, vec!["com.example.Scalars.DateTime", "com.example.Scalars.Geo_point"]);
    }

    #[test]
    fn names_equal_after_sanitizing_fail_construction() {
        let scalars = vec![scalar("Geo-Point", None), scalar("Geo_Point", Some("geo.Point"))];
        let err = CustomScalarRegistry::new("x", &scalars).unwrap_err();
        assert_eq!(err, IrError::ScalarNameClash {
            first: "Geo-Point".into(),
            second: "Geo_Point".into(),
            generated: "Geo_Point".into(),
        });
    }
}
