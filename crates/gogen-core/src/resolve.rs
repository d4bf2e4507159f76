use indexmap::IndexMap;

use crate::collect::ImportList;
use crate::config::GogenConfig;
use crate::names;
use crate::parse::schema::{AdditionalProperties, Schema};
use crate::registry::{EnumDef, EnumRegistry, EnumValue, RegisterOutcome};

/// Marker type for nodes that resolve to nothing.
pub const VOID_TYPE: &str = "void";

/// Deterministic placeholder when enum synthesis has no derivable name.
pub const UNNAMED_ENUM: &str = "UnnamedEnum";

/// Custom type translator, tried before all built-in resolution.
/// First non-`None` result in registration order wins.
pub type Translator = Box<dyn Fn(&Schema, &mut ImportList) -> Option<String>>;

/// Hook overriding how a slice/set of the given item type renders.
pub type SliceOverride = Box<dyn Fn(&Schema, &str) -> Option<String>>;

/// Ambient state for one resolution call: the current property/field name
/// (drives enum naming) and the run's enum registry.
pub struct ResolveCx<'a> {
    pub property_name: Option<&'a str>,
    pub enums: &'a mut EnumRegistry,
}

/// Maps schema nodes to Go type strings.
///
/// Resolution is a pure function of the node, the ambient naming context,
/// and registry state; the only side effects are enum registrations and
/// import additions to the caller's sink. Malformed nodes degrade to
/// [`VOID_TYPE`] rather than erroring.
pub struct GoResolver {
    type_map: IndexMap<String, String>,
    format_map: IndexMap<String, String>,
    convert_map: IndexMap<String, String>,
    type_prefix_packages: IndexMap<String, String>,
    set_type_format: String,
    convert_enums: bool,
    enum_suffix: String,
    model_package: String,
    translators: Vec<Translator>,
    slice_override: Option<SliceOverride>,
}

impl GoResolver {
    pub fn new(config: &GogenConfig) -> Self {
        let type_map = [
            // Standard type keywords
            ("integer", "int"),
            ("number", "float64"),
            ("string", "string"),
            ("boolean", "bool"),
            ("File", "File"),
            // Assignable via x-type only
            ("any", "interface{}"),
        ];
        let format_map = [
            ("int32", "int32"),
            ("int64", "int64"),
            ("float", "float32"),
            ("double", "float64"),
            ("byte", "string"),
            ("date", "time.Time"),
            ("date-time", "time.Time"),
        ];
        let convert_map = [("File", "InputStream")];

        Self {
            type_map: to_index_map(&type_map),
            format_map: to_index_map(&format_map),
            convert_map: to_index_map(&convert_map),
            type_prefix_packages: config.type_prefix_packages.clone(),
            set_type_format: config.set_type_format.clone(),
            convert_enums: config.convert_enums,
            enum_suffix: config.enum_suffix.clone(),
            model_package: config.packages.model.clone(),
            translators: Vec::new(),
            slice_override: None,
        }
    }

    /// Append a custom translator to the chain.
    pub fn add_translator(&mut self, translator: Translator) -> &mut Self {
        self.translators.push(translator);
        self
    }

    /// Install a hook overriding slice/set rendering.
    pub fn set_slice_override(&mut self, hook: SliceOverride) -> &mut Self {
        self.slice_override = Some(hook);
        self
    }

    /// Add a legacy-rename entry to the conversion table.
    pub fn add_conversion(&mut self, from: &str, to: &str) -> &mut Self {
        self.convert_map.insert(from.to_string(), to.to_string());
        self
    }

    /// Resolve a schema node to its Go type string.
    ///
    /// `external` qualifies reference types with the model package's short
    /// name and registers the package as an import; `no_pointer` suppresses
    /// optional-to-pointer conversion (set for slice/map element positions
    /// where double indirection is invalid).
    pub fn resolve(
        &self,
        schema: Option<&Schema>,
        imports: &mut ImportList,
        cx: &mut ResolveCx<'_>,
        external: bool,
        no_pointer: bool,
    ) -> Option<String> {
        let schema = schema?;

        for translator in &self.translators {
            if let Some(resolved) = translator(schema, imports) {
                imports.add_type_import(&resolved, &self.type_prefix_packages);
                return Some(resolved);
            }
        }

        if let Some(kind) = schema.effective_type() {
            if kind == "array"
                && let Some(items) = schema.items.as_deref()
            {
                return Some(self.resolve_array(schema, items, imports, cx, external));
            }
            if let Some(AdditionalProperties::Schema(value)) = &schema.additional_properties {
                return Some(self.resolve_map(value, imports, cx));
            }
            if self.convert_enums && kind == "string" && !schema.enum_values.is_empty() {
                return Some(self.resolve_enum(schema, cx, no_pointer));
            }
            return Some(self.resolve_scalar(schema, kind, imports, no_pointer));
        }

        if let Some(ref_path) = schema.ref_target() {
            return Some(self.resolve_reference(ref_path, imports, external, no_pointer));
        }

        Some(VOID_TYPE.to_string())
    }

    fn resolve_array(
        &self,
        schema: &Schema,
        items: &Schema,
        imports: &mut ImportList,
        cx: &mut ResolveCx<'_>,
        external: bool,
    ) -> String {
        let item_type = match items.ref_path.as_deref() {
            Some(ref_path) => {
                if external {
                    imports.add(&self.model_package);
                }
                names::capitalize(names::extract_model_name(ref_path))
            }
            None => self
                .resolve(Some(items), imports, cx, false, true)
                .unwrap_or_else(|| VOID_TYPE.to_string()),
        };
        imports.add_type_import(&item_type, &self.type_prefix_packages);

        let composed = match self
            .slice_override
            .as_ref()
            .and_then(|hook| hook(schema, &item_type))
        {
            Some(overridden) => overridden,
            None if schema.unique_items => self.set_type_format.replace("{type}", &item_type),
            None => format!("[]{item_type}"),
        };
        self.convert(&composed)
    }

    fn resolve_map(
        &self,
        value: &Schema,
        imports: &mut ImportList,
        cx: &mut ResolveCx<'_>,
    ) -> String {
        let value_type = match value.ref_path.as_deref() {
            Some(ref_path) => {
                let name = names::capitalize(names::extract_model_name(ref_path));
                imports.add_type_import(&name, &self.type_prefix_packages);
                name
            }
            None => self
                .resolve(Some(value), imports, cx, false, true)
                .unwrap_or_else(|| VOID_TYPE.to_string()),
        };
        self.convert(&format!("map[string]{value_type}"))
    }

    fn resolve_enum(&self, schema: &Schema, cx: &mut ResolveCx<'_>, no_pointer: bool) -> String {
        let values: Vec<EnumValue> = schema
            .enum_values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let literal = match value.as_str() {
                    Some(text) => text.to_string(),
                    None => value.to_string(),
                };
                EnumValue {
                    name: names::enum_member_name(&literal),
                    value_escaped: names::escape_go_string(&literal),
                    value: literal,
                    number: index as u32 + 1,
                }
            })
            .collect();

        let raw_name = schema
            .x_enum_name
            .as_deref()
            .or(cx.property_name)
            .or(schema.name.as_deref());
        let raw_name = match raw_name {
            Some(name) => name.to_string(),
            None => {
                log::warn!(
                    "enum without a derivable name (no x-enum-name, property name, or schema name); \
                     using placeholder {UNNAMED_ENUM}"
                );
                UNNAMED_ENUM.to_string()
            }
        };

        let enum_type = format!("{}{}", names::type_name(&raw_name), self.enum_suffix);
        let definition = EnumDef {
            name: enum_type.clone(),
            package: self.model_package.clone(),
            var_name: names::variable_name(&raw_name),
            values,
        };
        if cx.enums.register(definition) == RegisterOutcome::Conflict {
            log::warn!("conflicting enumeration \"{enum_type}\" detected; keeping the first definition");
        }

        let mut resolved = enum_type;
        if schema.required_flag() == Some(false) && !no_pointer {
            resolved = format!("*{resolved}");
        }
        resolved
    }

    fn resolve_scalar(
        &self,
        schema: &Schema,
        kind: &str,
        imports: &mut ImportList,
        no_pointer: bool,
    ) -> String {
        let mut resolved = self
            .type_map
            .get(kind)
            .cloned()
            .unwrap_or_else(|| kind.to_string());

        // Format wins over the bare type keyword
        if let Some(mapped) = schema.format.as_deref().and_then(|f| self.format_map.get(f)) {
            resolved = mapped.clone();
        }
        resolved = self.convert(&resolved);

        // Synonym formats get one more lookup via x-format
        if let Some(mapped) = schema
            .x_format
            .as_deref()
            .or(schema.format.as_deref())
            .and_then(|f| self.format_map.get(f))
        {
            resolved = mapped.clone();
        }

        if schema.required_flag() == Some(false) && !no_pointer {
            resolved = format!("*{resolved}");
        }

        // Conversion applies before and after the pointer marker
        resolved = self.convert(&resolved);
        imports.add_type_import(&resolved, &self.type_prefix_packages);
        resolved
    }

    fn resolve_reference(
        &self,
        ref_path: &str,
        imports: &mut ImportList,
        external: bool,
        no_pointer: bool,
    ) -> String {
        let mut resolved = names::capitalize(names::extract_model_name(ref_path));
        if external {
            resolved = format!(
                "{}.{}",
                names::package_prefix(&self.model_package),
                resolved
            );
            imports.add(&self.model_package);
        }
        // References are always indirect, regardless of `required`
        if !no_pointer {
            resolved = format!("*{resolved}");
        }
        resolved
    }

    fn convert(&self, type_name: &str) -> String {
        self.convert_map
            .get(type_name)
            .cloned()
            .unwrap_or_else(|| type_name.to_string())
    }
}

fn to_index_map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::schema::Required;

    fn resolver() -> GoResolver {
        let mut config = GogenConfig::default();
        config.packages.model = "github.com/prizem-io/gateway/models".to_string();
        GoResolver::new(&config)
    }

    fn resolve_one(
        resolver: &GoResolver,
        yaml: &str,
        property_name: Option<&str>,
        external: bool,
        no_pointer: bool,
    ) -> (String, ImportList, EnumRegistry) {
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        let mut imports = ImportList::new();
        let mut enums = EnumRegistry::new();
        let mut cx = ResolveCx {
            property_name,
            enums: &mut enums,
        };
        let resolved = resolver
            .resolve(Some(&schema), &mut imports, &mut cx, external, no_pointer)
            .unwrap();
        (resolved, imports, enums)
    }

    #[test]
    fn test_null_node_resolves_to_none() {
        let resolver = resolver();
        let mut imports = ImportList::new();
        let mut enums = EnumRegistry::new();
        let mut cx = ResolveCx {
            property_name: None,
            enums: &mut enums,
        };
        assert!(resolver.resolve(None, &mut imports, &mut cx, false, false).is_none());
    }

    #[test]
    fn test_required_scalar_not_wrapped() {
        let (ty, _, _) = resolve_one(&resolver(), "type: string\nrequired: true", None, false, false);
        assert_eq!(ty, "string");
    }

    #[test]
    fn test_optional_scalar_pointer_wrapped() {
        let (ty, _, _) = resolve_one(&resolver(), "type: string\nrequired: false", None, false, false);
        assert_eq!(ty, "*string");
    }

    #[test]
    fn test_optional_scalar_pointer_suppressed() {
        let (ty, _, _) = resolve_one(&resolver(), "type: string\nrequired: false", None, false, true);
        assert_eq!(ty, "string");
    }

    #[test]
    fn test_unflagged_scalar_not_wrapped() {
        // No required flag at all: no pointer
        let (ty, _, _) = resolve_one(&resolver(), "type: integer", None, false, false);
        assert_eq!(ty, "int");
    }

    #[test]
    fn test_format_overrides_type() {
        let (ty, _, _) = resolve_one(&resolver(), "type: integer\nformat: int64", None, false, false);
        assert_eq!(ty, "int64");
    }

    #[test]
    fn test_x_format_synonym() {
        let (ty, _, _) = resolve_one(
            &resolver(),
            "type: integer\nformat: int32\nx-format: int64",
            None,
            false,
            false,
        );
        assert_eq!(ty, "int64");
    }

    #[test]
    fn test_date_time_registers_import() {
        let (ty, imports, _) = resolve_one(
            &resolver(),
            "type: string\nformat: date-time",
            None,
            false,
            false,
        );
        assert_eq!(ty, "time.Time");
        assert_eq!(imports.sorted(), ["time"]);
    }

    #[test]
    fn test_pointer_type_still_registers_import() {
        let (ty, imports, _) = resolve_one(
            &resolver(),
            "type: string\nformat: date\nrequired: false",
            None,
            false,
            false,
        );
        assert_eq!(ty, "*time.Time");
        assert_eq!(imports.sorted(), ["time"]);
    }

    #[test]
    fn test_conversion_table() {
        let (ty, _, _) = resolve_one(&resolver(), "type: File", None, false, false);
        assert_eq!(ty, "InputStream");
    }

    #[test]
    fn test_x_type_any() {
        let (ty, _, _) = resolve_one(&resolver(), "type: string\nx-type: any", None, false, false);
        assert_eq!(ty, "interface{}");
    }

    #[test]
    fn test_array_of_scalar() {
        let (ty, _, _) = resolve_one(
            &resolver(),
            "type: array\nitems:\n  type: string",
            None,
            false,
            false,
        );
        assert_eq!(ty, "[]string");
    }

    #[test]
    fn test_array_item_pointer_suppressed() {
        let yaml = "type: array\nitems:\n  type: string\n  required: false";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, "[]string");
    }

    #[test]
    fn test_unique_items_set_shape() {
        let yaml = "type: array\nuniqueItems: true\nitems:\n  type: string";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, "map[string]struct{}");
    }

    #[test]
    fn test_set_shape_configurable() {
        let mut config = GogenConfig::default();
        config.set_type_format = "[]{type}".to_string();
        let resolver = GoResolver::new(&config);
        let yaml = "type: array\nuniqueItems: true\nitems:\n  $ref: \"#/definitions/Widget\"";
        let (ty, _, _) = resolve_one(&resolver, yaml, None, false, false);
        assert_eq!(ty, "[]Widget");
    }

    #[test]
    fn test_array_of_reference() {
        let yaml = "type: array\nitems:\n  $ref: \"#/definitions/widget\"";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, "[]Widget");
    }

    #[test]
    fn test_external_set_of_reference_registers_import() {
        let yaml = "type: array\nuniqueItems: true\nitems:\n  $ref: \"#/definitions/Widget\"";
        let (ty, imports, _) = resolve_one(&resolver(), yaml, None, true, false);
        assert_eq!(ty, "map[Widget]struct{}");
        assert_eq!(imports.sorted(), ["github.com/prizem-io/gateway/models"]);
    }

    #[test]
    fn test_slice_override_hook() {
        let mut resolver = resolver();
        resolver.set_slice_override(Box::new(|_, item| Some(format!("List[{item}]"))));
        let yaml = "type: array\nitems:\n  type: integer";
        let (ty, _, _) = resolve_one(&resolver, yaml, None, false, false);
        assert_eq!(ty, "List[int]");
    }

    #[test]
    fn test_map_of_reference() {
        let yaml = "type: object\nadditionalProperties:\n  $ref: \"#/definitions/Route\"";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, "map[string]Route");
    }

    #[test]
    fn test_map_of_scalar() {
        let yaml = "type: object\nadditionalProperties:\n  type: integer\n  format: int64";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, "map[string]int64");
    }

    #[test]
    fn test_enum_synthesis_from_property_name() {
        let yaml = "type: string\nenum: [active, inactive]";
        let (ty, _, enums) = resolve_one(&resolver(), yaml, Some("status"), false, false);
        assert_eq!(ty, "Status");
        let def = enums.get("Status").unwrap();
        assert_eq!(def.package, "github.com/prizem-io/gateway/models");
        assert_eq!(def.values.len(), 2);
        assert_eq!(def.values[0].name, "Active");
        assert_eq!(def.values[0].value, "active");
        assert_eq!(def.values[0].value_escaped, "\"active\"");
        assert_eq!(def.values[0].number, 1);
        assert_eq!(def.values[1].number, 2);
    }

    #[test]
    fn test_enum_explicit_name_override() {
        let yaml = "type: string\nx-enum-name: RouteKind\nenum: [direct, proxied]";
        let (ty, _, _) = resolve_one(&resolver(), yaml, Some("kind"), false, false);
        assert_eq!(ty, "RouteKind");
    }

    #[test]
    fn test_enum_nameless_placeholder() {
        let yaml = "type: string\nenum: [a, b]";
        let (ty, _, enums) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, UNNAMED_ENUM);
        assert!(enums.get(UNNAMED_ENUM).is_some());
    }

    #[test]
    fn test_enum_optional_pointer() {
        let yaml = "type: string\nrequired: false\nenum: [a, b]";
        let (ty, _, _) = resolve_one(&resolver(), yaml, Some("mode"), false, false);
        assert_eq!(ty, "*Mode");
    }

    #[test]
    fn test_enum_suffix() {
        let mut config = GogenConfig::default();
        config.enum_suffix = "Kind".to_string();
        let resolver = GoResolver::new(&config);
        let yaml = "type: string\nenum: [a]";
        let (ty, _, _) = resolve_one(&resolver, yaml, Some("mode"), false, false);
        assert_eq!(ty, "ModeKind");
    }

    #[test]
    fn test_enum_conversion_disabled() {
        let mut config = GogenConfig::default();
        config.convert_enums = false;
        let resolver = GoResolver::new(&config);
        let yaml = "type: string\nenum: [a, b]";
        let (ty, _, enums) = resolve_one(&resolver, yaml, Some("mode"), false, false);
        assert_eq!(ty, "string");
        assert!(enums.is_empty());
    }

    #[test]
    fn test_reference_always_pointer() {
        let yaml = "$ref: \"#/definitions/Widget\"\nrequired: true";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, "*Widget");
    }

    #[test]
    fn test_reference_pointer_suppressed() {
        let yaml = "$ref: \"#/definitions/Widget\"";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, true);
        assert_eq!(ty, "Widget");
    }

    #[test]
    fn test_reference_external_qualification() {
        let yaml = "$ref: \"#/definitions/Widget\"";
        let (ty, imports, _) = resolve_one(&resolver(), yaml, None, true, false);
        assert_eq!(ty, "*models.Widget");
        assert_eq!(imports.sorted(), ["github.com/prizem-io/gateway/models"]);
    }

    #[test]
    fn test_response_wrapped_reference() {
        let yaml = "schema:\n  $ref: \"#/definitions/Widget\"";
        let (ty, _, _) = resolve_one(&resolver(), yaml, None, false, false);
        assert_eq!(ty, "*Widget");
    }

    #[test]
    fn test_external_import_registered_once() {
        let resolver = resolver();
        let schema: Schema =
            serde_yaml_ng::from_str("$ref: \"#/definitions/Widget\"").unwrap();
        let mut imports = ImportList::new();
        let mut enums = EnumRegistry::new();
        let mut cx = ResolveCx {
            property_name: None,
            enums: &mut enums,
        };
        for _ in 0..3 {
            resolver.resolve(Some(&schema), &mut imports, &mut cx, true, false);
        }
        assert_eq!(imports.sorted(), ["github.com/prizem-io/gateway/models"]);
    }

    #[test]
    fn test_empty_node_is_void() {
        let schema = Schema::default();
        let mut imports = ImportList::new();
        let mut enums = EnumRegistry::new();
        let mut cx = ResolveCx {
            property_name: None,
            enums: &mut enums,
        };
        let ty = resolver()
            .resolve(Some(&schema), &mut imports, &mut cx, false, false)
            .unwrap();
        assert_eq!(ty, VOID_TYPE);
        assert!(imports.is_empty());
    }

    #[test]
    fn test_translator_chain_first_wins() {
        let mut resolver = resolver();
        resolver.add_translator(Box::new(|schema, _| {
            (schema.x_type.as_deref() == Some("duration")).then(|| "time.Duration".to_string())
        }));
        resolver.add_translator(Box::new(|schema, _| {
            (schema.x_type.as_deref() == Some("duration")).then(|| "int64".to_string())
        }));
        let (ty, imports, _) = resolve_one(&resolver, "x-type: duration", None, false, false);
        assert_eq!(ty, "time.Duration");
        assert_eq!(imports.sorted(), ["time"]);
    }

    #[test]
    fn test_idempotent_resolution() {
        let resolver = resolver();
        let schema: Schema =
            serde_yaml_ng::from_str("type: string\nrequired: false\nenum: [a, b]").unwrap();
        let mut first_imports = ImportList::new();
        let mut second_imports = ImportList::new();
        let mut enums = EnumRegistry::new();

        let first = {
            let mut cx = ResolveCx {
                property_name: Some("phase"),
                enums: &mut enums,
            };
            resolver.resolve(Some(&schema), &mut first_imports, &mut cx, false, false)
        };
        let second = {
            let mut cx = ResolveCx {
                property_name: Some("phase"),
                enums: &mut enums,
            };
            resolver.resolve(Some(&schema), &mut second_imports, &mut cx, false, false)
        };

        assert_eq!(first, second);
        assert_eq!(first_imports, second_imports);
        assert_eq!(enums.len(), 1);
    }

    #[test]
    fn test_unrequired_list_does_not_wrap() {
        // Object-level name lists never trigger pointer wrapping themselves
        let yaml = "type: string\nrequired: [other]";
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(schema.required, Some(Required::Names(vec!["other".to_string()])));
        let mut imports = ImportList::new();
        let mut enums = EnumRegistry::new();
        let mut cx = ResolveCx {
            property_name: None,
            enums: &mut enums,
        };
        let ty = resolver()
            .resolve(Some(&schema), &mut imports, &mut cx, false, false)
            .unwrap();
        assert_eq!(ty, "string");
    }
}
