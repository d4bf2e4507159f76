use gogen_core::config::GogenConfig;
use gogen_core::decorate;
use gogen_core::parse;
use gogen_core::resolve::GoResolver;

const GATEWAY: &str = include_str!("fixtures/gateway.yaml");

fn test_config() -> GogenConfig {
    let mut config = GogenConfig::default();
    config.packages.model = "github.com/prizem-io/gateway/models".to_string();
    config.packages.resource = "github.com/prizem-io/gateway/apis".to_string();
    config
}

fn decorate_gateway() -> decorate::Context {
    let spec = parse::from_yaml(GATEWAY).unwrap();
    let config = test_config();
    let resolver = GoResolver::new(&config);
    decorate::run_single(&spec, &config, &resolver).unwrap()
}

#[test]
fn models_sorted_by_name() {
    let context = decorate_gateway();
    let names: Vec<&str> = context.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        ["Entity", "PaginatedList", "Route", "Service", "ServiceList", "ServiceUpdate"]
    );
}

#[test]
fn model_basics() {
    let context = decorate_gateway();
    let service = context.models.iter().find(|m| m.name == "Service").unwrap();

    assert_eq!(service.struct_name, "Service");
    assert_eq!(service.package, "github.com/prizem-io/gateway/models");
    assert_eq!(service.display_name, "service");
    assert_eq!(service.singular_var, "service");
    assert_eq!(service.plural_var, "services");
    assert_eq!(service.table_name, "service");
    assert!(!service.update);
    assert!(!service.is_abstract);
    assert_eq!(service.parent.as_deref(), Some("Entity"));
    assert_eq!(service.entity.as_deref(), Some("Entity"));
}

#[test]
fn update_model_strips_suffix() {
    let context = decorate_gateway();
    let update = context
        .models
        .iter()
        .find(|m| m.name == "ServiceUpdate")
        .unwrap();
    assert!(update.update);
    assert_eq!(update.table_name, "service");
}

#[test]
fn abstract_flag_fixed_set() {
    let context = decorate_gateway();
    let paginated = context
        .models
        .iter()
        .find(|m| m.name == "PaginatedList")
        .unwrap();
    assert!(paginated.is_abstract);
    let entity = context.models.iter().find(|m| m.name == "Entity").unwrap();
    assert!(entity.is_abstract);
}

#[test]
fn property_types_and_optionality() {
    let context = decorate_gateway();
    let service = context.models.iter().find(|m| m.name == "Service").unwrap();

    let prop = |name: &str| {
        service
            .properties
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("missing property {name}"))
    };

    assert_eq!(prop("name").data_type, "string");
    assert_eq!(prop("contactEmail").data_type, "*string");
    assert_eq!(prop("status").data_type, "*Status");
    assert_eq!(prop("hostnames").data_type, "map[string]struct{}");
    assert_eq!(prop("routes").data_type, "[]Route");
    assert_eq!(prop("name").var_name, "Name");
    assert_eq!(prop("contactEmail").var_name, "ContactEmail");
}

#[test]
fn property_tags() {
    let context = decorate_gateway();
    let service = context.models.iter().find(|m| m.name == "Service").unwrap();
    let name = service.properties.iter().find(|p| p.name == "name").unwrap();

    assert_eq!(
        name.tags_string,
        "json:\"name\" yaml:\"name\" msgpack:\"name\" valid:\"required,stringlength(0|64)\""
    );

    // Only the whitelisted rule survives; "bogus" is dropped with a warning
    let email = service
        .properties
        .iter()
        .find(|p| p.name == "contactEmail")
        .unwrap();
    assert_eq!(
        email.tags_string,
        "json:\"contactEmail\" yaml:\"contactEmail\" msgpack:\"contactEmail\" valid:\"email\""
    );
}

#[test]
fn model_imports_aggregate_property_imports() {
    let context = decorate_gateway();
    let entity = context.models.iter().find(|m| m.name == "Entity").unwrap();

    // createdAt resolves to *time.Time
    let created = entity
        .properties
        .iter()
        .find(|p| p.name == "createdAt")
        .unwrap();
    assert_eq!(created.data_type, "*time.Time");
    assert_eq!(created.imports.sorted(), ["time"]);

    assert_eq!(entity.imports.sorted(), ["time"]);
    assert_eq!(entity.all_imports, ["time"]);
    assert_eq!(context.imports, ["time"]);
}

#[test]
fn enum_deduplicated_across_models() {
    // Route.status and Service.status declare the same inline enum
    let context = decorate_gateway();
    assert_eq!(context.enums.len(), 1);
    let status = &context.enums[0];
    assert_eq!(status.name, "Status");
    assert_eq!(status.package, "github.com/prizem-io/gateway/models");
    let members: Vec<(&str, u32)> = status
        .values
        .iter()
        .map(|v| (v.name.as_str(), v.number))
        .collect();
    assert_eq!(members, [("Active", 1), ("Inactive", 2)]);
}

#[test]
fn resource_decoration() {
    let context = decorate_gateway();
    assert_eq!(context.resources.len(), 1);
    let services = &context.resources[0];
    assert_eq!(services.name, "services");
    assert_eq!(services.struct_name, "Services");
    assert_eq!(services.package, "github.com/prizem-io/gateway/apis");
    // External return-type resolution registered the model package
    assert_eq!(services.imports.sorted(), ["github.com/prizem-io/gateway/models"]);
}

#[test]
fn operation_return_types() {
    let context = decorate_gateway();
    let services = &context.resources[0];
    let op = |id: &str| {
        services
            .operations
            .iter()
            .find(|o| o.operation_id.as_deref() == Some(id))
            .unwrap_or_else(|| panic!("missing operation {id}"))
    };

    let list = op("listServices");
    assert_eq!(list.method_name, "ListServices");
    assert_eq!(list.return_type, "*ServiceList");
    assert_eq!(list.return_type_external, "*models.ServiceList");
    assert!(list.has_return);
    assert_eq!(list.return_description.as_deref(), Some("A page of services"));

    let create = op("createService");
    assert_eq!(create.method_name, "Create");
    assert_eq!(create.global_method_name, "CreateService");
    assert_eq!(create.return_type, "*Service");

    let delete = op("deleteService");
    assert_eq!(delete.return_type, "void");
    assert!(!delete.has_return);
    assert!(delete.return_description.is_none());
}

#[test]
fn parameter_decoration() {
    let context = decorate_gateway();
    let services = &context.resources[0];

    let get = services
        .operations
        .iter()
        .find(|o| o.operation_id.as_deref() == Some("getService"))
        .unwrap();
    assert_eq!(get.parameters.len(), 1);
    let name_param = &get.parameters[0];
    assert_eq!(name_param.name, "serviceName");
    assert_eq!(name_param.location, "path");
    assert!(name_param.required);
    assert_eq!(name_param.data_type, "string");
    assert_eq!(name_param.inline_type, "string");

    let create = services
        .operations
        .iter()
        .find(|o| o.operation_id.as_deref() == Some("createService"))
        .unwrap();
    let body = &create.parameters[0];
    assert_eq!(body.data_type, "*Service");
    assert_eq!(body.data_type_external, "*models.Service");
    assert_eq!(body.inline_type, "Service");
    assert_eq!(body.inline_type_external, "models.Service");
}

#[test]
fn out_of_package_reference_registers_import() {
    // Entity lives in a shared package; models extending it must import it
    let mut config = test_config();
    config.reference_packages.insert(
        "Entity".to_string(),
        "github.com/prizem-io/common/models".to_string(),
    );
    let spec = parse::from_yaml(GATEWAY).unwrap();
    let resolver = GoResolver::new(&config);
    let context = decorate::run_single(&spec, &config, &resolver).unwrap();

    let service = context.models.iter().find(|m| m.name == "Service").unwrap();
    let entity_ref = service
        .references
        .iter()
        .find(|r| r.name == "Entity")
        .unwrap();
    assert_eq!(
        entity_ref.package.as_deref(),
        Some("github.com/prizem-io/common/models")
    );
    assert!(service
        .imports
        .sorted()
        .contains(&"github.com/prizem-io/common/models".to_string()));

    // A reference owned by the model package itself adds nothing
    let list = context.models.iter().find(|m| m.name == "ServiceList").unwrap();
    let paginated = list
        .references
        .iter()
        .find(|r| r.name == "PaginatedList")
        .unwrap();
    assert!(paginated.package.is_none());
    assert!(list.imports.is_empty());
}

#[test]
fn pipeline_is_idempotent() {
    let spec = parse::from_yaml(GATEWAY).unwrap();
    let config = test_config();
    let resolver = GoResolver::new(&config);

    let first = decorate::run_single(&spec, &config, &resolver).unwrap();
    let second = decorate::run_single(&spec, &config, &resolver).unwrap();

    let first_json = serde_json::to_value(&first).unwrap();
    let second_json = serde_json::to_value(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn unresolved_reference_is_fatal() {
    let yaml = r##"
swagger: "2.0"
definitions:
  Broken:
    type: object
    properties:
      other:
        $ref: "#/definitions/Missing"
"##;
    let spec = parse::from_yaml(yaml).unwrap();
    let config = test_config();
    let resolver = GoResolver::new(&config);
    let err = decorate::run_single(&spec, &config, &resolver).unwrap_err();
    assert!(err.to_string().contains("#/definitions/Missing"));
}

#[test]
fn multi_spec_run_shares_registry_and_definitions() {
    let common = r#"
swagger: "2.0"
definitions:
  Tag:
    type: object
    required: [label]
    properties:
      label:
        type: string
"#;
    let extra = r##"
swagger: "2.0"
definitions:
  Post:
    type: object
    properties:
      tags:
        type: array
        items:
          $ref: "#/definitions/Tag"
"##;
    let specs = vec![
        parse::from_yaml(common).unwrap(),
        parse::from_yaml(extra).unwrap(),
    ];
    let config = test_config();
    let resolver = GoResolver::new(&config);
    let context = decorate::run(&specs, &config, &resolver).unwrap();

    let names: Vec<&str> = context.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Post", "Tag"]);
    let post = context.models.iter().find(|m| m.name == "Post").unwrap();
    assert_eq!(post.properties[0].data_type, "[]Tag");
}
