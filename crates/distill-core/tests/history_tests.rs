use std::sync::Arc;

use distill_core::{
    ChangeType, ClassHistory, DistillReport, Distiller, EntityType, SourceCodeEntity, SourceRange,
    StructureEntityVersion, TreeEditOperation,
};

fn entity(name: &str, entity_type: EntityType, start: usize) -> SourceCodeEntity {
    SourceCodeEntity::new(name, entity_type, SourceRange::new(start, start + name.len().max(1)))
}

fn return_type_change(root: &Arc<StructureEntityVersion>) -> Vec<TreeEditOperation> {
    let declaration = entity(&root.unique_name, EntityType::MethodDeclaration, 0);
    vec![
        TreeEditOperation::delete(root, entity("Object", EntityType::SimpleType, 7), declaration.clone()),
        TreeEditOperation::insert(root, entity("String", EntityType::SimpleType, 7), declaration),
    ]
}

#[test]
fn test_distill_attaches_changes_to_new_version() {
    let root = Arc::new(StructureEntityVersion::method("m()").with_version("r2"));
    let version = Distiller::default().distill(&root, return_type_change(&root));

    assert_eq!(version, *root);
    assert!(version.has_changes());
    assert_eq!(version.changes()[0].change_type(), ChangeType::ReturnTypeChange);
    assert_eq!(version.significance_level(), 4);
}

#[test]
fn test_report_counts_change_types() {
    let root = Arc::new(StructureEntityVersion::method("m()").with_version("r2"));
    let body = entity("m()", EntityType::MethodDeclaration, 0);
    let mut ops = return_type_change(&root);
    ops.push(TreeEditOperation::insert(&root, entity("a = 1;", EntityType::Assignment, 12), body.clone()));
    ops.push(TreeEditOperation::insert(&root, entity("b = 1;", EntityType::Assignment, 20), body));

    let version = Distiller::default().distill(&root, ops);
    let report = DistillReport::from_version(&version);

    assert_eq!(report.total_changes, 3);
    assert_eq!(report.significance, 6);
    assert_eq!(report.change_types.get(&ChangeType::StatementInsert), Some(&2));
    assert_eq!(report.change_types.get(&ChangeType::ReturnTypeChange), Some(&1));

    let json = report.to_json().unwrap();
    assert!(json.contains("\"RETURN_TYPE_CHANGE\": 1"));
    assert!(json.contains("\"version\": \"r2\""));
}

#[test]
fn test_class_history_files_versions_by_kind() {
    let mut history = ClassHistory::new("Foo");
    history.add_version(StructureEntityVersion::class("Foo").with_version("r1"));
    history.add_version(StructureEntityVersion::field("count").with_version("r1"));
    history.add_version(StructureEntityVersion::class("Foo.Inner").with_version("r1"));

    let root = Arc::new(StructureEntityVersion::method("m()").with_version("r2"));
    let changed = Distiller::default().distill(&root, return_type_change(&root));
    history.add_version(StructureEntityVersion::method("m()").with_version("r1"));
    history.add_version(changed);

    assert_eq!(history.class_name(), "Foo");
    assert_eq!(history.class_versions().len(), 1);
    assert_eq!(history.attribute_history("count").map(|h| h.versions().len()), Some(1));
    assert!(history.inner_class_history("Foo.Inner").is_some());

    let method = history.method_history("m()").unwrap();
    assert_eq!(method.versions().len(), 2);
    assert_eq!(method.latest().and_then(|v| v.version.as_deref()), Some("r2"));
    assert!(method.has_changes());

    assert!(history.has_changes());
    assert_eq!(history.significance_level(), 4);
    assert_eq!(history.methods().count(), 1);
}

#[test]
fn test_empty_history_has_no_changes() {
    let mut history = ClassHistory::new("Foo");
    history.add_version(StructureEntityVersion::class("Foo"));
    assert!(!history.has_changes());
    assert_eq!(history.significance_level(), 0);
    assert!(history.method_history("m()").is_none());
}
