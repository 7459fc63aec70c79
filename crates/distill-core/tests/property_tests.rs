use std::sync::Arc;

use proptest::prelude::*;

use distill_core::{
    ChangeClassifier, EntityType, SourceCodeEntity, SourceRange, StructureEntityVersion, TreeEditOperation,
};

fn entity(name: &str, entity_type: EntityType, start: usize) -> SourceCodeEntity {
    SourceCodeEntity::new(name, entity_type, SourceRange::new(start, start + name.len().max(1)))
}

/// Operations the differencer could emit for one method, with overlapping
/// pairing candidates.
fn pool(root: &Arc<StructureEntityVersion>) -> Vec<TreeEditOperation> {
    let declaration = entity("m()", EntityType::MethodDeclaration, 0);
    let modifiers = entity("", EntityType::Modifiers, 0);
    let parameters = entity("", EntityType::Parameters, 6);
    let a = entity("a", EntityType::Parameter, 7);
    let b = entity("b", EntityType::Parameter, 14);

    vec![
        TreeEditOperation::insert(root, entity("public", EntityType::Modifier, 0), modifiers.clone()),
        TreeEditOperation::delete(root, entity("private", EntityType::Modifier, 0), modifiers.clone()),
        TreeEditOperation::insert(root, entity("final", EntityType::Modifier, 0), modifiers),
        TreeEditOperation::insert(root, entity("String", EntityType::SimpleType, 2), declaration.clone()),
        TreeEditOperation::delete(root, entity("Object", EntityType::SimpleType, 2), declaration.clone()),
        TreeEditOperation::insert(root, entity("void", EntityType::PrimitiveType, 2), declaration.clone()),
        TreeEditOperation::insert(root, b.clone(), parameters.clone()),
        TreeEditOperation::insert(root, entity("int", EntityType::PrimitiveType, 14), b),
        TreeEditOperation::delete(root, a.clone(), parameters.clone()),
        TreeEditOperation::delete(root, entity("int", EntityType::PrimitiveType, 7), a.clone()),
        TreeEditOperation::moved(
            root,
            a.clone(),
            entity("a", EntityType::Parameter, 20),
            parameters.clone(),
            parameters,
        ),
        TreeEditOperation::insert(root, entity("/** New. */", EntityType::Javadoc, 0), declaration.clone()),
        TreeEditOperation::delete(root, entity("/** Old. */", EntityType::Javadoc, 0), declaration.clone()),
        TreeEditOperation::insert(root, entity("a = 1;", EntityType::Assignment, 30), declaration.clone()),
        TreeEditOperation::delete(root, entity("b = 2;", EntityType::Assignment, 40), declaration.clone()),
        TreeEditOperation::moved(
            root,
            entity("c();", EntityType::MethodInvocation, 50),
            entity("c();", EntityType::MethodInvocation, 60),
            declaration.clone(),
            declaration.clone(),
        ),
        TreeEditOperation::update(
            root,
            entity("x > 0", EntityType::IfStatement, 70),
            entity("x >= 0", EntityType::IfStatement, 70),
            declaration,
        ),
    ]
}

proptest! {
    #[test]
    fn classification_is_deterministic(picks in prop::collection::vec(0usize..17, 0..24)) {
        let root = Arc::new(StructureEntityVersion::method("m()"));
        let pool = pool(&root);
        let ops: Vec<TreeEditOperation> = picks.iter().map(|&i| pool[i].clone()).collect();
        let classifier = ChangeClassifier::default();

        let first = classifier.classify(ops.clone());
        let second = classifier.classify(ops);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_is_classified_and_duplicate_free(picks in prop::collection::vec(0usize..17, 0..24)) {
        let root = Arc::new(StructureEntityVersion::method("m()"));
        let pool = pool(&root);
        let ops: Vec<TreeEditOperation> = picks.iter().map(|&i| pool[i].clone()).collect();

        let changes = ChangeClassifier::default().classify(ops);
        prop_assert!(changes.len() <= picks.len());
        for (i, change) in changes.iter().enumerate() {
            prop_assert!(change.is_classified());
            prop_assert!(!changes[i + 1..].contains(change));
        }
    }
}
