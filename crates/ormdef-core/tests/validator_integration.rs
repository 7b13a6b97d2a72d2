//! Integration tests for the standalone validator.

use ormdef_core::def::{
    ClassDef, ClassId, DeleteAction, KeyOwnership, PropId, PropRef, RelKeyDef, RelPropDef,
    RelationshipDef, RelationshipKind, RelationshipType, UiDefCollection,
};
use ormdef_core::{
    load_class_defs, ClassDefCollection, ClassDefValidator, ClassName, PropDef,
    PropDefCollection, PropType, ValidationResult,
};
use pretty_assertions::assert_eq;

const SHOP: &str = r#"<classes>
  <class name="Invoice" assembly="Shop">
    <property name="InvoiceID" type="Guid" />
    <property name="CustomerID" type="Guid" />
    <primaryKey><prop name="InvoiceID" /></primaryKey>
    <relationship name="Customer" type="single" relatedClass="Customer" reverseRelationship="Invoices">
      <relatedProperty property="CustomerID" relatedProperty="CustomerID" />
    </relationship>
  </class>
  <class name="Customer" assembly="Shop">
    <property name="CustomerID" type="Guid" />
    <primaryKey><prop name="CustomerID" /></primaryKey>
    <relationship name="Invoices" type="multiple" relatedClass="Invoice" reverseRelationship="Customer">
      <relatedProperty property="CustomerID" relatedProperty="CustomerID" />
    </relationship>
  </class>
</classes>"#;

#[test]
fn test_loaded_collection_is_valid() {
    let classes = load_class_defs(SHOP).unwrap();
    let result = ClassDefValidator::new(&classes).validate();
    assert_eq!(result, ValidationResult::valid());
}

#[test]
fn test_detects_broken_mirror_after_edit() {
    let mut classes = load_class_defs(SHOP).unwrap();
    let customer = classes.id_of(&ClassName::new("Shop", "Customer")).unwrap();
    let class = classes.by_id_mut(customer).unwrap();
    class.relationships[0].rel_key.rel_props[0].related_prop = "InvoiceID".into();

    let result = ClassDefValidator::new(&classes).validate();
    assert!(!result.is_valid());
    let message = result.message.unwrap();
    assert!(message.contains("'Customer'"), "{}", message);
    assert!(message.contains("'Invoices'"), "{}", message);
}

#[test]
fn test_detects_dual_ownership_after_edit() {
    let mut classes = load_class_defs(SHOP).unwrap();
    let customer = classes.id_of(&ClassName::new("Shop", "Customer")).unwrap();
    let class = classes.by_id_mut(customer).unwrap();
    class.relationships[0].kind = RelationshipKind::Single;
    class.relationships[0].ownership = KeyOwnership::ForeignKey;

    let err = ClassDefValidator::new(&classes).check().unwrap_err();
    assert!(err.is_semantic());
    assert!(err.message().contains("foreign key"));
}

fn guid_props(names: &[&str]) -> PropDefCollection {
    let mut props = PropDefCollection::new();
    for name in names {
        props.add(PropDef::new(*name, PropType::Guid)).unwrap();
    }
    props
}

fn class(name: &str, props: PropDefCollection, relationships: Vec<RelationshipDef>) -> ClassDef {
    ClassDef {
        id: ClassId(0),
        name: ClassName::new("Manual", name),
        table_name: None,
        display_name: None,
        type_parameter: None,
        super_class: None,
        super_class_id: None,
        props,
        keys: Vec::new(),
        primary_key: None,
        relationships,
        ui_defs: UiDefCollection::new(),
    }
}

fn single(name: &str, related: &str, own: &str, other: &str) -> RelationshipDef {
    RelationshipDef {
        name: name.into(),
        related_class: ClassName::new("Manual", related),
        related_class_id: ClassId(usize::MAX),
        kind: RelationshipKind::Single,
        rel_key: RelKeyDef {
            rel_props: vec![RelPropDef {
                own_prop: own.into(),
                related_prop: other.into(),
                own_ref: PropRef::new(ClassId(0), PropId(0)),
                related_ref: PropRef::new(ClassId(0), PropId(0)),
            }],
        },
        keep_reference: true,
        delete_action: DeleteAction::DereferenceRelated,
        reverse_name: None,
        ownership: KeyOwnership::ForeignKey,
        relationship_type: RelationshipType::Association,
    }
}

#[test]
fn test_hand_built_collection_resolves_by_name() {
    let mut classes = ClassDefCollection::new();
    classes
        .insert(class(
            "Book",
            guid_props(&["BookID", "AuthorID"]),
            vec![single("Author", "Author", "AuthorID", "AuthorID")],
        ))
        .unwrap();
    classes
        .insert(class("Author", guid_props(&["AuthorID"]), Vec::new()))
        .unwrap();

    assert!(ClassDefValidator::new(&classes).validate().is_valid());
}

#[test]
fn test_hand_built_collection_missing_related_property() {
    let mut classes = ClassDefCollection::new();
    classes
        .insert(class(
            "Book",
            guid_props(&["BookID", "AuthorID"]),
            vec![single("Author", "Author", "AuthorID", "WriterID")],
        ))
        .unwrap();
    classes
        .insert(class("Author", guid_props(&["AuthorID"]), Vec::new()))
        .unwrap();

    let result = ClassDefValidator::new(&classes).validate();
    assert!(!result.valid);
    let message = result.message.unwrap();
    assert!(message.contains("'WriterID'"), "{}", message);
    assert!(message.contains("Manual.Author"), "{}", message);
}

#[test]
fn test_hand_built_collection_missing_class() {
    let mut classes = ClassDefCollection::new();
    classes
        .insert(class(
            "Book",
            guid_props(&["BookID", "AuthorID"]),
            vec![single("Author", "Writer", "AuthorID", "AuthorID")],
        ))
        .unwrap();

    let err = ClassDefValidator::new(&classes).check().unwrap_err();
    assert!(err.is_semantic());
    assert!(err.message().contains("Manual.Writer"));
}

#[test]
fn test_hand_built_collection_superclass_handle_out_of_range() {
    let mut book = class(
        "Book",
        guid_props(&["BookID", "AuthorID"]),
        vec![single("Author", "Author", "AuthorID", "AuthorID")],
    );
    book.super_class_id = Some(ClassId(7));

    let mut classes = ClassDefCollection::new();
    classes.insert(book).unwrap();
    classes
        .insert(class("Author", guid_props(&["AuthorID"]), Vec::new()))
        .unwrap();

    let result = ClassDefValidator::new(&classes).validate();
    assert!(!result.valid);
    let message = result.message.unwrap();
    assert!(message.contains("Manual.Book"), "{}", message);
    assert!(message.contains("handle 7"), "{}", message);
    assert_eq!(classes.parent_of(ClassId(0)), None);
}
