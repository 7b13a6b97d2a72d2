//! Core type definitions shared by every definition kind.

use std::fmt;

/// An enum whose members are written by name in class definition documents.
///
/// Member names are matched exactly and case-sensitively.
pub trait NamedEnum: Sized + Copy + PartialEq + 'static {
    /// Human-readable name of the enum, used in error messages.
    const TYPE_NAME: &'static str;

    /// Every member with the name it is written as.
    const MEMBERS: &'static [(&'static str, Self)];

    /// Parse a member from its exact name.
    fn from_name(name: &str) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .find(|(member, _)| *member == name)
            .map(|(_, value)| *value)
    }

    /// The name this member is written as.
    fn name(self) -> &'static str {
        Self::MEMBERS
            .iter()
            .find(|(_, value)| *value == self)
            .map(|(member, _)| *member)
            .unwrap_or("")
    }

    /// Comma-separated list of valid member names.
    fn member_names() -> String {
        Self::MEMBERS
            .iter()
            .map(|(member, _)| *member)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Read/write rule of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadWriteRule {
    /// Readable and writable at any time.
    #[default]
    ReadWrite,
    /// Never written by the application.
    ReadOnly,
    /// Written but never read back.
    WriteOnly,
    /// Written once, then immutable.
    WriteOnce,
    /// Readable, writable only while the object is new.
    ReadManyWriteNew,
}

impl NamedEnum for ReadWriteRule {
    const TYPE_NAME: &'static str = "read/write rule";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("ReadWrite", ReadWriteRule::ReadWrite),
        ("ReadOnly", ReadWriteRule::ReadOnly),
        ("WriteOnly", ReadWriteRule::WriteOnly),
        ("WriteOnce", ReadWriteRule::WriteOnce),
        ("ReadManyWriteNew", ReadWriteRule::ReadManyWriteNew),
    ];
}

/// What happens to related objects when the owner is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    /// Delete the related objects too.
    DeleteRelated,
    /// Clear the related objects' reference to the owner.
    DereferenceRelated,
    /// Refuse the delete while related objects exist.
    Prevent,
}

impl NamedEnum for DeleteAction {
    const TYPE_NAME: &'static str = "delete action";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("DeleteRelated", DeleteAction::DeleteRelated),
        ("DereferenceRelated", DeleteAction::DereferenceRelated),
        ("Prevent", DeleteAction::Prevent),
    ];
}

/// How an inheritance hierarchy is mapped onto tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InheritanceStrategy {
    /// One table per class, joined on a linking id.
    #[default]
    ClassTableInheritance,
    /// One table for the whole hierarchy, rows told apart by a discriminator.
    SingleTableInheritance,
    /// One table per concrete class holding every inherited column.
    ConcreteTableInheritance,
}

impl NamedEnum for InheritanceStrategy {
    const TYPE_NAME: &'static str = "inheritance strategy";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("ClassTableInheritance", InheritanceStrategy::ClassTableInheritance),
        ("SingleTableInheritance", InheritanceStrategy::SingleTableInheritance),
        (
            "ConcreteTableInheritance",
            InheritanceStrategy::ConcreteTableInheritance,
        ),
    ];
}

/// Strength of the association a relationship models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationshipType {
    /// Independent objects that merely reference each other.
    #[default]
    Association,
    /// The owner groups related objects that can outlive it.
    Aggregation,
    /// The owner's lifetime bounds the related objects.
    Composition,
}

impl NamedEnum for RelationshipType {
    const TYPE_NAME: &'static str = "relationship type";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("Association", RelationshipType::Association),
        ("Aggregation", RelationshipType::Aggregation),
        ("Composition", RelationshipType::Composition),
    ];
}

/// Horizontal alignment of a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Left aligned.
    #[default]
    Left,
    /// Right aligned.
    Right,
    /// Centered.
    Center,
}

impl NamedEnum for Alignment {
    const TYPE_NAME: &'static str = "alignment";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("left", Alignment::Left),
        ("right", Alignment::Right),
        ("center", Alignment::Center),
    ];
}

/// Behaviour of a grid filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Filter the rows already loaded.
    #[default]
    Filter,
    /// Issue a new search for matching rows.
    Search,
}

impl NamedEnum for FilterMode {
    const TYPE_NAME: &'static str = "filter mode";
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("Filter", FilterMode::Filter),
        ("Search", FilterMode::Search),
    ];
}

/// Declared value type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropType {
    /// UTF-8 string.
    String,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Fixed-precision decimal.
    Decimal,
    /// 64-bit floating point.
    Double,
    /// Boolean value.
    Boolean,
    /// Date and time.
    DateTime,
    /// Globally unique identifier.
    Guid,
    /// Binary data.
    ByteArray,
    /// Application-defined type from another module.
    Custom {
        /// Module or assembly declaring the type.
        assembly: String,
        /// Type name within that module.
        type_name: String,
    },
}

/// Module name under which the built-in property types live.
pub const SYSTEM_ASSEMBLY: &str = "System";

const BUILTIN_TYPES: &[(&str, PropType)] = &[
    ("String", PropType::String),
    ("Int32", PropType::Int32),
    ("Int64", PropType::Int64),
    ("Decimal", PropType::Decimal),
    ("Double", PropType::Double),
    ("Boolean", PropType::Boolean),
    ("DateTime", PropType::DateTime),
    ("Guid", PropType::Guid),
    ("ByteArray", PropType::ByteArray),
];

impl PropType {
    /// Resolve a declared type name.
    ///
    /// Names in the system module may be written with or without the
    /// `System.` prefix. Any other module yields a custom type.
    pub fn resolve(type_name: &str, assembly: Option<&str>) -> Option<Self> {
        match assembly {
            None | Some(SYSTEM_ASSEMBLY) => {
                let short = type_name
                    .strip_prefix("System.")
                    .unwrap_or(type_name);
                BUILTIN_TYPES
                    .iter()
                    .find(|(name, _)| *name == short)
                    .map(|(_, ty)| ty.clone())
            }
            Some(assembly) => Some(PropType::Custom {
                assembly: assembly.to_string(),
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Comma-separated list of built-in type names.
    pub fn builtin_names() -> String {
        BUILTIN_TYPES
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check if this type is an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, PropType::Int32 | PropType::Int64)
    }

    /// Check if this type is a non-integer numeric type.
    pub fn is_fractional(&self) -> bool {
        matches!(self, PropType::Decimal | PropType::Double)
    }

    /// Check if this type is the identifier type.
    pub fn is_identifier(&self) -> bool {
        matches!(self, PropType::Guid)
    }

    /// Check if this type is a string type.
    pub fn is_string(&self) -> bool {
        matches!(self, PropType::String)
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropType::Custom {
                assembly,
                type_name,
            } => write!(f, "{}.{}", assembly, type_name),
            builtin => {
                let name = BUILTIN_TYPES
                    .iter()
                    .find(|(_, ty)| ty == builtin)
                    .map(|(name, _)| *name)
                    .unwrap_or("?");
                write!(f, "{}", name)
            }
        }
    }
}

/// Qualified class name: module/assembly plus class name.
///
/// Unique within a [`ClassDefCollection`](crate::def::ClassDefCollection).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    /// Module or assembly declaring the class.
    pub assembly: String,
    /// Class name within the module.
    pub class_name: String,
}

impl ClassName {
    /// Create a qualified class name.
    pub fn new(assembly: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            assembly: assembly.into(),
            class_name: class_name.into(),
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.assembly, self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_enum_exact_match() {
        assert_eq!(
            ReadWriteRule::from_name("WriteOnce"),
            Some(ReadWriteRule::WriteOnce)
        );
        assert_eq!(ReadWriteRule::from_name("writeonce"), None);
        assert_eq!(DeleteAction::Prevent.name(), "Prevent");
        assert_eq!(Alignment::from_name("center"), Some(Alignment::Center));
        assert_eq!(Alignment::from_name("Center"), None);
    }

    #[test]
    fn test_member_names() {
        assert_eq!(
            DeleteAction::member_names(),
            "DeleteRelated, DereferenceRelated, Prevent"
        );
        assert_eq!(FilterMode::member_names(), "Filter, Search");
    }

    #[test]
    fn test_prop_type_resolution() {
        assert_eq!(PropType::resolve("Guid", None), Some(PropType::Guid));
        assert_eq!(
            PropType::resolve("System.Int32", Some("System")),
            Some(PropType::Int32)
        );
        assert_eq!(PropType::resolve("Money", None), None);
        assert_eq!(
            PropType::resolve("Money", Some("Shop.Types")),
            Some(PropType::Custom {
                assembly: "Shop.Types".into(),
                type_name: "Money".into(),
            })
        );
    }

    #[test]
    fn test_prop_type_checks() {
        assert!(PropType::Int64.is_integer());
        assert!(!PropType::Decimal.is_integer());
        assert!(PropType::Double.is_fractional());
        assert!(PropType::Guid.is_identifier());
        assert!(PropType::String.is_string());
        assert_eq!(PropType::DateTime.to_string(), "DateTime");
    }

    #[test]
    fn test_class_name_display() {
        let name = ClassName::new("Shop", "Invoice");
        assert_eq!(name.to_string(), "Shop.Invoice");
    }
}
