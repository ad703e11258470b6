//! Collection naming policy
//!
//! Domain operations accept collections either by name or by Rust type. The
//! [`CollectionNaming`] collaborator turns either form into the canonical
//! collection name sent to the server.

use std::fmt;

/// A collection referenced by name or by document type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionRef {
    /// Explicit collection name, sent verbatim by the default policy.
    Name(String),
    /// Fully qualified Rust type name, as produced by [`std::any::type_name`].
    Type(&'static str),
}

impl CollectionRef {
    /// Reference the collection that stores documents of type `T`.
    pub fn of<T: ?Sized>() -> Self {
        CollectionRef::Type(std::any::type_name::<T>())
    }
}

impl From<&str> for CollectionRef {
    fn from(name: &str) -> Self {
        CollectionRef::Name(name.to_string())
    }
}

impl From<String> for CollectionRef {
    fn from(name: String) -> Self {
        CollectionRef::Name(name)
    }
}

impl From<&String> for CollectionRef {
    fn from(name: &String) -> Self {
        CollectionRef::Name(name.clone())
    }
}

/// Resolves collection references into server-side collection names.
pub trait CollectionNaming: Send + Sync + fmt::Debug {
    /// Resolve a reference into the canonical collection name.
    fn resolve_collection_name(&self, collection: &CollectionRef) -> String;
}

/// Names pass through unchanged; types resolve to their bare type name.
///
/// `my_app::model::Person` becomes `Person`, and generic arguments are
/// dropped (`Edge<Person>` becomes `Edge`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

impl CollectionNaming for DefaultNaming {
    fn resolve_collection_name(&self, collection: &CollectionRef) -> String {
        match collection {
            CollectionRef::Name(name) => name.clone(),
            CollectionRef::Type(type_name) => short_type_name(type_name).to_string(),
        }
    }
}

fn short_type_name(type_name: &str) -> &str {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[allow(dead_code)]
    struct Person;
    #[allow(dead_code)]
    struct Knows<T>(T);

    #[rstest]
    #[case("persons", "persons")]
    #[case("my_app::model::Person", "Person")]
    #[case("Plain", "Plain")]
    #[case("a::Edge<b::Person>", "Edge")]
    fn test_short_type_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(short_type_name(input), expected);
    }

    #[test]
    fn test_default_naming_resolves_names_verbatim() {
        let naming = DefaultNaming;
        assert_eq!(
            naming.resolve_collection_name(&CollectionRef::from("Users")),
            "Users"
        );
    }

    #[test]
    fn test_default_naming_resolves_types() {
        let naming = DefaultNaming;
        assert_eq!(
            naming.resolve_collection_name(&CollectionRef::of::<Person>()),
            "Person"
        );
        assert_eq!(
            naming.resolve_collection_name(&CollectionRef::of::<Knows<Person>>()),
            "Knows"
        );
    }

    #[test]
    fn test_custom_policy() {
        #[derive(Debug)]
        struct Lowercase;

        impl CollectionNaming for Lowercase {
            fn resolve_collection_name(&self, collection: &CollectionRef) -> String {
                DefaultNaming
                    .resolve_collection_name(collection)
                    .to_lowercase()
            }
        }

        assert_eq!(
            Lowercase.resolve_collection_name(&CollectionRef::of::<Person>()),
            "person"
        );
    }
}
