use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use apigen_core::ir::NamedType;

use crate::type_mapper::type_to_go;
use crate::writer::SourceWriter;

/// A named type compared by allocation rather than by value.
#[derive(Clone)]
struct ByIdentity(Arc<NamedType>);

impl PartialEq for ByIdentity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ByIdentity {}

impl Hash for ByIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

/// Emits `type` declarations, each named type at most once per run.
///
/// Holding the visited types keeps their allocations alive, so identities stay unique
/// for the whole run.
#[derive(Default)]
pub struct TypeDeclarations {
    visited: HashSet<ByIdentity>,
    declared_names: HashMap<String, usize>,
}

impl TypeDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `named` and, depth first, every named type it depends on.
    ///
    /// Types owned by another module and types already declared are skipped.
    pub fn declare<W: fmt::Write>(&mut self, w: &mut SourceWriter<W>, named: &Arc<NamedType>) {
        if named.is_external() {
            return;
        }
        if !self.visited.insert(ByIdentity(Arc::clone(named))) {
            return;
        }

        let count = self.declared_names.entry(named.name.clone()).or_default();
        *count += 1;
        if *count > 1 {
            log::warn!(
                "type {} is declared {} times; the generated source will not compile",
                named.name,
                count
            );
        }

        writeln!(w, "type {} {}", named.name, type_to_go(&named.underlying));
        w.blank();

        for dep in named.underlying.dependencies() {
            self.declare(w, &dep);
        }
    }

    #[cfg(test)]
    fn is_declared(&self, named: &Arc<NamedType>) -> bool {
        self.visited.contains(&ByIdentity(Arc::clone(named)))
    }
}

#[cfg(test)]
mod tests {
    use apigen_core::ir::{Field, Record, Type};

    use super::*;

    fn record_of(fields: Vec<Field>) -> Type {
        Type::Record(Record::sorted(fields))
    }

    #[test]
    fn test_declares_dependencies_depth_first() {
        let owner = Arc::new(
            NamedType::new("Owner", record_of(vec![Field::new("Login", "login", Type::String)]))
                .nullable(),
        );
        let pet = Arc::new(
            NamedType::new(
                "Pet",
                record_of(vec![Field::new("Owner", "owner", Type::Named(Arc::clone(&owner)))]),
            )
            .nullable(),
        );
        let response = Arc::new(NamedType::new(
            "ListPetsResponse",
            record_of(vec![Field::new("Pets", "pets", Type::list(Type::Named(pet)))]),
        ));

        let mut decls = TypeDeclarations::new();
        let mut w = SourceWriter::new();
        decls.declare(&mut w, &response);
        let text = w.take().unwrap();

        let resp_at = text.find("type ListPetsResponse struct").unwrap();
        let pet_at = text.find("type Pet struct").unwrap();
        let owner_at = text.find("type Owner struct").unwrap();
        assert!(resp_at < pet_at && pet_at < owner_at);
        assert!(text.contains("\tPets []*Pet\n"));
        assert!(text.contains("\tOwner *Owner\n"));
    }

    #[test]
    fn test_shared_type_declared_once() {
        let tag = Arc::new(NamedType::new("Tag", record_of(vec![])).nullable());
        let a = Arc::new(NamedType::new(
            "A",
            record_of(vec![
                Field::new("First", "first", Type::Named(Arc::clone(&tag))),
                Field::new("Second", "second", Type::list(Type::Named(Arc::clone(&tag)))),
            ]),
        ));

        let mut decls = TypeDeclarations::new();
        let mut w = SourceWriter::new();
        decls.declare(&mut w, &a);
        decls.declare(&mut w, &a);
        let text = w.take().unwrap();

        assert_eq!(text.matches("type Tag struct{}").count(), 1);
        assert_eq!(text.matches("type A struct").count(), 1);
        assert!(decls.is_declared(&tag));
    }

    #[test]
    fn test_same_name_distinct_identity() {
        let first = Arc::new(NamedType::new("Item", Type::String));
        let second = Arc::new(NamedType::new("Item", Type::String));

        let mut decls = TypeDeclarations::new();
        let mut w = SourceWriter::new();
        decls.declare(&mut w, &first);
        decls.declare(&mut w, &second);

        assert_eq!(w.take().unwrap().matches("type Item string").count(), 2);
    }

    #[test]
    fn test_external_types_are_skipped() {
        let client = Arc::new(NamedType::external("example.com/client", "Client").nullable());
        let holder = Arc::new(NamedType::new(
            "holder",
            record_of(vec![Field::new("client", "client", Type::Named(Arc::clone(&client)))]),
        ));

        let mut decls = TypeDeclarations::new();
        let mut w = SourceWriter::new();
        decls.declare(&mut w, &holder);
        let text = w.take().unwrap();

        assert_eq!(text, "type holder struct {\n\tclient *client.Client\n}\n\n");
        assert!(!decls.is_declared(&client));
    }
}
