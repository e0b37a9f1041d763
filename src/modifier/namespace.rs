//! Namespaces: one derived entry per leaf for a single modifier path

use super::nesting::{self, Position};
use super::{Container, Modifier};
use crate::predicate::{Leaf, Name, Registry};
use std::ops::Index;
use std::sync::Arc;

/// The entries reached through one modifier path, plus the namespaces
/// nested below it.
///
/// Keys are the leaf names and the nested `not` / `maybe` namespaces. The
/// `.of` namespaces hang off their container predicate (`array`,
/// `arrayLike`, ...) and add no keys of their own.
///
/// # Example
///
/// ```rust
/// use stillwater_check::{check, Container, Name, Value};
///
/// let maybe = check().maybe();
/// assert_eq!(maybe.len(), 48);
/// assert!(maybe.not().is_none());
///
/// let of = maybe.of(Container::Array).unwrap();
/// assert!(of[Name::Even].test(&Value::array(vec![2.into(), Value::Null]), &[]));
/// ```
#[derive(Clone, Debug)]
pub struct Namespace<P> {
    path: Vec<Modifier>,
    entries: Vec<(Name, P)>,
    modifiers: Vec<(Modifier, Arc<Namespace<P>>)>,
    containers: Vec<(Container, Arc<Namespace<P>>)>,
}

impl<P> Namespace<P> {
    /// Build the namespace at `path` and, recursively, every namespace the
    /// nesting table exposes below it.
    ///
    /// `make` derives one entry from a leaf and the full path. `assert` is
    /// never nested: it changes the entry type and is built separately.
    pub fn build<F>(registry: &Registry, path: &[Modifier], make: &F) -> Self
    where
        F: Fn(&'static Leaf, &[Modifier]) -> P,
    {
        let entries = registry
            .iter()
            .map(|leaf| (leaf.name(), make(leaf, path)))
            .collect();

        let mut modifiers = Vec::new();
        let mut containers = Vec::new();
        for modifier in nesting::children(Position::after(path.last())) {
            let mut nested = path.to_vec();
            nested.push(*modifier);
            match *modifier {
                Modifier::Not | Modifier::Maybe => {
                    modifiers.push((*modifier, Arc::new(Self::build(registry, &nested, make))));
                }
                Modifier::Of(container) => {
                    containers.push((container, Arc::new(Self::build(registry, &nested, make))));
                }
                Modifier::Assert => {}
            }
        }

        Namespace {
            path: path.to_vec(),
            entries,
            modifiers,
            containers,
        }
    }

    /// The modifier path leading here.
    pub fn path(&self) -> &[Modifier] {
        &self.path
    }

    /// The entry for `name`.
    pub fn get(&self, name: Name) -> Option<&P> {
        self.entries
            .iter()
            .find_map(|(n, entry)| (*n == name).then_some(entry))
    }

    /// The entry whose public name is `name`.
    pub fn entry(&self, name: &str) -> Option<&P> {
        name.parse().ok().and_then(|name| self.get(name))
    }

    /// Entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &P)> {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }

    /// Every key: leaf names, then nested modifier names.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(self.modifiers.iter().map(|(modifier, _)| match modifier {
                Modifier::Maybe => "maybe",
                _ => "not",
            }))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len() + self.modifiers.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is a leaf name or a nested modifier here.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }

    /// The nested `not` namespace, if this position exposes one.
    pub fn not(&self) -> Option<&Namespace<P>> {
        self.nested(Modifier::Not).map(Arc::as_ref)
    }

    /// The nested `maybe` namespace, if this position exposes one.
    pub fn maybe(&self) -> Option<&Namespace<P>> {
        self.nested(Modifier::Maybe).map(Arc::as_ref)
    }

    /// The nested `not` or `maybe` namespace by name.
    pub fn modifier(&self, name: &str) -> Option<&Namespace<P>> {
        match Modifier::from_name(name)? {
            modifier @ (Modifier::Not | Modifier::Maybe) => {
                self.nested(modifier).map(Arc::as_ref)
            }
            _ => None,
        }
    }

    /// The `<container>.of` namespace, if this position exposes one.
    pub fn of(&self, container: Container) -> Option<&Namespace<P>> {
        self.of_shared(container).map(Arc::as_ref)
    }

    pub(crate) fn nested(&self, modifier: Modifier) -> Option<&Arc<Namespace<P>>> {
        self.modifiers
            .iter()
            .find_map(|(m, ns)| (*m == modifier).then_some(ns))
    }

    pub(crate) fn of_shared(&self, container: Container) -> Option<&Arc<Namespace<P>>> {
        self.containers
            .iter()
            .find_map(|(c, ns)| (*c == container).then_some(ns))
    }

    /// Follow a path below this namespace.
    pub(crate) fn descend(&self, path: &[Modifier]) -> Option<&Namespace<P>> {
        path.iter().try_fold(self, |ns, modifier| match modifier {
            Modifier::Of(container) => ns.of(*container),
            other => ns.nested(*other).map(Arc::as_ref),
        })
    }

    /// Number of entries in this namespace and every namespace below it.
    pub(crate) fn total_entries(&self) -> usize {
        let nested = self.modifiers.iter().map(|(_, ns)| ns);
        let containers = self.containers.iter().map(|(_, ns)| ns);
        self.entries.len()
            + nested
                .chain(containers)
                .map(|ns| ns.total_entries())
                .sum::<usize>()
    }
}

impl<P> Index<Name> for Namespace<P> {
    type Output = P;

    fn index(&self, name: Name) -> &P {
        match self.get(name) {
            Some(entry) => entry,
            None => panic!("no `{}` entry in this namespace", name),
        }
    }
}
