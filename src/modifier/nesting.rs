//! The nesting rule table
//!
//! Precedence is fixed: `assert` above `not`/`maybe` above the `.of`
//! families above the leaf. A position only ever exposes modifiers strictly
//! below it, so no modifier exposes itself and the surface is finite.
//!
//! ```rust
//! use stillwater_check::modifier::nesting::{exposes, Position};
//! use stillwater_check::modifier::{Container, Modifier};
//!
//! assert!(exposes(Position::Assert, Modifier::Not));
//! assert!(exposes(Position::Maybe, Modifier::Of(Container::Array)));
//! assert!(!exposes(Position::Not, Modifier::Maybe));
//! assert!(!exposes(Position::Assert, Modifier::Assert));
//! ```

use super::{Container, Modifier};
use crate::error::CheckError;
use crate::predicate::Name;

/// Where in a path a namespace sits: the bare registry or below a modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// The bare registry.
    Root,
    /// Below `assert`.
    Assert,
    /// Below `not`.
    Not,
    /// Below `maybe`.
    Maybe,
    /// Below any `.of`.
    Of,
}

impl Position {
    /// The position reached after `last`, the root when the path is empty.
    pub fn after(last: Option<&Modifier>) -> Self {
        match last {
            None => Position::Root,
            Some(Modifier::Assert) => Position::Assert,
            Some(Modifier::Not) => Position::Not,
            Some(Modifier::Maybe) => Position::Maybe,
            Some(Modifier::Of(_)) => Position::Of,
        }
    }
}

const OF: [Modifier; 4] = [
    Modifier::Of(Container::Array),
    Modifier::Of(Container::ArrayLike),
    Modifier::Of(Container::Iterable),
    Modifier::Of(Container::Object),
];

/// Modifiers each position exposes, in surface order.
pub static NESTING: &[(Position, &[Modifier])] = &[
    (
        Position::Root,
        &[
            Modifier::Assert,
            Modifier::Not,
            Modifier::Maybe,
            OF[0],
            OF[1],
            OF[2],
            OF[3],
        ],
    ),
    (
        Position::Assert,
        &[Modifier::Not, Modifier::Maybe, OF[0], OF[1], OF[2], OF[3]],
    ),
    (Position::Not, &OF),
    (Position::Maybe, &OF),
    (Position::Of, &[]),
];

/// The modifiers `position` exposes.
pub fn children(position: Position) -> &'static [Modifier] {
    NESTING
        .iter()
        .find(|(p, _)| *p == position)
        .map_or(&[], |(_, children)| *children)
}

/// Whether `inner` may directly follow `outer`.
pub fn exposes(outer: Position, inner: Modifier) -> bool {
    children(outer).contains(&inner)
}

/// Whether every step of `path` is exposed by the step before it.
pub fn is_legal(path: &[Modifier]) -> bool {
    let mut position = Position::Root;
    for modifier in path {
        if !exposes(position, *modifier) {
            return false;
        }
        position = Position::after(Some(modifier));
    }
    true
}

/// Every legal path, outermost modifier first, starting with the empty path
/// of the bare registry.
pub fn legal_paths() -> Vec<Vec<Modifier>> {
    fn walk(path: Vec<Modifier>, out: &mut Vec<Vec<Modifier>>) {
        let position = Position::after(path.last());
        out.push(path.clone());
        for modifier in children(position) {
            let mut next = path.clone();
            next.push(*modifier);
            walk(next, out);
        }
    }

    let mut out = Vec::new();
    walk(Vec::new(), &mut out);
    out
}

/// Parse a dotted path such as `assert.not.array.of.even`.
///
/// Fails with [`CheckError::UnknownPredicate`] when the leaf is unknown or
/// the combination is not part of the surface.
pub fn parse(dotted: &str) -> Result<(Vec<Modifier>, Name), CheckError> {
    let unknown = || CheckError::UnknownPredicate(dotted.to_string());
    let segments: Vec<&str> = dotted.split('.').collect();
    let (leaf, prefix) = segments.split_last().ok_or_else(unknown)?;

    let mut path = Vec::new();
    let mut rest = prefix;
    while let Some((head, tail)) = rest.split_first() {
        if let Some(modifier) = Modifier::from_name(head) {
            path.push(modifier);
            rest = tail;
            continue;
        }
        match (Container::from_name(head), tail.split_first()) {
            (Some(container), Some((&"of", tail))) => {
                path.push(Modifier::Of(container));
                rest = tail;
            }
            _ => return Err(unknown()),
        }
    }

    let name = leaf.parse::<Name>().map_err(|_| unknown())?;
    if is_legal(&path) {
        Ok((path, name))
    } else {
        Err(unknown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_modifier_exposes_itself() {
        for modifier in [Modifier::Not, Modifier::Maybe, Modifier::Assert] {
            let position = Position::after(Some(&modifier));
            assert!(!exposes(position, modifier), "{} exposes itself", modifier);
        }
        for of in OF {
            assert!(!exposes(Position::Of, of));
        }
    }

    #[test]
    fn not_and_maybe_expose_only_containers() {
        for position in [Position::Not, Position::Maybe] {
            assert!(!exposes(position, Modifier::Not));
            assert!(!exposes(position, Modifier::Maybe));
            assert!(!exposes(position, Modifier::Assert));
            assert!(OF.iter().all(|of| exposes(position, *of)));
        }
    }

    #[test]
    fn assert_is_only_outermost() {
        for position in [Position::Assert, Position::Not, Position::Maybe, Position::Of] {
            assert!(!exposes(position, Modifier::Assert));
        }
        assert!(exposes(Position::Root, Modifier::Assert));
    }

    #[test]
    fn legal_path_count() {
        let paths = legal_paths();
        assert_eq!(paths.len(), 30);
        assert!(paths[0].is_empty());
        assert!(paths.iter().all(|p| is_legal(p)));
    }

    #[test]
    fn illegal_paths() {
        assert!(!is_legal(&[Modifier::Not, Modifier::Not]));
        assert!(!is_legal(&[Modifier::Maybe, Modifier::Not]));
        assert!(!is_legal(&[Modifier::Not, Modifier::Assert]));
        assert!(!is_legal(&[Modifier::Assert, Modifier::Assert]));
        assert!(!is_legal(&[OF[0], OF[1]]));
        assert!(!is_legal(&[OF[0], Modifier::Not]));
    }

    #[test]
    fn parse_dotted_paths() {
        assert_eq!(
            parse("assert.not.array.of.even").unwrap(),
            (
                vec![Modifier::Assert, Modifier::Not, Modifier::Of(Container::Array)],
                Name::Even
            )
        );
        assert_eq!(parse("array").unwrap(), (vec![], Name::Array));
        assert_eq!(
            parse("maybe.arrayLike.of.in").unwrap(),
            (vec![Modifier::Maybe, Modifier::Of(Container::ArrayLike)], Name::In)
        );
    }

    #[test]
    fn parse_rejects_what_the_surface_lacks() {
        for dotted in [
            "not.not.even",
            "maybe.assert.even",
            "array.of.array.of.even",
            "array.even",
            "assert.map",
            "nope",
            "",
        ] {
            assert_eq!(
                parse(dotted),
                Err(CheckError::UnknownPredicate(dotted.to_string())),
                "{}",
                dotted
            );
        }
    }
}
