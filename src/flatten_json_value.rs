#![allow(clippy::unit_arg)]
use {
    itertools::Itertools,
    std::borrow::Cow,
    tap::{Pipe, Tap},
};

/// Default separator for joining path segments into column names.
pub const DEFAULT_SEPARATOR: char = '_';
/// Separator used by the normalize policy (dotted-path columns).
pub const NORMALIZE_SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment<'a> {
    Idx(usize),
    Field(Cow<'a, str>),
}

impl std::fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Idx(idx) => write!(f, "{idx}"),
            Segment::Field(field) => f.write_str(field),
        }
    }
}

impl Segment<'_> {
    pub fn to_owned(&self) -> Segment<'static> {
        match self {
            Segment::Idx(idx) => Segment::Idx(*idx),
            Segment::Field(field) => field
                .to_string()
                .pipe(Cow::<str>::Owned)
                .pipe(Segment::Field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath<'a>(Vec<Segment<'a>>);

impl<'a> FieldPath<'a> {
    pub fn join(&self, segment: Segment<'a>) -> Self {
        self.clone().tap_mut(|path| path.0.push(segment))
    }
    pub fn to_owned(&self) -> FieldPath<'static> {
        self.0
            .iter()
            .map(Segment::to_owned)
            .collect::<Vec<_>>()
            .pipe(FieldPath)
    }
    /// Renders the path as a flat column name. The empty path renders as the
    /// empty string (bare scalar at the document root).
    pub fn render(&self, separator: char) -> String {
        self.0.iter().join(separator.to_string().as_str())
    }
}

pub fn boxed_iter<'a, T, I>(iter: I) -> Box<dyn Iterator<Item = T> + 'a>
where
    T: 'a,
    I: Iterator<Item = T> + 'a,
{
    Box::new(iter)
}

pub mod flatten;
