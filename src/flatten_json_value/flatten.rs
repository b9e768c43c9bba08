use {
    super::{DEFAULT_SEPARATOR, FieldPath, NORMALIZE_SEPARATOR, Segment, boxed_iter},
    serde_json::{Map, Value},
    std::{borrow::Cow, iter::once},
    tap::Pipe,
};

/// Yields one `(path, value)` pair per leaf of `value`.
///
/// Object values recurse. Array values iterate by index, but only recurse into
/// elements that are themselves objects; scalar elements and nested-array
/// elements land raw under their index segment. A bare scalar yields itself
/// under `prefix` unchanged.
pub fn flattened_iter<'prefix>(prefix: FieldPath<'prefix>, value: Value) -> impl Iterator<Item = (FieldPath<'static>, Value)> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .flat_map({
                let prefix = prefix.clone();
                move |(key, value)| flattened_iter(prefix.join(Segment::Field(Cow::Owned(key))), value)
            })
            .pipe(boxed_iter),
        Value::Array(arr) => arr
            .into_iter()
            .enumerate()
            .flat_map({
                let prefix = prefix.clone();
                move |(idx, element)| match element {
                    element @ Value::Object(_) => {
                        flattened_iter(prefix.join(Segment::Idx(idx)), element).pipe(boxed_iter)
                    }
                    other => once((prefix.join(Segment::Idx(idx)).to_owned(), other)).pipe(boxed_iter),
                }
            })
            .pipe(boxed_iter),
        other => once((prefix.to_owned(), other)).pipe(boxed_iter),
    }
    .pipe(boxed_iter)
}

/// Record expansion for the normalize policy: nested objects become
/// dotted-path columns, arrays stay raw in their cell.
pub fn normalized_iter<'prefix>(prefix: FieldPath<'prefix>, value: Value) -> impl Iterator<Item = (FieldPath<'static>, Value)> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .flat_map({
                let prefix = prefix.clone();
                move |(key, value)| normalized_iter(prefix.join(Segment::Field(Cow::Owned(key))), value)
            })
            .pipe(boxed_iter),
        other => once((prefix.to_owned(), other)).pipe(boxed_iter),
    }
    .pipe(boxed_iter)
}

/// Collects [`flattened_iter`] into a flat record. On a rendered-key collision
/// the later entry overwrites the earlier one.
pub fn flattened_with_separator(value: Value, separator: char) -> Map<String, Value> {
    flattened_iter(Default::default(), value)
        .map(|(path, value)| (path.render(separator), value))
        .collect()
}

pub fn flattened(value: Value) -> Map<String, Value> {
    flattened_with_separator(value, DEFAULT_SEPARATOR)
}

pub fn normalized(value: Value) -> Map<String, Value> {
    normalized_iter(Default::default(), value)
        .map(|(path, value)| (path.render(NORMALIZE_SEPARATOR), value))
        .collect()
}
