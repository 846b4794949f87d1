/// Where an extraction ends.
#[derive(Debug, Clone, Copy)]
pub enum Stop<'a> {
    One(&'a str),
    /// Terminates on the nearest candidate found after the origin.
    AnyOf(&'a [&'a str]),
}

/// Length of the extraction relative to the origin.
#[derive(Debug, PartialEq)]
enum Extent {
    /// No stop marker occurs after the origin.
    Unbounded,
    Bounded(usize),
    /// Stop marker(s) only found right at the origin.
    Empty,
}

/// Returns the trimmed text between the first occurrence of `start` and the
/// nearest `stop` marker after it.
///
/// - `start` absent: `""`.
/// - no stop marker after `start`: the trimmed rest of `text`.
/// - a stop marker directly adjacent to the origin counts as empty for
///   `Stop::One` and is ignored for `Stop::AnyOf`; if every candidate that
///   occurs is adjacent, the result is `""`.
///
/// With `start_inclusive` the returned value begins with `start` itself.
pub fn extract_between<'a>(
    text: &'a str,
    start: &str,
    stop: Stop,
    start_inclusive: bool,
) -> &'a str {
    let Some(start_pos) = text.find(start) else {
        return "";
    };
    let origin = if start_inclusive {
        start_pos
    } else {
        start_pos + start.len()
    };
    let rest = &text[origin..];
    match extent(rest, stop) {
        Extent::Unbounded => rest.trim(),
        Extent::Bounded(len) => rest[..len].trim(),
        Extent::Empty => "",
    }
}

fn extent(rest: &str, stop: Stop) -> Extent {
    match stop {
        Stop::One(marker) => match rest.find(marker) {
            None => Extent::Unbounded,
            Some(0) => Extent::Empty,
            Some(len) => Extent::Bounded(len),
        },
        Stop::AnyOf(markers) => {
            let offsets: Vec<usize> =
                markers.iter().filter_map(|m| rest.find(m)).collect();
            if offsets.is_empty() {
                return Extent::Unbounded;
            }
            // XXX Offset 0 is dropped rather than treated as an empty match.
            match offsets.into_iter().filter(|&o| o > 0).min() {
                Some(len) => Extent::Bounded(len),
                None => Extent::Empty,
            }
        }
    }
}
