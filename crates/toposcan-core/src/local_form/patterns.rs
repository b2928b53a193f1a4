//! Curve patterns for side-link tags.

/// One construction step of a local form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A curve glued to the tip.
    Curve(i64),
    /// A curve glued to the tip with a second curve hanging off it.
    Branched(i64, i64),
    /// An interior link with arm lengths and branch flag.
    Link(u32, u32, u32),
}

use Step::{Branched as B, Curve as C};

/// Instanton tags `88k`: `k-1` curves of `-2` closed by a `-1`.
const INSTANTON_TAGS: &[(i32, usize)] = &[
    (1, 1),
    (882, 2),
    (883, 3),
    (884, 4),
    (885, 5),
    (886, 6),
    (887, 7),
    (8881, 8),
    (889, 9),
    (8810, 10),
    (8811, 11),
];

/// Reversed instanton tags `k88`: a `-1` followed by `k-1` curves of `-2`.
const REVERSED_INSTANTON_TAGS: &[(i32, usize)] = &[
    (288, 2),
    (388, 3),
    (488, 4),
    (588, 5),
    (688, 6),
    (788, 7),
    (1888, 8),
    (988, 9),
    (1088, 10),
    (1188, 11),
];

/// Interior-link shapes that may also hang off a node as side links.
const LINK_TAGS: &[(i32, Step)] = &[
    (11, Step::Link(1, 1, 0)),
    (22, Step::Link(2, 2, 0)),
    (33, Step::Link(3, 3, 0)),
    (44, Step::Link(4, 4, 0)),
    (55, Step::Link(5, 5, 0)),
    (331, Step::Link(3, 3, 1)),
    (32, Step::Link(3, 2, 0)),
    (23, Step::Link(2, 3, 0)),
    (42, Step::Link(4, 2, 0)),
    (24, Step::Link(2, 4, 0)),
    (43, Step::Link(4, 3, 0)),
    (34, Step::Link(3, 4, 0)),
    (53, Step::Link(5, 3, 0)),
    (35, Step::Link(3, 5, 0)),
    (54, Step::Link(5, 4, 0)),
    (45, Step::Link(4, 5, 0)),
];

/// Alkali side links, with and without `-5` curves.
const ALKALI_TAGS: &[(i32, &[Step])] = &[
    // two links, no -5
    (991, &[C(-2), B(-1, -3), C(-1)]),
    (9920, &[C(-1), C(-2), B(-2, -3), C(-1)]),
    (9902, &[C(-1), B(-2, -3), C(-2), C(-1)]),
    (993, &[C(-2), B(-1, -3), C(-2), C(-1)]),
    // one link, no -5
    (91, &[C(-3), B(-2, -2), C(-1)]),
    (92, &[C(-2), B(-2, -3), C(-1)]),
    (93, &[C(-3), C(-2), C(-2), C(-1)]),
    (94, &[C(-2), C(-3), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (95, &[C(-2), C(-2), C(-3), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (96, &[C(-3), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (97, &[C(-3), C(-2), C(-1)]),
    (98, &[C(-2), C(-3), C(-2), C(-1)]),
    (99, &[C(-2), C(-3), C(-1), C(-3), C(-2), C(-1)]),
    (910, &[C(-2), C(-2), C(-3), C(-1), C(-3), C(-2), C(-1)]),
    (911, &[C(-3), C(-1), C(-3), C(-2), C(-1)]),
    (912, &[C(-3), C(-1)]),
    (913, &[C(-2), C(-3), C(-1), C(-3), C(-1)]),
    (914, &[C(-2), C(-2), C(-3), C(-1), C(-3), C(-1)]),
    (915, &[C(-3), C(-1), C(-3), C(-1)]),
    (916, &[C(-2), C(-3), C(-1)]),
    (917, &[C(-2), C(-2), C(-3), C(-1)]),
    // three links, one -5
    (99910, &[C(-1), B(-1, -5), C(-1), C(-3), C(-1)]),
    (99901, &[C(-1), C(-3), C(-1), B(-1, -5), C(-1)]),
    (99920, &[C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-1)]),
    (99902, &[C(-1), C(-2), C(-3), C(-1), B(-1, -5), C(-1)]),
    (99930, &[C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (99903, &[C(-1), C(-2), C(-2), C(-3), C(-1), B(-1, -5), C(-1)]),
    // two links, one -5
    (994, &[C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-1)]),
    (995, &[C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-1)]),
    (996, &[C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (997, &[C(-2), C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-1)]),
    (998, &[C(-2), C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (999, &[C(-2), C(-2), C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (9910, &[C(-2), C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-1)]),
    (9911, &[C(-2), C(-2), C(-3), C(-1), B(-1, -5), C(-1), C(-3), C(-2), C(-1)]),
    (9912, &[C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (9913, &[C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (9914, &[C(-1), C(-5), C(-1), C(-2), C(-3), C(-2), C(-1)]),
    // one link, one -5
    (918, &[C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (919, &[C(-3), C(-2), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (920, &[C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (921, &[C(-2), C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (922, &[C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (923, &[C(-2), C(-3), C(-2), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (924, &[C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (925, &[C(-5), C(-1), C(-2), C(-3), C(-2), C(-1)]),
    (926, &[C(-3), C(-2), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (927, &[C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (928, &[C(-2), C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (929, &[C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (930, &[C(-2), C(-3), C(-2), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (931, &[C(-2), C(-3), C(-1), C(-5), C(-1), C(-2), C(-3), C(-2), C(-1)]),
    (932, &[C(-2), C(-2), C(-3), C(-1), C(-5), C(-1), C(-2), C(-3), C(-2), C(-1)]),
    (933, &[C(-3), C(-1), C(-5), C(-1), C(-2), C(-3), C(-2), C(-1)]),
    (934, &[C(-5), C(-1), C(-3), C(-1)]),
    (935, &[C(-3), C(-2), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (936, &[C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (937, &[C(-2), C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (938, &[C(-3), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (939, &[C(-2), C(-3), C(-2), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (940, &[C(-5), C(-1), C(-2), C(-3), C(-1)]),
    (941, &[C(-1), C(-5), C(-1), C(-2), C(-3), C(-1)]),
    (942, &[C(-5), C(-1), C(-2), C(-2), C(-3), C(-1)]),
    (943, &[C(-2), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (944, &[C(-2), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (945, &[C(-2), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    // two links, two -5
    (9915, &[C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (9916, &[C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (9917, &[C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    // one link, two -5
    (946, &[C(-5), C(-1), C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (947, &[C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (948, &[C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (949, &[C(-2), C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (950, &[C(-3), C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-2), C(-1)]),
    (951, &[C(-5), C(-1), C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (952, &[C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (953, &[C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (954, &[C(-3), C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-2), C(-1)]),
    (955, &[C(-5), C(-1), C(-2), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (956, &[C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1)]),
    (957, &[C(-3), C(-1), C(-5), C(-1), C(-3), C(-1), C(-5), C(-1), C(-3), C(-1)]),
];

/// Returns the construction steps for a side-link tag, if it is known.
pub fn side_pattern(param: i32) -> Option<Vec<Step>> {
    if let Some(&(_, k)) = INSTANTON_TAGS.iter().find(|(tag, _)| *tag == param) {
        let mut steps = vec![C(-2); k - 1];
        steps.push(C(-1));
        return Some(steps);
    }
    if let Some(&(_, k)) = REVERSED_INSTANTON_TAGS.iter().find(|(tag, _)| *tag == param) {
        let mut steps = vec![C(-1)];
        steps.extend(std::iter::repeat(C(-2)).take(k - 1));
        return Some(steps);
    }
    if let Some(&(_, step)) = LINK_TAGS.iter().find(|(tag, _)| *tag == param) {
        return Some(vec![step]);
    }
    ALKALI_TAGS
        .iter()
        .find(|(tag, _)| *tag == param)
        .map(|(_, steps)| steps.to_vec())
}
