//! Boolean template matching.
//!
//! This is the check that runs for every registered route on every request,
//! so it works directly on the raw template and path bytes and never
//! allocates. Extraction of values is a separate, heavier step (see
//! [`CompiledRoute`](crate::CompiledRoute)) that only runs after a match.
//!
//! Template syntax understood here:
//! - `:name` consumes one path segment (possibly empty)
//! - `*` consumes any run of characters, including `/`
//! - anything else must match byte for byte

/// Returns true if `path` matches `template`.
///
/// One trailing `/` is ignored on both sides.
pub fn matches(template: &str, path: &str) -> bool {
    match_stripped(strip_trailing_slash(template), strip_trailing_slash(path))
}

fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

/// Two-cursor matcher with a single remembered splat.
///
/// When a literal fails after a splat has been seen, matching resumes right
/// after the most recent splat with the path start moved one byte further.
/// Earlier splats never need to be revisited: whatever an earlier splat
/// could still absorb, the later one can absorb instead.
fn match_stripped(template: &str, path: &str) -> bool {
    let tpl = template.as_bytes();
    let path = path.as_bytes();

    let mut t = 0;
    let mut p = 0;
    // (template index after the splat, path index the splat resumes from)
    let mut splat: Option<(usize, usize)> = None;

    loop {
        if let Some(&c) = tpl.get(t) {
            match c {
                b'*' => {
                    if t + 1 == tpl.len() {
                        return true;
                    }
                    t += 1;
                    splat = Some((t, p));
                    continue;
                }
                b':' => {
                    t = next_separator(tpl, t);
                    p = next_separator(path, p);
                    continue;
                }
                _ if path.get(p) == Some(&c) => {
                    t += 1;
                    p += 1;
                    continue;
                }
                _ => {}
            }
        } else if p == path.len() {
            return true;
        }

        match splat {
            Some((after, from)) if from < path.len() => {
                splat = Some((after, from + 1));
                t = after;
                p = from + 1;
            }
            _ => return false,
        }
    }
}

fn next_separator(s: &[u8], from: usize) -> usize {
    s[from..]
        .iter()
        .position(|&b| b == b'/')
        .map_or(s.len(), |i| from + i)
}
