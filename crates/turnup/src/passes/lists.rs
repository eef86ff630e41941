//! List structuring.
//!
//! Loose text marks list items with a wide range of markers: bullets,
//! arabic numbers, parenthesized numbers, letters and roman numerals. Only
//! some of those lines are really list items; `B. Spielberger directed the
//! film.` merely looks like one. The pass scans the whole document first,
//! classifies each marker-shaped line using its surroundings, derives
//! nesting depth from the distinct indentation widths actually present, and
//! then emits `<ul>`/`<ol>` structure in a single forward walk.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([ \t]*)((?:[-*+])|(?:\(\d{1,4}\))|(?:\d{1,4}[.)])|(?:[A-Za-z][.)])|(?:[IVXLCDMivxlcdm]{2,8}[.)]))[ \t]+(\S.*)$",
    )
    .unwrap()
});

static TASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([ xX])\][ \t]+(.*)$").unwrap());

// Initial-plus-surname shapes that disqualify an uppercase letter marker.
static NAME_PAIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+\s+[A-Z]").unwrap());
static LONE_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z]*\.$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Bullet,
    Arabic(u32),
    Parenthesized(u32),
    Letter(char),
    Roman,
}

/// A line whose shape matches the marker grammar. Shape alone does not make
/// it a list item; `accept_candidate` decides that.
#[derive(Debug)]
struct Candidate<'a> {
    indent: usize,
    kind: MarkerKind,
    delimiter: char,
    single: bool,
    content: &'a str,
}

struct ListContext {
    ordered: bool,
    depth: usize,
}

/// Maps indentation widths to nesting depths.
///
/// The distinct widths observed across the document are ranked; rank is
/// depth. A width never observed (possible only for callers outside the
/// normal scan) falls back to the nearest smaller rank plus one depth per
/// four extra columns.
struct DepthMap {
    widths: Vec<usize>,
}

impl DepthMap {
    fn build(candidates: &[Option<Candidate>]) -> Self {
        let mut widths: Vec<usize> = candidates.iter().flatten().map(|c| c.indent).collect();
        widths.sort_unstable();
        widths.dedup();
        Self { widths }
    }

    fn depth_of(&self, width: usize) -> usize {
        match self.widths.binary_search(&width) {
            Ok(rank) => rank,
            Err(0) => 0,
            Err(pos) => (pos - 1) + (width - self.widths[pos - 1]) / 4,
        }
    }
}

/// Rewrite accepted marker lines into nested `<ul>`/`<ol>` structure.
pub fn restructure(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let candidates: Vec<Option<Candidate>> = lines.iter().map(|line| scan_line(line)).collect();
    let depths = DepthMap::build(&candidates);

    let mut out: Vec<String> = Vec::new();
    let mut stack: Vec<ListContext> = Vec::new();
    // Blank lines inside an open list are buffered: they vanish if the list
    // continues, and re-emerge after the closing tags if it does not, so
    // paragraph boundaries survive.
    let mut pending_blanks = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        let accepted = candidates[idx]
            .as_ref()
            .filter(|_| accept_candidate(&candidates, idx));

        match accepted {
            Some(candidate) => {
                pending_blanks = 0;
                let depth = depths.depth_of(candidate.indent);
                let ordered = candidate.kind != MarkerKind::Bullet;

                while stack.last().map_or(false, |ctx| ctx.depth > depth) {
                    close_one(&mut out, &mut stack);
                }
                if stack
                    .last()
                    .map_or(false, |ctx| ctx.depth == depth && ctx.ordered != ordered)
                {
                    close_one(&mut out, &mut stack);
                }
                let mut next = stack.last().map_or(0, |ctx| ctx.depth + 1);
                while next <= depth {
                    let opens_target = next == depth && ordered;
                    out.push(if opens_target { "<ol>" } else { "<ul>" }.to_string());
                    stack.push(ListContext {
                        ordered: opens_target,
                        depth: next,
                    });
                    next += 1;
                }
                out.push(render_item(candidate));
            }
            None if line.trim().is_empty() => {
                if stack.is_empty() {
                    out.push(String::new());
                } else {
                    pending_blanks += 1;
                }
            }
            None => {
                close_all(&mut out, &mut stack);
                flush_blanks(&mut out, &mut pending_blanks);
                out.push((*line).to_string());
            }
        }
    }

    close_all(&mut out, &mut stack);
    flush_blanks(&mut out, &mut pending_blanks);
    out.join("\n")
}

fn scan_line(line: &str) -> Option<Candidate<'_>> {
    let caps = MARKER_RE.captures(line)?;
    let indent = indent_width(caps.get(1).map_or("", |m| m.as_str()));
    let marker = caps.get(2).map_or("", |m| m.as_str());
    let content = caps.get(3).map_or("", |m| m.as_str());
    let (kind, delimiter, single) = parse_marker(marker)?;
    Some(Candidate {
        indent,
        kind,
        delimiter,
        single,
        content,
    })
}

fn indent_width(indent: &str) -> usize {
    indent.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

fn parse_marker(marker: &str) -> Option<(MarkerKind, char, bool)> {
    if marker.len() == 1 && "-*+".contains(marker) {
        return Some((MarkerKind::Bullet, marker.chars().next()?, false));
    }
    if let Some(digits) = marker.strip_prefix('(').and_then(|m| m.strip_suffix(')')) {
        let value = digits.parse().ok()?;
        return Some((MarkerKind::Parenthesized(value), ')', digits.len() == 1));
    }

    let delimiter = marker.chars().last()?;
    let label = &marker[..marker.len() - 1];
    if label.chars().all(|c| c.is_ascii_digit()) {
        let value = label.parse().ok()?;
        return Some((MarkerKind::Arabic(value), delimiter, label.len() == 1));
    }
    if label.chars().count() == 1 {
        // Single roman characters like `i.` are treated as letters; a run of
        // neighbors sorts out which family they belong to.
        return Some((MarkerKind::Letter(label.chars().next()?), delimiter, true));
    }
    Some((MarkerKind::Roman, delimiter, false))
}

/// The classification filter: shape got the line here, context decides.
fn accept_candidate(candidates: &[Option<Candidate>], idx: usize) -> bool {
    let candidate = match candidates[idx].as_ref() {
        Some(candidate) => candidate,
        None => return false,
    };

    if candidate.kind == MarkerKind::Bullet {
        return true;
    }
    if looks_like_name(candidate) {
        return false;
    }
    if related_neighbors(candidates, idx) > 0 {
        return true;
    }
    if candidate.single {
        if sequence_start(candidate.kind) {
            return true;
        }
        if has_complete_chain(candidates, idx) {
            return true;
        }
        if short_capitalized_phrase(candidate.content) {
            return false;
        }
    }
    window_candidates(candidates, idx) >= 2
}

/// `J. Robert Oppenheimer spoke ...` is an initial, not a list item.
fn looks_like_name(candidate: &Candidate) -> bool {
    let uppercase_letter =
        matches!(candidate.kind, MarkerKind::Letter(ch) if ch.is_ascii_uppercase());
    if !uppercase_letter || candidate.delimiter != '.' {
        return false;
    }
    NAME_PAIR_RE.is_match(candidate.content) || LONE_NAME_RE.is_match(candidate.content)
}

/// Candidates within three lines and two indentation columns that share the
/// same delimiter or marker family.
fn related_neighbors(candidates: &[Option<Candidate>], idx: usize) -> usize {
    let candidate = match candidates[idx].as_ref() {
        Some(candidate) => candidate,
        None => return 0,
    };
    neighbor_range(candidates.len(), idx)
        .filter_map(|i| candidates[i].as_ref())
        .filter(|other| {
            other.indent.abs_diff(candidate.indent) <= 2 && related(candidate, other)
        })
        .count()
}

fn window_candidates(candidates: &[Option<Candidate>], idx: usize) -> usize {
    neighbor_range(candidates.len(), idx)
        .filter(|&i| candidates[i].is_some())
        .count()
}

fn neighbor_range(len: usize, idx: usize) -> impl Iterator<Item = usize> {
    let lo = idx.saturating_sub(3);
    let hi = (idx + 3).min(len.saturating_sub(1));
    (lo..=hi).filter(move |&i| i != idx)
}

fn related(a: &Candidate, b: &Candidate) -> bool {
    a.delimiter == b.delimiter || same_family(a.kind, b.kind)
}

fn same_family(a: MarkerKind, b: MarkerKind) -> bool {
    use MarkerKind::*;
    match (a, b) {
        (Bullet, Bullet) | (Arabic(_), Arabic(_)) => true,
        (Parenthesized(_), Parenthesized(_)) | (Roman, Roman) => true,
        (Letter(x), Letter(y)) => x.is_ascii_lowercase() == y.is_ascii_lowercase(),
        (Letter(x), Roman) | (Roman, Letter(x)) => is_roman_char(x),
        _ => false,
    }
}

fn is_roman_char(ch: char) -> bool {
    "ivxlcdm".contains(ch.to_ascii_lowercase())
}

/// `a.`, `A.`, `1.` and `(1)` open a sequence on their own.
fn sequence_start(kind: MarkerKind) -> bool {
    matches!(
        kind,
        MarkerKind::Letter('a')
            | MarkerKind::Letter('A')
            | MarkerKind::Arabic(1)
            | MarkerKind::Parenthesized(1)
    )
}

/// A mid-sequence marker is accepted when every predecessor in its sequence
/// appeared earlier in the document at a similar indentation. This is what
/// lets `b.` continue a list across a gap wider than the neighbor window.
fn has_complete_chain(candidates: &[Option<Candidate>], idx: usize) -> bool {
    let candidate = match candidates[idx].as_ref() {
        Some(candidate) => candidate,
        None => return false,
    };
    let required: Vec<MarkerKind> = match candidate.kind {
        MarkerKind::Letter(ch) if ch.is_ascii_alphabetic() => {
            let base = if ch.is_ascii_uppercase() { b'A' } else { b'a' };
            (base..ch as u8).map(|b| MarkerKind::Letter(b as char)).collect()
        }
        MarkerKind::Arabic(n) => (1..n).map(MarkerKind::Arabic).collect(),
        MarkerKind::Parenthesized(n) => (1..n).map(MarkerKind::Parenthesized).collect(),
        _ => return false,
    };
    if required.is_empty() {
        return false;
    }
    required.iter().all(|kind| {
        candidates[..idx].iter().flatten().any(|prior| {
            prior.kind == *kind && prior.indent.abs_diff(candidate.indent) <= 2
        })
    })
}

/// `B. Spielberger directed the film.` reads as prose, not an item: an
/// unsupported single-character marker followed by a short capitalized
/// phrase stays text.
fn short_capitalized_phrase(content: &str) -> bool {
    content
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_uppercase())
        && content.split_whitespace().count() <= 6
}

fn render_item(candidate: &Candidate) -> String {
    if let Some(caps) = TASK_RE.captures(candidate.content) {
        let checked = if &caps[1] == " " { "" } else { " checked" };
        return format!(
            "<li><input type=\"checkbox\" disabled{}> {}</li>",
            checked, &caps[2]
        );
    }
    format!("<li>{}</li>", candidate.content)
}

fn close_one(out: &mut Vec<String>, stack: &mut Vec<ListContext>) {
    if let Some(ctx) = stack.pop() {
        out.push(if ctx.ordered { "</ol>" } else { "</ul>" }.to_string());
    }
}

fn close_all(out: &mut Vec<String>, stack: &mut Vec<ListContext>) {
    while !stack.is_empty() {
        close_one(out, stack);
    }
}

fn flush_blanks(out: &mut Vec<String>, pending: &mut usize) {
    for _ in 0..*pending {
        out.push(String::new());
    }
    *pending = 0;
}
