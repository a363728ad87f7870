use smallvec::SmallVec;

type OptionalUnits = SmallVec<[(char, bool); 16]>;

/// Splits an optional key into characters, each flagged when a `?` follows it.
fn optional_units(raw: &str) -> OptionalUnits {
    let mut units = OptionalUnits::new();
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '?' {
            continue;
        }
        units.push((ch, chars.peek() == Some(&'?')));
    }
    units
}

/// Whether some string is accepted by both optional keys. Walks the two unit
/// lists together, so the cost is the product of their lengths.
pub fn optionals_overlap(a: &str, b: &str) -> bool {
    let a = optional_units(a);
    let b = optional_units(b);
    let width = b.len() + 1;
    let mut reach = vec![false; (a.len() + 1) * width];
    reach[0] = true;

    for i in 0..=a.len() {
        for j in 0..=b.len() {
            if !reach[i * width + j] {
                continue;
            }
            if i < a.len() && a[i].1 {
                reach[(i + 1) * width + j] = true;
            }
            if j < b.len() && b[j].1 {
                reach[i * width + j + 1] = true;
            }
            if i < a.len() && j < b.len() && a[i].0 == b[j].0 {
                reach[(i + 1) * width + j + 1] = true;
            }
        }
    }

    reach[a.len() * width + b.len()]
}

/// The two reductions of a repetition key used for overlap checks: the key
/// with every `+` dropped, and the key with every repeated character dropped
/// along with its `+`.
pub fn repetition_variants(raw: &str) -> [String; 2] {
    let plus_removed: String = raw.chars().filter(|&c| c != '+').collect();

    let mut repeated_removed = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '+' {
            continue;
        }
        if chars.peek() == Some(&'+') {
            continue;
        }
        repeated_removed.push(ch);
    }

    [plus_removed, repeated_removed]
}
