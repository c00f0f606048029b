use crate::model::entry::Entry;

/// Moves entries holding a `primary` pair to the front. A single forward scan:
/// every entry lacking one is swapped with the nearest later entry that has
/// one. Entries without the language end up trailing, not sorted.
pub fn arrange_entries(entries: &mut [Entry], primary: &str) {
    let n = entries.len();

    for i in 0..n.saturating_sub(1) {
        if entries[i].has_language(primary) {
            continue;
        }

        if let Some(offset) = entries[i + 1..].iter().position(|e| e.has_language(primary)) {
            entries.swap(i, i + 1 + offset);
        }
    }
}

/// Selection sort of the target pairs by language. The source pair stays put.
pub fn arrange_pairs(entry: &mut Entry) {
    let count = entry.pairs.len();

    for j in 1..count.saturating_sub(1) {
        let mut min = j;
        for l in j + 1..count {
            if entry.pairs[l].language < entry.pairs[min].language {
                min = l;
            }
        }

        if min != j {
            entry.pairs.swap(min, j);
        }
    }
}

pub fn canonicalize(entries: &mut [Entry], primary: &str) {
    arrange_entries(entries, primary);
    for e in entries.iter_mut() {
        arrange_pairs(e);
    }
}
