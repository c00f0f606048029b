use serde_json::{json, Value};

use crate::services::phrasebook::normalize;
use crate::services::phrasebook::store::PairRemoval;

use super::{entry_view, index_field, matches_view, pair_field, str_field, Command, Failure, Reply, Session};

pub(super) fn handle(session: &mut Session, cmd: Command, payload: &Value) -> Reply {
    match cmd {
        Command::EntryAdd => add_entry(session, payload),
        Command::EntryFindSource => find_source(session, payload),
        Command::EntryDelete => delete_entry(session, payload),
        Command::PairAdd => add_pair(session, payload),
        Command::PairDelete => delete_pair(session, payload),
        Command::StoreList => list(session),
        Command::StoreClear => {
            session.store.clear();
            Ok(json!({ "entry_count": 0 }))
        }
        Command::SearchWord => search_word(session, payload),
        Command::SearchPair => search_pair(session, payload),
        _ => Err(Failure::new("unknown_command", "unknown command")),
    }
}

/// Adds a source pair with its targets. When the source pair already opens
/// another entry the caller has to resend with `force` to add it anyway.
fn add_entry(session: &mut Session, payload: &Value) -> Reply {
    let max_len = session.config.max_field_len;

    let source = payload
        .get("source")
        .ok_or_else(|| Failure::payload("payload.source is required"))
        .and_then(|v| pair_field(v, max_len))?;

    let targets = payload
        .get("targets")
        .and_then(|v| v.as_array())
        .ok_or_else(|| Failure::payload("payload.targets must be an array"))?
        .iter()
        .map(|v| pair_field(v, max_len))
        .collect::<Result<Vec<_>, _>>()?;

    let force = payload.get("force").and_then(|v| v.as_bool()).unwrap_or(false);

    let duplicates = session.store.find_source(&source.language, &source.translation);
    if duplicates.found() && !force {
        return Ok(json!({
            "added": false,
            "duplicates": matches_view(&session.store, &duplicates)
        }));
    }

    let index = session.store.add_entry_with_targets(source, targets)?;
    tracing::debug!(index, "entry added");

    let entry = session.store.entry(index).map(|e| entry_view(index, e));
    Ok(json!({
        "added": true,
        "index": index,
        "entry": entry
    }))
}

fn find_source(session: &mut Session, payload: &Value) -> Reply {
    let pair = pair_field(payload, session.config.max_field_len)?;
    let matches = session.store.find_source(&pair.language, &pair.translation);
    Ok(matches_view(&session.store, &matches))
}

fn add_pair(session: &mut Session, payload: &Value) -> Reply {
    let index = index_field(payload, "entry")?;
    let pair = pair_field(payload, session.config.max_field_len)?;

    let count = session.store.add_pair(index, pair)?;
    Ok(json!({
        "index": index,
        "count": count,
        "full": count >= session.store.max_pairs()
    }))
}

fn delete_entry(session: &mut Session, payload: &Value) -> Reply {
    let index = index_field(payload, "entry")?;
    let removed = session.store.delete_entry(index)?;
    Ok(json!({
        "deleted": removed.pairs,
        "entry_count": session.store.len()
    }))
}

fn delete_pair(session: &mut Session, payload: &Value) -> Reply {
    let index = index_field(payload, "entry")?;
    let pair = index_field(payload, "pair")?;

    let (entry_deleted, removed) = match session.store.delete_pair(index, pair)? {
        PairRemoval::Pair(p) => (false, vec![p]),
        PairRemoval::Entry(e) => (true, e.pairs),
    };

    Ok(json!({
        "entry_deleted": entry_deleted,
        "removed": removed,
        "entry_count": session.store.len()
    }))
}

fn list(session: &mut Session) -> Reply {
    session.store.canonicalize();
    let entries: Vec<Value> = session
        .store
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| entry_view(i, e))
        .collect();

    Ok(json!({
        "entry_count": entries.len(),
        "entries": entries
    }))
}

fn search_word(session: &mut Session, payload: &Value) -> Reply {
    let word = str_field(payload, "word")?;
    normalize::check_len("word", word, session.config.max_field_len)?;

    let matches = session.store.search_word(&normalize::lowercase(word));
    Ok(matches_view(&session.store, &matches))
}

fn search_pair(session: &mut Session, payload: &Value) -> Reply {
    let pair = pair_field(payload, session.config.max_field_len)?;
    let matches = session.store.search_pair(&pair.language, &pair.translation);
    Ok(matches_view(&session.store, &matches))
}
