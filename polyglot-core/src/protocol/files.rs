use serde_json::{json, Value};

use crate::services::phrasebook::codec;

use super::{str_field, Command, Failure, Reply, Session};

/// Which blocks of an import file the caller agreed to.
#[derive(Debug, PartialEq, Eq)]
enum Acceptance {
    All,
    Nothing,
    Blocks(Vec<usize>),
}

impl Acceptance {
    fn from_payload(payload: &Value) -> Result<Self, Failure> {
        let invalid = || Failure::payload("payload.accept must be \"all\", \"none\" or a list of block numbers");

        match payload.get("accept") {
            Some(Value::String(s)) if s == "all" => Ok(Acceptance::All),
            Some(Value::String(s)) if s == "none" => Ok(Acceptance::Nothing),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_u64().map(|n| n as usize).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()
                .map(Acceptance::Blocks),
            _ => Err(invalid()),
        }
    }

    fn accepts(&self, block: usize) -> bool {
        match self {
            Acceptance::All => true,
            Acceptance::Nothing => false,
            Acceptance::Blocks(numbers) => numbers.contains(&block),
        }
    }
}

pub(super) fn handle(session: &mut Session, cmd: Command, payload: &Value) -> Reply {
    match cmd {
        Command::StoreExport => export(session, payload),
        Command::StoreImport => import(session, payload),
        _ => Err(Failure::new("unknown_command", "unknown command")),
    }
}

fn export(session: &mut Session, payload: &Value) -> Reply {
    let filename = str_field(payload, "filename")?;
    codec::validate_filename(filename)?;

    if session.store.is_empty() {
        return Err(Failure::new("no_data", "there is no data to export yet"));
    }

    let path = session.resolve(filename);
    let written = codec::export_store(&mut session.store, &path)?;

    Ok(json!({
        "filename": filename,
        "entries": written
    }))
}

/// Send `"accept": "none"` first to preview the blocks, then the numbers to keep.
fn import(session: &mut Session, payload: &Value) -> Reply {
    let filename = str_field(payload, "filename")?;
    codec::validate_filename(filename)?;
    let acceptance = Acceptance::from_payload(payload)?;

    let path = session.resolve(filename);
    let max_len = session.config.max_field_len;
    let report = codec::import_store(&mut session.store, &path, max_len, |n, _| acceptance.accepts(n))?;

    if report.limit_reached {
        tracing::warn!(limit = session.store.max_entries(), "import stopped at the entry limit");
    }

    let mut v = serde_json::to_value(report).unwrap_or(json!({}));
    v["entry_count"] = json!(session.store.len());
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_forms() {
        let all = Acceptance::from_payload(&json!({ "accept": "all" })).unwrap();
        assert!(all.accepts(3));

        let none = Acceptance::from_payload(&json!({ "accept": "none" })).unwrap();
        assert!(!none.accepts(1));

        let some = Acceptance::from_payload(&json!({ "accept": [1, 3] })).unwrap();
        assert_eq!(some, Acceptance::Blocks(vec![1, 3]));
        assert!(some.accepts(3));
        assert!(!some.accepts(2));
    }

    #[test]
    fn acceptance_is_required() {
        assert!(Acceptance::from_payload(&json!({})).is_err());
        assert!(Acceptance::from_payload(&json!({ "accept": "maybe" })).is_err());
        assert!(Acceptance::from_payload(&json!({ "accept": [1, "two"] })).is_err());
    }

    #[test]
    fn rejected_acceptance_carries_payload_code() {
        let failure = Acceptance::from_payload(&json!({ "accept": 2 })).unwrap_err();
        assert_eq!(failure.code, "invalid_payload");
        assert!(format!("{failure:?}").contains("payload.accept"));
    }
}
