use std::path::PathBuf;

use serde_json::{json, Value};

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::model::entry::{Entry, LangPair};
use crate::services::phrasebook::matcher::MatchList;
use crate::services::phrasebook::normalize;
use crate::services::phrasebook::store::PhraseStore;

mod command;
mod files;
mod store;

pub use command::Command;

/// State shared by every request on one connection: the phrase store and
/// the directory import/export filenames are resolved against.
pub struct Session {
    config: CoreConfig,
    store: PhraseStore,
    base_dir: PathBuf,
}

impl Session {
    pub fn new(config: CoreConfig) -> Self {
        let store = PhraseStore::with_config(&config);
        Session {
            config,
            store,
            base_dir: PathBuf::from("."),
        }
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn store(&self) -> &PhraseStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PhraseStore {
        &mut self.store
    }

    fn resolve(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }
}

/// Error reply: a stable code plus a human readable message.
#[derive(Debug)]
pub(crate) struct Failure {
    code: &'static str,
    message: String,
}

impl Failure {
    fn payload(message: impl Into<String>) -> Self {
        Failure {
            code: "invalid_payload",
            message: message.into(),
        }
    }

    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Failure {
            code,
            message: message.into(),
        }
    }
}

impl From<CoreError> for Failure {
    fn from(e: CoreError) -> Self {
        Failure {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

type Reply = Result<Value, Failure>;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, failure: Failure) -> String {
    json!({
        "id": id,
        "status": "error",
        "code": failure.code,
        "message": failure.message
    })
    .to_string()
}

fn str_field<'a>(payload: &'a Value, key: &str) -> Result<&'a str, Failure> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| Failure::payload(format!("payload.{key} is required")))
}

fn index_field(payload: &Value, key: &str) -> Result<usize, Failure> {
    payload
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .ok_or_else(|| Failure::payload(format!("payload.{key} must be a non-negative integer")))
}

/// Reads `{ "language", "translation" }` and normalizes it.
fn pair_field(value: &Value, max_len: usize) -> Result<LangPair, Failure> {
    let language = str_field(value, "language")?;
    let translation = str_field(value, "translation")?;
    Ok(normalize::pair(language, translation, max_len)?)
}

fn entry_view(index: usize, entry: &Entry) -> Value {
    json!({
        "index": index,
        "pairs": entry.pairs
    })
}

fn matches_view(store: &PhraseStore, matches: &MatchList) -> Value {
    let entries: Vec<Value> = matches
        .indices
        .iter()
        .filter_map(|&i| store.entry(i).map(|e| entry_view(i, e)))
        .collect();

    json!({
        "found": matches.found(),
        "matches": matches.indices,
        "entries": entries
    })
}

fn translate(session: &mut Session, payload: &Value) -> Reply {
    let max_len = session.config.max_field_len;
    let source_lang = normalize::language(str_field(payload, "source_lang")?, max_len)?;
    let target_lang = normalize::language(str_field(payload, "target_lang")?, max_len)?;

    let text = str_field(payload, "text")?;
    normalize::check_len("text", text, session.config.max_text_len)?;

    let result = session.store.translate(&source_lang, &target_lang, text);
    Ok(serde_json::to_value(result).unwrap_or(json!({})))
}

fn dispatch(session: &mut Session, cmd: Command, payload: &Value) -> Reply {
    match cmd {
        Command::Ping => Ok(json!({ "message": "polyglot-core alive" })),

        Command::EntryAdd
        | Command::EntryFindSource
        | Command::EntryDelete
        | Command::PairAdd
        | Command::PairDelete
        | Command::StoreList
        | Command::StoreClear
        | Command::SearchWord
        | Command::SearchPair => store::handle(session, cmd, payload),

        Command::StoreExport | Command::StoreImport => files::handle(session, cmd, payload),

        Command::Translate => translate(session, payload),

        Command::Unknown => Err(Failure::new("unknown_command", "unknown command")),
    }
}

/// Handles one request line and returns the response line.
pub fn handle(session: &mut Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("rejecting request that is not valid json: {e}");
            return json!({
                "status": "error",
                "code": "invalid_json",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    tracing::debug!(cmd = cmd_str, "handling request");

    match dispatch(session, Command::from(cmd_str), payload) {
        Ok(v) => ok(id, v),
        Err(f) => {
            tracing::debug!(cmd = cmd_str, code = f.code, "request failed: {}", f.message);
            err(id, f)
        }
    }
}
