#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    EntryAdd,
    EntryFindSource,
    EntryDelete,
    PairAdd,
    PairDelete,
    StoreList,
    StoreClear,
    StoreExport,
    StoreImport,
    SearchWord,
    SearchPair,
    Translate,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "entry.add" => Command::EntryAdd,
            "entry.find_source" => Command::EntryFindSource,
            "entry.delete" => Command::EntryDelete,
            "pair.add" => Command::PairAdd,
            "pair.delete" => Command::PairDelete,
            "store.list" => Command::StoreList,
            "store.clear" => Command::StoreClear,
            "store.export" => Command::StoreExport,
            "store.import" => Command::StoreImport,
            "search.word" => Command::SearchWord,
            "search.pair" => Command::SearchPair,
            "translate" => Command::Translate,
            _ => Command::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_to_commands() {
        assert_eq!(Command::from("entry.add"), Command::EntryAdd);
        assert_eq!(Command::from("store.import"), Command::StoreImport);
        assert_eq!(Command::from("translate"), Command::Translate);
        assert_eq!(Command::from("Translate"), Command::Unknown);
        assert_eq!(Command::from(""), Command::Unknown);
    }
}
