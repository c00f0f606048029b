pub mod encoding;
pub mod phrasebook;
