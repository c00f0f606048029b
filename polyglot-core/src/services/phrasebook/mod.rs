pub mod canonical;
pub mod codec;
pub mod matcher;
pub mod normalize;
pub mod store;
pub mod translator;
