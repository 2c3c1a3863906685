pub mod alias;
pub mod path;
pub mod scope_index;
pub mod tables;
pub mod value;

pub use alias::{alias_path, is_alias, AliasOutcome, AliasResolver, StoreAliasResolver, MAX_ALIAS_HOPS};
pub use scope_index::ScopeIndex;
pub use value::token_value;
