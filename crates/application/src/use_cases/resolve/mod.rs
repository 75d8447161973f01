mod context;
mod lookup;
mod resolve_name;

pub use context::{LookupOptions, ResolverContext};
pub use lookup::{Lookup, MAX_ITERATIONS};
pub use resolve_name::ResolveNameUseCase;
