pub mod resolve;

pub use resolve::{Lookup, LookupOptions, ResolveNameUseCase, ResolverContext, MAX_ITERATIONS};
