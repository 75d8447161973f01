pub mod builder;

pub use builder::{localhost_context, StubResolverBuilder};
