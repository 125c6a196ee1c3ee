//! # premsel-corpus
//!
//! TPTP corpus parsing.
//!
//! ```text
//! root problem file
//!     │  strip comments
//!     ├─ include('...') directives ──▶ recursive load (cycle-guarded, memoised)
//!     └─ depth-aware statement split ──▶ keyword(name, role, body[, annotations])
//!     │
//! Corpus (ordered, first-wins on names) + diagnostics
//! ```
//!
//! Failures below the root file never abort a parse: malformed statements and
//! unreadable includes are skipped and reported as [`Diagnostic`]s.

pub mod builder;
pub mod cache;
pub mod corpus;
pub mod error;
pub mod include;
pub mod parser;
pub mod scan;

pub use builder::build_problem;
pub use cache::CorpusCache;
pub use corpus::{Corpus, Goal};
pub use error::{CorpusError, Diagnostic};
pub use include::IncludeDirective;
pub use parser::{parse, parse_str};
