//! Procedural name forging from multilingual lemma pools.
//!
//! Re-exports modules for use by the CLI and by embedding applications.
//!
//! ```no_run
//! use name_forge::{BlendResolver, BlendTable, LexicalRepository, NameForge};
//!
//! let repo = LexicalRepository::load("data/lexicon");
//! let resolver = BlendResolver::new(BlendTable::default());
//! let blend = resolver.resolve_blend("calm", Some("marsh"));
//! let mut forge = NameForge::new();
//! let name = forge.forge(&repo, "forest", &blend, "marsh", None);
//! println!("{}", name);
//! ```

pub mod blend;
pub mod config;
pub mod error;
pub mod forge;
pub mod lexicon;

pub use blend::{BlendProfile, BlendResolver, BlendTable, RegionalModifier};
pub use config::ForgeConfig;
pub use error::{DataError, ForgeError, Result};
pub use forge::NameForge;
pub use lexicon::{IntegrityReport, LexicalRepository};
