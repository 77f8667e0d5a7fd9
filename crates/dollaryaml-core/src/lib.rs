//! dollaryaml-core: YAML profiles with environment interpolation
//!
//! This crate loads YAML documents, resolves dotted paths against them, and
//! substitutes whole-scalar `${NAME}` / `${NAME:default}` tokens from the
//! environment. The whole resolved tree can also be bound to a serde type.
//!
//! # Example
//!
//! ```rust
//! use dollaryaml_core::Profile;
//!
//! let yaml = r#"
//! database:
//!   host: ${DOLLARYAML_DOC_HOST:localhost}
//!   port: 5432
//! "#;
//!
//! let profile = Profile::from_yaml(yaml).unwrap();
//! assert_eq!(profile.get("database.host"), "localhost");
//! assert_eq!(profile.get("database.port"), "5432");
//! assert!(profile.get_error("database").unwrap_err().is_not_found());
//! ```

pub mod error;
pub mod interpolation;
pub mod projection;
pub mod resolver;
pub mod value;

mod profile;

pub use error::{Error, ErrorKind, FormatStage, Result};
pub use interpolation::{Environment, MapEnv, ProcessEnv};
pub use profile::{Profile, ProfileOptions};
pub use projection::Projector;
pub use resolver::PathResolver;
pub use value::Value;
