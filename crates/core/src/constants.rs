//! Constants used throughout the catalog core crate.
//!
//! File names here describe the layout of a content directory, whether it is the embedded
//! `content/` folder of this crate or an operator-supplied override.

/// Filename for the hematology entry document.
pub const HEMATOLOGY_FILENAME: &str = "hematology.yaml";

/// Filename for the neurology entry document.
pub const NEUROLOGY_FILENAME: &str = "neurology.yaml";

/// Directory holding one or more topic documents.
pub const TOPICS_DIR_NAME: &str = "topics";

/// Extension a topic document must have to be loaded from a directory.
pub const TOPIC_FILE_EXTENSION: &str = "yaml";

/// Default listen address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default listen address for the gRPC server.
pub const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:50051";

/// Catalog names used in errors and logs.
pub const HEMATOLOGY_CATALOG: &str = "hematology";
pub const NEUROLOGY_CATALOG: &str = "neurology";
pub const TOPICS_CATALOG: &str = "topics";
