//! greeting-server library crate.
//!
//! Serves the greeting page's name-pair configuration over HTTP.  The
//! presentation layer calls `GET /config` on load to personalize the page and
//! `POST /config` from its admin view to change the names.
//!
//! # Architecture
//!
//! ```text
//! Presentation layer (JSON over HTTP)
//!         ↕
//! [greeting-server]
//!   ├── settings          CLI/TOML settings, credential source
//!   └── infrastructure/
//!         ├── http        axum router, request/response DTOs, ApiError
//!         ├── server      listener + graceful shutdown
//!         ├── memory_store  RecordStore kept in process memory
//!         └── file_store    RecordStore kept as a JSON file
//!         ↕
//! [greeting-core]  ConfigService, ConfigRecord, AdminCredential
//! ```
//!
//! The binary in `main.rs` only parses arguments, builds these pieces and
//! calls [`infrastructure::run_server`].

/// Runtime settings: defaults, TOML file and credential source.
pub mod settings;

/// Infrastructure layer: HTTP surface and storage backends.
pub mod infrastructure;
