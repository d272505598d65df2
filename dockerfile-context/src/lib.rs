#![deny(missing_debug_implementations)]

//! Compose Dockerfiles from typed commands and package them, together with the host files they
//! reference, into a build context ready to be sent to a Docker daemon.
//!
//! # Usage
//!
//! Register instructions on a [`DockerfileBuilder`] (or directly on a [`Dockerfile`]) in any
//! order. Each instruction kind has a fixed priority: `FROM` always comes first, build steps keep
//! the order they were registered in, and metadata such as `EXPOSE` or `LABEL` always comes last.
//!
//! ```rust
//! use dockerfile_context::DockerfileBuilder;
//!
//! let dockerfile = DockerfileBuilder::new()
//!     .expose([8080])
//!     .shell_run("apk add --no-cache curl")
//!     .from_tag("alpine", "3.20")
//!     .build();
//!
//! assert_eq!(
//!     dockerfile.render(),
//!     "FROM alpine:3.20\nRUN apk add --no-cache curl\nEXPOSE 8080\n"
//! );
//! ```
//!
//! A [`ContextArchiver`] then turns the Dockerfile into a tar archive. Every `ADD`/`COPY`
//! source found on the host is imported into the archive under its base name and the packaged
//! Dockerfile is rewritten to point at it. The Dockerfile you hold is never modified.
//!
//! # Environment variables
//!
//! [`ArchiveOptions::from_env`] reads:
//!
//! - `DOCKERFILE_CONTEXT_BUILD_DIR`: directory the archive is written to
//! - `DOCKERFILE_CONTEXT_KEEP_DOCKERFILE`: keep the temporary Dockerfile after packaging
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade; install any logger to see
//! which sources are imported or skipped.

pub mod core;

pub use crate::core::{
    ArchiveOptions, BuildContext, ContextArchiver, Dockerfile, DockerfileBuilder, DockerfileError,
};
