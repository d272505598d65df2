pub use self::{
    archive_options::{ArchiveOptions, DEFAULT_ARCHIVE_PREFIX, DEFAULT_DOCKERFILE_PREFIX},
    context_archiver::{BuildContext, ContextArchiver, DOCKERFILE_NAME},
};

mod archive_options;
mod context_archiver;
