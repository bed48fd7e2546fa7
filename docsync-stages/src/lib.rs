//! Concrete pipeline stages.
//!
//! Each stage conforms to the [`docsync_core::Stage`] contract: read the
//! current file-set, transform it, signal completion or failure. The fixed
//! order they run in is assembled by `docsync-engine`; each module here is
//! independently testable against a hand-built [`docsync_core::FileSet`].

pub mod doc_comments;
pub mod filter;
pub mod front_matter;
pub mod ignore;
pub mod package_meta;
pub mod packages;
pub mod patterns;
pub mod persist;
pub mod rename;
pub mod select;
pub mod source;
pub mod write_meta;
pub mod writer;

pub use doc_comments::ExtractDocComments;
pub use filter::FilterByMeta;
pub use front_matter::ParseFrontMatter;
pub use ignore::SyncIgnoreFile;
pub use package_meta::AddPackageMeta;
pub use packages::{ExtractPackages, PackageIndex};
pub use persist::WriteFiles;
pub use rename::RenameByPath;
pub use select::SelectFiles;
pub use source::AnnotateSource;
pub use write_meta::WriteFrontMatter;
pub use writer::{write_if_changed, WriteOutcome};
