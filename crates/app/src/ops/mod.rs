pub mod bootstrap;
pub mod content_key;
pub mod hash;
pub mod init;
pub mod lookup_hash;
pub mod version;

pub use bootstrap::Bootstrap;
pub use content_key::ContentKey;
pub use hash::Hash;
pub use init::Init;
pub use lookup_hash::LookupHash;
pub use version::Version;
