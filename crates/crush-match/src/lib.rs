/// Crush matching core.
///
/// "FHE" in name only: matching works on deterministic keyed SHA-256 hashes,
/// and the sealed payload stored next to each crush is a cosmetic blob that
/// is never decoded or compared. The privacy guarantee is hash pre-image
/// hardness, nothing more.
pub mod matcher;
pub mod score;

pub use matcher::Matcher;
