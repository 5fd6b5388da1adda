use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

/// Cosmetic "ciphertext" stored alongside every crush submission. It is
/// written once and never decoded; all matching happens on the keyed hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct SealedAddress {
    pub version: String,
    pub algorithm: String,
    pub ciphertext: String,
    pub nonce: String,
}

/// Verifiable-by-recomputation match attestation. Anyone holding the server
/// key can rebuild `proof_hash` from the sorted pair; nobody else can.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchProof {
    #[serde(rename = "type")]
    pub kind: String,
    pub participants: Vec<String>,
    pub proof_hash: String,
    pub version: String,
}

const SEAL_VERSION: &str = "1.0";
const SEAL_ALGORITHM: &str = "FHE_SIMULATED";
const PROOF_KIND: &str = "mutual_crush_proof";

/// Lowercase + trim. Applied before every hash, store or compare.
pub fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

#[derive(Clone)]
pub struct Matcher {
    key: [u8; 32],
}

impl Matcher {
    /// Derive the matching key from the configured server secret.
    pub fn new(secret: &str) -> Self {
        let key = Sha256::digest(secret.as_bytes()).into();
        Self { key }
    }

    fn key_hex(&self) -> String {
        hex::encode(self.key)
    }

    /// Deterministic keyed hash of an address, used purely for equality
    /// testing. Case-insensitive via [`normalize`].
    pub fn address_hash(&self, address: &str) -> String {
        let normalized = normalize(address);
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hasher.update(self.key_hex().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Seal an address for storage: returns the opaque blob and the keyed
    /// match hash. The blob is base64(JSON) over hash-derived fields, so
    /// sealing is deterministic too.
    pub fn seal_address(&self, address: &str) -> Result<(String, String)> {
        let normalized = normalize(address);
        let hash = self.address_hash(address);

        let payload = SealedAddress {
            version: SEAL_VERSION.to_string(),
            algorithm: SEAL_ALGORITHM.to_string(),
            ciphertext: BASE64.encode(Sha512::digest(format!("{normalized}encrypted").as_bytes())),
            nonce: hex::encode(Md5::digest(normalized.as_bytes()))[..16].to_string(),
        };

        let blob = BASE64.encode(serde_json::to_vec(&payload)?);
        Ok((blob, hash))
    }

    /// Mutual-crush test: A's submitted hash names B and B's submitted hash
    /// names A. Plain hash equality in both directions.
    pub fn is_mutual(
        &self,
        a_address: &str,
        a_crush_hash: &str,
        b_address: &str,
        b_crush_hash: &str,
    ) -> bool {
        let a_likes_b = a_crush_hash == self.address_hash(b_address);
        let b_likes_a = b_crush_hash == self.address_hash(a_address);
        a_likes_b && b_likes_a
    }

    /// Build a proof blob for a confirmed match. Order-independent: the pair
    /// is sorted after normalization.
    pub fn create_proof(&self, address1: &str, address2: &str) -> Result<String> {
        let participants = sorted_pair(address1, address2);
        let proof = MatchProof {
            kind: PROOF_KIND.to_string(),
            proof_hash: self.pair_hash(&participants),
            participants: participants.to_vec(),
            version: SEAL_VERSION.to_string(),
        };
        Ok(BASE64.encode(serde_json::to_vec(&proof)?))
    }

    /// Verify a proof blob against a pair of addresses. Any decode failure
    /// or mismatch is simply `false`.
    pub fn verify_proof(&self, proof: &str, address1: &str, address2: &str) -> bool {
        let Ok(raw) = BASE64.decode(proof) else {
            return false;
        };
        let Ok(decoded) = serde_json::from_slice::<MatchProof>(&raw) else {
            return false;
        };

        let participants = sorted_pair(address1, address2);
        decoded.kind == PROOF_KIND
            && decoded.participants == participants
            && decoded.proof_hash == self.pair_hash(&participants)
    }

    fn pair_hash(&self, sorted: &[String; 2]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(sorted[0].as_bytes());
        hasher.update(sorted[1].as_bytes());
        hasher.update(self.key_hex().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Normalized, sorted address pair: the canonical form for match storage
/// and proofs.
pub fn sorted_pair(address1: &str, address2: &str) -> [String; 2] {
    let mut pair = [normalize(address1), normalize(address2)];
    pair.sort();
    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> Matcher {
        Matcher::new("test-secret")
    }

    #[test]
    fn hash_is_deterministic_and_case_insensitive() {
        let m = matcher();
        let a = m.address_hash("0xAbCdEf1234567890");
        let b = m.address_hash("  0xabcdef1234567890  ");
        assert_eq!(a, b);
        assert_eq!(a, m.address_hash("0xABCDEF1234567890"));
    }

    #[test]
    fn different_secrets_give_different_hashes() {
        let addr = "0xabc123def456abc1";
        assert_ne!(
            Matcher::new("one").address_hash(addr),
            Matcher::new("two").address_hash(addr)
        );
    }

    #[test]
    fn seal_returns_stable_blob_and_hash() {
        let m = matcher();
        let (blob1, hash1) = m.seal_address("0xAAAA000011112222").unwrap();
        let (blob2, hash2) = m.seal_address("0xaaaa000011112222").unwrap();
        assert_eq!(blob1, blob2);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1, m.address_hash("0xAAAA000011112222"));

        // The blob is base64(JSON) with the cosmetic fields present.
        let raw = BASE64.decode(&blob1).unwrap();
        let payload: SealedAddress = serde_json::from_slice(&raw).unwrap();
        assert_eq!(payload.algorithm, "FHE_SIMULATED");
        assert_eq!(payload.nonce.len(), 16);
    }

    #[test]
    fn mutual_is_symmetric() {
        let m = matcher();
        let alice = "0xaaaa111122223333";
        let bob = "0xbbbb444455556666";
        let alice_crush = m.address_hash(bob);
        let bob_crush = m.address_hash(alice);

        assert!(m.is_mutual(alice, &alice_crush, bob, &bob_crush));
        assert!(m.is_mutual(bob, &bob_crush, alice, &alice_crush));
    }

    #[test]
    fn one_sided_is_not_mutual() {
        let m = matcher();
        let alice = "0xaaaa111122223333";
        let bob = "0xbbbb444455556666";
        let carol = "0xcccc777788889999";
        let alice_crush = m.address_hash(bob);
        let bob_crush = m.address_hash(carol);

        assert!(!m.is_mutual(alice, &alice_crush, bob, &bob_crush));
    }

    #[test]
    fn proof_verifies_in_either_order() {
        let m = matcher();
        let proof = m.create_proof("0xAAAA", "0xBBBB").unwrap();
        assert!(m.verify_proof(&proof, "0xaaaa", "0xbbbb"));
        assert!(m.verify_proof(&proof, "0xBBBB", "0xAAAA"));
    }

    #[test]
    fn proof_rejects_wrong_pair_tampering_and_garbage() {
        let m = matcher();
        let proof = m.create_proof("0xAAAA", "0xBBBB").unwrap();
        assert!(!m.verify_proof(&proof, "0xaaaa", "0xcccc"));
        assert!(!m.verify_proof("not-base64!!!", "0xaaaa", "0xbbbb"));

        // Flip a character inside the blob.
        let mut tampered = proof.into_bytes();
        tampered[10] = if tampered[10] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(!m.verify_proof(&tampered, "0xaaaa", "0xbbbb"));
    }

    #[test]
    fn proof_from_other_key_fails() {
        let proof = Matcher::new("one").create_proof("0xAAAA", "0xBBBB").unwrap();
        assert!(!Matcher::new("two").verify_proof(&proof, "0xaaaa", "0xbbbb"));
    }
}
