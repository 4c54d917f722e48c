//! Known-answer vectors for the AEAD backends.
//!
//! AES-256-GCM cases 13-16 from the original GCM specification
//! (McGrew & Viega), as reproduced in NIST CAVP.

use parley_core::{AeadCipher, Aes256GcmCipher, Nonce, SharedSecret, TAG_LEN};

/// A single AEAD known-answer vector. All fields are hex.
#[derive(Debug, Clone)]
pub struct AeadVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// 256-bit key.
    pub key: &'static str,
    /// 96-bit nonce.
    pub nonce: &'static str,
    /// Associated data, possibly empty.
    pub aad: &'static str,
    /// Plaintext, possibly empty.
    pub plaintext: &'static str,
    /// Expected ciphertext, as long as the plaintext.
    pub ciphertext: &'static str,
    /// Expected 128-bit tag.
    pub tag: &'static str,
}

impl AeadVector {
    /// Decode the key.
    pub fn key(&self) -> SharedSecret {
        let bytes = hex::decode(self.key).expect("vector key is hex");
        SharedSecret::from_slice(&bytes).expect("vector key is 32 bytes")
    }

    /// Decode the nonce.
    pub fn nonce(&self) -> Nonce {
        let bytes = hex::decode(self.nonce).expect("vector nonce is hex");
        let arr: [u8; 12] = bytes.try_into().expect("vector nonce is 12 bytes");
        Nonce::from_bytes(arr)
    }

    /// Expected `ciphertext || tag`.
    pub fn sealed(&self) -> Vec<u8> {
        let mut out = hex::decode(self.ciphertext).expect("vector ciphertext is hex");
        out.extend(hex::decode(self.tag).expect("vector tag is hex"));
        out
    }

    fn bytes(field: &str) -> Vec<u8> {
        hex::decode(field).expect("vector field is hex")
    }
}

const GCM_KEY_15: &str = "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308";
const GCM_NONCE_15: &str = "cafebabefacedbaddecaf888";

/// Get all AES-256-GCM vectors.
pub fn all_vectors() -> Vec<AeadVector> {
    vec![
        AeadVector {
            name: "GCM test case 13: empty plaintext, zero key",
            key: "0000000000000000000000000000000000000000000000000000000000000000",
            nonce: "000000000000000000000000",
            aad: "",
            plaintext: "",
            ciphertext: "",
            tag: "530f8afbc74536b9a963b4f1c4cb738b",
        },
        AeadVector {
            name: "GCM test case 14: one zero block, zero key",
            key: "0000000000000000000000000000000000000000000000000000000000000000",
            nonce: "000000000000000000000000",
            aad: "",
            plaintext: "00000000000000000000000000000000",
            ciphertext: "cea7403d4d606b6e074ec5d3baf39d18",
            tag: "d0d1c8a799996bf0265b98b5d48ab919",
        },
        AeadVector {
            name: "GCM test case 15: four blocks, no aad",
            key: GCM_KEY_15,
            nonce: GCM_NONCE_15,
            aad: "",
            plaintext: "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a72\
                        1c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b391aafd255",
            ciphertext: "522dc1f099567d07f47f37a32a84427d643a8cdcbfe5c0c97598a2bd2555d1aa\
                         8cb08e48590dbb3da7b08b1056828838c5f61e6393ba7a0abcc9f662898015ad",
            tag: "b094dac5d93471bdec1a502270e3cc6c",
        },
        AeadVector {
            name: "GCM test case 16: partial block with aad",
            key: GCM_KEY_15,
            nonce: GCM_NONCE_15,
            aad: "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            plaintext: "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a72\
                        1c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            ciphertext: "522dc1f099567d07f47f37a32a84427d643a8cdcbfe5c0c97598a2bd2555d1aa\
                         8cb08e48590dbb3da7b08b1056828838c5f61e6393ba7a0abcc9f662",
            tag: "76fc6ece0f4e1768cddf8853bb2d551b",
        },
    ]
}

/// Check every vector in both directions.
///
/// Returns `(name, passed)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    let cipher = Aes256GcmCipher;
    all_vectors()
        .iter()
        .map(|v| {
            let key = v.key();
            let nonce = v.nonce();
            let aad = AeadVector::bytes(v.aad);
            let plaintext = AeadVector::bytes(v.plaintext);
            let expected = v.sealed();

            let sealed_ok = cipher
                .seal(&key, &nonce, &plaintext, &aad)
                .map(|sealed| sealed == expected)
                .unwrap_or(false);
            let opened_ok = cipher
                .open(&key, &nonce, &expected, &aad)
                .map(|opened| opened == plaintext)
                .unwrap_or(false);

            (v.name.to_string(), sealed_ok && opened_ok)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for (name, ok) in verify_all_vectors() {
            assert!(ok, "vector '{}' failed", name);
        }
    }

    #[test]
    fn test_vector_tags_are_full_length() {
        for vector in all_vectors() {
            assert_eq!(vector.tag.len() / 2, TAG_LEN, "{}", vector.name);
        }
    }

    #[test]
    fn test_vector_rejects_modified_tag() {
        let vector = &all_vectors()[1];
        let mut sealed = vector.sealed();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x80;

        assert!(Aes256GcmCipher
            .open(&vector.key(), &vector.nonce(), &sealed, &[])
            .is_err());
    }
}
