//! Integration tests for name lookup hashes

mod common;

use ::common::drive::{DriveKeys, DriveKeysError};
use ::common::testkit::{FaultyProvider, ProviderCall};

#[tokio::test]
async fn test_folder_lookup_hashes() {
    let keys = DriveKeys::local();
    let (address, _) = common::address_key(&keys).await;
    let result = keys.generate_drive_bootstrap(&address).await.unwrap();
    let share = &result.share_private_key;

    let issued = keys.generate_node_hash_key(share).await.unwrap();
    let hash_key = keys
        .decrypt_node_hash_key(&issued.node_hash_key, share)
        .await
        .unwrap();

    let first = keys.generate_lookup_hash("notes.txt", &hash_key).await.unwrap();
    let again = keys.generate_lookup_hash("notes.txt", &hash_key).await.unwrap();
    let other = keys.generate_lookup_hash("Notes.txt", &hash_key).await.unwrap();
    assert_eq!(first, again);
    assert_ne!(first, other);

    // A different folder hashes the same name differently
    let sibling = keys.generate_node_hash_key(share).await.unwrap();
    let sibling_key = keys
        .decrypt_node_hash_key(&sibling.node_hash_key, share)
        .await
        .unwrap();
    let elsewhere = keys
        .generate_lookup_hash("notes.txt", &sibling_key)
        .await
        .unwrap();
    assert_ne!(first, elsewhere);
}

#[tokio::test]
async fn test_unicode_names() {
    let keys = DriveKeys::local();
    let hash = keys.generate_lookup_hash("résumé.pdf", "key").await.unwrap();
    // HMAC-SHA256 over the UTF-8 encoding, not the Latin-1 char codes
    assert_eq!(
        hash,
        "2806dd5cc16efa1f843d0ec7b42d154bac6a7c396f3e50c208c2e9f32e61fab1"
    );
    assert_ne!(
        hash,
        "c759ed80070d799119bdcd73f52c646650eb3174833a9b741a91f88b1fa3212d"
    );

    // Composed and decomposed forms are distinct byte strings
    let decomposed = keys
        .generate_lookup_hash("re\u{301}sume\u{301}.pdf", "key")
        .await
        .unwrap();
    assert_ne!(hash, decomposed);
}

#[tokio::test]
async fn test_hmac_failure_is_hash_error() {
    let keys = DriveKeys::new(FaultyProvider::fail_nth(ProviderCall::Hmac, 1));
    let result = keys.generate_lookup_hash("a", "b").await;
    assert!(matches!(result, Err(DriveKeysError::HashFailed(_))));
}
