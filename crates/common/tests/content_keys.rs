//! Integration tests for content keys and block hashes

mod common;

use std::collections::HashSet;

use ::common::drive::{DriveKeys, DriveKeysError};
use ::common::testkit::{FaultyProvider, ProviderCall};

#[tokio::test]
async fn test_content_keys_under_bootstrapped_folder() {
    let keys = DriveKeys::local();
    let (address, _) = common::address_key(&keys).await;
    let result = keys.generate_drive_bootstrap(&address).await.unwrap();
    let share = &result.share_private_key;

    // A file two levels below the share
    let folder = keys
        .generate_node_keys(&share.public_key(), share)
        .await
        .unwrap();
    let file = keys
        .generate_node_keys(&folder.private_key.public_key(), &address)
        .await
        .unwrap();

    let content = keys.generate_content_keys(&file.private_key).await.unwrap();
    let session = keys
        .decrypt_content_key_packet(&content.content_key_packet, &file.private_key)
        .await
        .unwrap();
    assert_eq!(session, content.session_key);

    let block = session.encrypt(b"block body").unwrap();
    assert_eq!(session.decrypt(&block).unwrap(), b"block body".to_vec());

    let hash = keys.generate_content_hash(&block).await.unwrap();
    assert_eq!(hash.hash_type, "sha256");
    assert_eq!(hash.block_hash.len(), 64);
}

#[tokio::test]
async fn test_content_keys_never_repeat() {
    let keys = DriveKeys::local();
    let (node, _) = common::address_key(&keys).await;

    let mut sessions = HashSet::new();
    let mut packets = HashSet::new();
    for _ in 0..32 {
        let content = keys.generate_content_keys(&node).await.unwrap();
        sessions.insert(content.session_key.to_hex());
        packets.insert(content.content_key_packet);
    }
    assert_eq!(sessions.len(), 32);
    assert_eq!(packets.len(), 32);
}

#[tokio::test]
async fn test_wrap_failure_is_content_key_error() {
    let keys = DriveKeys::new(FaultyProvider::fail_nth(ProviderCall::WrapSessionKey, 1));
    let (node, _) = common::address_key(&keys).await;

    let result = keys.generate_content_keys(&node).await;
    assert!(matches!(
        result,
        Err(DriveKeysError::ContentKeyDerivationFailed(_))
    ));
}
