use tempfile::TempDir;
use topstats::Error;
use topstats::management::VerifierStore;

#[tokio::test]
async fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let store = VerifierStore::new(dir.path().join("nested/state/verifier"));

    store.save("abcDEF123").await.unwrap();
    assert!(store.path().is_file());
    assert_eq!(store.load().await.unwrap(), "abcDEF123");

    // Loading does not consume the value
    assert_eq!(store.load().await.unwrap(), "abcDEF123");
}

#[tokio::test]
async fn test_save_overwrites_previous_verifier() {
    let dir = TempDir::new().unwrap();
    let store = VerifierStore::new(dir.path().join("verifier"));

    store.save("first").await.unwrap();
    store.save("second").await.unwrap();
    assert_eq!(store.load().await.unwrap(), "second");
}

#[tokio::test]
async fn test_load_missing_verifier() {
    let dir = TempDir::new().unwrap();
    let store = VerifierStore::new(dir.path().join("verifier"));

    assert!(matches!(store.load().await, Err(Error::MissingVerifier)));
}

#[tokio::test]
async fn test_load_empty_verifier() {
    let dir = TempDir::new().unwrap();
    let store = VerifierStore::new(dir.path().join("verifier"));
    store.save("  ").await.unwrap();

    assert!(matches!(store.load().await, Err(Error::MissingVerifier)));
}

#[tokio::test]
async fn test_clear() {
    let dir = TempDir::new().unwrap();
    let store = VerifierStore::new(dir.path().join("verifier"));

    store.save("abc").await.unwrap();
    store.clear().await.unwrap();
    assert!(!store.path().exists());
    assert!(matches!(store.load().await, Err(Error::MissingVerifier)));

    // Clearing twice is fine
    store.clear().await.unwrap();
}
