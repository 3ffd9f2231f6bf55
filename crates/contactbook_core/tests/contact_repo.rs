use contactbook_core::db::open_db_in_memory;
use contactbook_core::{
    ContactError, ContactFields, ContactRecord, ContactRepository, ContactStore, Field,
    FieldErrorKind, KeyValueStore, KvContactStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StorageError, StorageResult, CONTACTS_STORAGE_KEY, DEFAULT_CONTACT_EMAIL,
    DEFAULT_CONTACT_NAME, DEFAULT_CONTACT_PHONE,
};
use std::collections::HashSet;
use uuid::Uuid;

type MemoryRepo = ContactRepository<KvContactStore<MemoryKeyValueStore>>;

fn empty_repo() -> (MemoryRepo, MemoryKeyValueStore) {
    let kv = MemoryKeyValueStore::new();
    let mut repo = ContactRepository::load(KvContactStore::new(kv.clone()));
    repo.clear();
    (repo, kv)
}

fn fields(name: &str, email: &str, phone: &str) -> ContactFields {
    ContactFields::new(name, email, phone)
}

fn stored_records(kv: &MemoryKeyValueStore) -> Vec<ContactRecord> {
    let raw = kv.get(CONTACTS_STORAGE_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn empty_storage_is_seeded_with_default_contact() {
    let kv = MemoryKeyValueStore::new();
    let repo = ContactRepository::load(KvContactStore::new(kv.clone()));

    let listed = repo.list("");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), DEFAULT_CONTACT_NAME);
    assert_eq!(listed[0].email(), DEFAULT_CONTACT_EMAIL);
    assert_eq!(listed[0].phone(), DEFAULT_CONTACT_PHONE);

    let stored = stored_records(&kv);
    assert_eq!(stored, repo.to_records());
}

#[test]
fn corrupt_storage_loads_as_seeded_book() {
    let kv = MemoryKeyValueStore::new();
    kv.set(CONTACTS_STORAGE_KEY, "{oops").unwrap();

    let repo = ContactRepository::load(KvContactStore::new(kv));
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.contacts()[0].email(), DEFAULT_CONTACT_EMAIL);
}

#[test]
fn invalid_stored_records_are_skipped_and_valid_ones_kept() {
    let good_id = Uuid::new_v4();
    let payload = serde_json::json!([
        {"id": good_id, "name": "Ana Silva", "email": "ana@example.com", "phone": "11912345678"},
        {"id": Uuid::new_v4(), "name": "A", "email": "a@example.com", "phone": "11912345678"},
        {"id": "not-a-uuid", "name": "Bruno", "email": "bruno@example.com", "phone": "11987654321"},
        {"id": Uuid::nil(), "name": "Carla", "email": "carla@example.com", "phone": "11987654321"},
        {"id": good_id, "name": "Dup Id", "email": "dup@example.com", "phone": "11987654321"},
        {"id": Uuid::new_v4(), "name": "Dup Email", "email": "ANA@example.com", "phone": "11987654321"},
        42
    ]);
    let kv = MemoryKeyValueStore::new();
    kv.set(CONTACTS_STORAGE_KEY, &payload.to_string()).unwrap();

    let repo = ContactRepository::load(KvContactStore::new(kv));
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.contacts()[0].id(), good_id);
}

#[test]
fn add_then_find_returns_normalized_fields() {
    let (mut repo, kv) = empty_repo();

    let created = repo
        .add(&fields("  Ana Silva ", " ANA@Example.com ", " (11) 91234-5678 "))
        .unwrap();

    let found = repo.find_by_id(created.id()).unwrap();
    assert_eq!(found.name(), "Ana Silva");
    assert_eq!(found.email(), "ana@example.com");
    assert_eq!(found.phone(), "(11) 91234-5678");
    assert_eq!(found, &created);

    assert_eq!(stored_records(&kv), vec![created.to_record()]);
}

#[test]
fn add_preserves_insertion_order() {
    let (mut repo, _kv) = empty_repo();
    let first = repo
        .add(&fields("Bruno", "bruno@example.com", "11987654321"))
        .unwrap();
    let second = repo
        .add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();

    let ids = repo.list("").iter().map(|c| c.id()).collect::<Vec<_>>();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[test]
fn add_rejects_email_differing_only_in_case_or_whitespace() {
    let (mut repo, _kv) = empty_repo();
    repo.add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();

    let err = repo
        .add(&fields("Ana Two", "  ANA@EXAMPLE.COM ", "11900000000"))
        .unwrap_err();
    assert_eq!(err, ContactError::DuplicateEmail("ana@example.com".to_string()));
    assert_eq!(err.field(), Some(Field::Email));
    assert_eq!(repo.len(), 1);
}

#[test]
fn add_with_short_name_fails_and_leaves_collection_unchanged() {
    let (mut repo, _kv) = empty_repo();
    repo.add(&fields("Bruno", "bruno@example.com", "11987654321"))
        .unwrap();

    let err = repo
        .add(&fields("A", "a@example.com", "11912345678"))
        .unwrap_err();
    match err {
        ContactError::Validation(field_error) => {
            assert_eq!(field_error.field, Field::Name);
            assert_eq!(field_error.kind, FieldErrorKind::TooShort);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(repo.len(), 1);
}

#[test]
fn add_reports_name_before_invalid_email() {
    let (mut repo, _kv) = empty_repo();
    let err = repo.add(&fields("", "nope", "1")).unwrap_err();
    assert_eq!(err.field(), Some(Field::Name));
}

#[test]
fn update_replaces_fields_and_persists() {
    let (mut repo, kv) = empty_repo();
    let created = repo
        .add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();

    let updated = repo
        .update(
            created.id(),
            &fields("Ana Souza", "ANA.SOUZA@example.com", "+55 11 91234-0000"),
        )
        .unwrap();
    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.name(), "Ana Souza");
    assert_eq!(updated.email(), "ana.souza@example.com");
    assert_eq!(updated.phone(), "+55 11 91234-0000");
    assert_eq!(stored_records(&kv), vec![updated.to_record()]);
}

#[test]
fn update_may_keep_own_email() {
    let (mut repo, _kv) = empty_repo();
    let created = repo
        .add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();

    let updated = repo
        .update(created.id(), &fields("Ana S.", "Ana@Example.com", "11912345678"))
        .unwrap();
    assert_eq!(updated.email(), "ana@example.com");
}

#[test]
fn failed_update_leaves_contact_unchanged() {
    let (mut repo, kv) = empty_repo();
    let created = repo
        .add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();
    let before_storage = kv.get(CONTACTS_STORAGE_KEY).unwrap();

    // name and email pass, phone fails: earlier fields must be rolled back.
    let err = repo
        .update(created.id(), &fields("Ana Souza", "souza@example.com", "123"))
        .unwrap_err();
    assert_eq!(err.field(), Some(Field::Phone));
    assert_eq!(repo.find_by_id(created.id()).unwrap(), &created);
    assert_eq!(kv.get(CONTACTS_STORAGE_KEY).unwrap(), before_storage);

    let err = repo
        .update(created.id(), &fields("", "ana@example.com", "11912345678"))
        .unwrap_err();
    assert_eq!(err.field(), Some(Field::Name));
    assert_eq!(repo.find_by_id(created.id()).unwrap(), &created);
}

#[test]
fn update_rejects_email_held_by_another_contact() {
    let (mut repo, _kv) = empty_repo();
    let ana = repo
        .add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();
    let bruno = repo
        .add(&fields("Bruno", "bruno@example.com", "11987654321"))
        .unwrap();

    let err = repo
        .update(bruno.id(), &fields("Bruno", " Ana@Example.com", "11987654321"))
        .unwrap_err();
    assert_eq!(err, ContactError::DuplicateEmail("ana@example.com".to_string()));
    assert_eq!(repo.find_by_id(bruno.id()).unwrap(), &bruno);
    assert_eq!(repo.find_by_id(ana.id()).unwrap(), &ana);
}

#[test]
fn update_unknown_id_returns_not_found() {
    let (mut repo, _kv) = empty_repo();
    let missing = Uuid::new_v4();
    let err = repo
        .update(missing, &fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap_err();
    assert_eq!(err, ContactError::NotFound(missing));
    assert_eq!(err.field(), None);
}

#[test]
fn remove_is_idempotent() {
    let (mut repo, kv) = empty_repo();
    let ana = repo
        .add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();
    let bruno = repo
        .add(&fields("Bruno", "bruno@example.com", "11987654321"))
        .unwrap();

    assert!(repo.remove(ana.id()));
    let after_first = repo.to_records();
    assert!(!repo.remove(ana.id()));
    assert_eq!(repo.to_records(), after_first);
    assert_eq!(stored_records(&kv), vec![bruno.to_record()]);
}

#[test]
fn clear_empties_collection_and_storage() {
    let kv = MemoryKeyValueStore::new();
    let mut repo = ContactRepository::load(KvContactStore::new(kv.clone()));
    assert!(kv.contains_key(CONTACTS_STORAGE_KEY));

    repo.clear();
    assert!(repo.is_empty());
    assert!(!kv.contains_key(CONTACTS_STORAGE_KEY));
}

#[test]
fn list_filters_by_name_or_email_case_insensitively() {
    let (mut repo, _kv) = empty_repo();
    let ana = repo
        .add(&fields("Ana Silva", "silva@example.com", "11912345678"))
        .unwrap();
    repo.add(&fields("Bruno", "bruno@example.com", "11987654321"))
        .unwrap();

    let lower = repo.list("ana");
    let upper = repo.list("  ANA ");
    assert_eq!(lower.len(), 1);
    assert_eq!(lower[0].id(), ana.id());
    assert_eq!(lower, upper);

    assert_eq!(repo.list("BRUNO@").len(), 1);
    assert_eq!(repo.list("example.com").len(), 2);
    assert!(repo.list("zzz").is_empty());
    assert_eq!(repo.list("   ").len(), 2);
}

#[test]
fn records_reload_into_equal_collection() {
    let kv = MemoryKeyValueStore::new();
    let mut repo = ContactRepository::load(KvContactStore::new(kv.clone()));
    repo.add(&fields("Ana Silva", "ana@example.com", "(11) 91234-5678"))
        .unwrap();
    repo.add(&fields("Bruno", "bruno@example.com", "+55 11 98765-4321"))
        .unwrap();
    let original = repo.to_records().into_iter().collect::<HashSet<_>>();

    let target = KvContactStore::new(MemoryKeyValueStore::new());
    target.save(&repo.to_records()).unwrap();
    let reloaded = ContactRepository::load(target);

    let restored = reloaded.to_records().into_iter().collect::<HashSet<_>>();
    assert_eq!(restored, original);
    assert_eq!(original.len(), 3);
}

#[test]
fn sqlite_backed_book_survives_reload() {
    let conn = open_db_in_memory().unwrap();
    let created = {
        let mut repo = ContactRepository::load(KvContactStore::new(SqliteKeyValueStore::new(&conn)));
        repo.add(&fields("Ana Silva", "ana@example.com", "11912345678"))
            .unwrap()
    };

    let repo = ContactRepository::load(KvContactStore::new(SqliteKeyValueStore::new(&conn)));
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.find_by_id(created.id()).unwrap(), &created);
    assert_eq!(repo.contacts()[0].email(), DEFAULT_CONTACT_EMAIL);
}

struct UnavailableKv;

impl KeyValueStore for UnavailableKv {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("read blocked".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn delete(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("delete blocked".to_string()))
    }
}

#[test]
fn storage_failures_do_not_block_in_memory_mutations() {
    let mut repo = ContactRepository::load(KvContactStore::new(UnavailableKv));
    assert_eq!(repo.len(), 1);

    let created = repo
        .add(&fields("Ana Silva", "ana@example.com", "11912345678"))
        .unwrap();
    let updated = repo
        .update(created.id(), &fields("Ana Souza", "ana@example.com", "11912345678"))
        .unwrap();
    assert_eq!(updated.name(), "Ana Souza");

    assert!(repo.remove(created.id()));
    repo.clear();
    assert!(repo.is_empty());
}
