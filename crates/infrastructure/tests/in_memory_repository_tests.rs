use chrono::{TimeZone, Utc};
use domain::record::{District, EntityRepository, ProcurementBatch};
use domain::{DomainError, EntityKind, FormValues, Record};
use infrastructure::{InMemoryRepository, SeedData};

fn district(id: &str, name: &str) -> District {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let values = FormValues::new()
        .with("name", name)
        .with("code", "7")
        .with("state", "Telangana");
    District::create(id.to_string(), &values, now).unwrap()
}

#[tokio::test]
async fn test_new_records_go_to_the_front() {
    let repo = InMemoryRepository::with_records(vec![district("D1", "Warangal")]).unwrap();
    repo.insert(district("D2", "Khammam")).await.unwrap();

    let ids: Vec<String> = repo
        .find_all()
        .await
        .unwrap()
        .iter()
        .map(|d| d.id().to_string())
        .collect();
    assert_eq!(ids, vec!["D2", "D1"]);
}

#[tokio::test]
async fn test_batches_append_to_the_back() {
    let seed = SeedData::bundled().unwrap();
    let first = seed.batches[0].id.clone();
    let repo = InMemoryRepository::with_records(seed.batches.clone()).unwrap();

    let mut batch = seed.batches[0].clone();
    batch.id = "BATCH1799999999999".to_string();
    repo.insert(batch).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.first().map(|b: &ProcurementBatch| b.id.as_str()), Some(first.as_str()));
    assert_eq!(all.last().unwrap().id, "BATCH1799999999999");
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let repo = InMemoryRepository::with_records(vec![district("D1", "Warangal")]).unwrap();
    let err = repo.insert(district("D1", "Other")).await.unwrap_err();

    assert_eq!(
        err,
        DomainError::DuplicateId {
            kind: EntityKind::District,
            id: "D1".to_string()
        }
    );
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let repo = InMemoryRepository::with_records(vec![
        district("D1", "Warangal"),
        district("D2", "Khammam"),
    ])
    .unwrap();

    let mut renamed = repo.find_by_id("D2").await.unwrap().unwrap();
    renamed.name = "Khammam Rural".to_string();
    repo.update(renamed).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all[1].name, "Khammam Rural");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_update_of_missing_record_fails() {
    let repo: InMemoryRepository<District> = InMemoryRepository::new();
    let err = repo.update(district("D404", "Nowhere")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(repo.find_by_id("D404").await.unwrap(), None);
}

#[test]
fn test_seeding_rejects_repeated_id() {
    let result = InMemoryRepository::with_records(vec![
        district("D1", "Warangal"),
        district("D2", "Khammam"),
        district("D1", "Warangal Copy"),
    ]);

    match result {
        Err(err) => assert_eq!(
            err,
            DomainError::DuplicateId {
                kind: EntityKind::District,
                id: "D1".to_string()
            }
        ),
        Ok(_) => panic!("repeated id was seeded"),
    }
}
