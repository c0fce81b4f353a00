mod common;

use application::Command;
use chrono::{TimeZone, Utc};
use common::{SteppingClock, dashboard, dashboard_with_clock};
use domain::form::ErrorKind;
use domain::{DomainError, EntityKind, ListQuery, Submission, Wizard};

fn fill_farmer(wizard: &mut Wizard, mobile: &str, aadhaar: &str) {
    wizard.set("name", "Venkata Lakshmi");
    wizard.set("father_name", "Narasimha Rao");
    wizard.set("mobile", mobile);
    wizard.set("aadhaar", aadhaar);
    wizard.set("district_id", "D1");
    wizard.set("mandal_id", "M1");
    wizard.set("village_id", "V1");
    wizard.set("land_acres", "3.5");
    wizard.set("assigned_agent_id", "EMP003");
    wizard.set("bank_name", "State Bank of India");
    wizard.set("account_number", "30055566677");
    wizard.set("ifsc", "SBIN0001234");
}

#[tokio::test]
async fn test_first_farmer_at_location_gets_sequence_one() {
    let registered_at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
    let dashboard = dashboard_with_clock(SteppingClock::frozen(registered_at));
    let conflicts = dashboard.conflicts(EntityKind::Farmer).await.unwrap();
    let location = dashboard.location_rules().await.unwrap();

    let mut wizard = dashboard.farmer_wizard();
    fill_farmer(&mut wizard, "9700011122", "111122223333");
    let draft = wizard.finish(&conflicts, &location).unwrap();

    let row = dashboard.handle(Command::RegisterFarmer(draft)).await.unwrap();
    assert_eq!(row.id, "07-01-001-24-0001");
    assert_eq!(row.value("district_id"), Some("Warangal"));
    assert_eq!(row.value("status"), Some("Pending"));
}

#[tokio::test]
async fn test_sequence_increments_per_location() {
    let dashboard = dashboard();

    for (mobile, aadhaar) in [("9700011122", "111122223333"), ("9700011133", "111122224444")] {
        let conflicts = dashboard.conflicts(EntityKind::Farmer).await.unwrap();
        let location = dashboard.location_rules().await.unwrap();
    let location = dashboard.location_rules().await.unwrap();
        let mut wizard = dashboard.farmer_wizard();
        fill_farmer(&mut wizard, mobile, aadhaar);
        let draft = wizard.finish(&conflicts, &location).unwrap();
        dashboard.handle(Command::RegisterFarmer(draft)).await.unwrap();
    }

    let rows = dashboard
        .list(EntityKind::Farmer, &ListQuery::all().filter("village_id", "V1"))
        .await
        .unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["07-01-001-24-0002", "07-01-001-24-0001"]);
}

#[tokio::test]
async fn test_wizard_blocks_registered_aadhaar_on_first_step() {
    let dashboard = dashboard();
    let conflicts = dashboard.conflicts(EntityKind::Farmer).await.unwrap();
    let location = dashboard.location_rules().await.unwrap();

    let mut wizard = dashboard.farmer_wizard();
    fill_farmer(&mut wizard, "9700011122", "123412341234");
    let report = wizard.advance(&conflicts, &location).unwrap_err();

    assert_eq!(report.get("aadhaar").unwrap().kind, ErrorKind::Conflict);
    assert_eq!(wizard.current_step(), 0);
}

#[tokio::test]
async fn test_wizard_blocks_village_outside_mandal_on_location_step() {
    let dashboard = dashboard();
    let conflicts = dashboard.conflicts(EntityKind::Farmer).await.unwrap();
    let location = dashboard.location_rules().await.unwrap();

    let mut wizard = dashboard.farmer_wizard();
    fill_farmer(&mut wizard, "9700011122", "111122223333");
    wizard.set("village_id", "V3");

    assert_eq!(wizard.advance(&conflicts, &location), Ok(1));
    let report = wizard.advance(&conflicts, &location).unwrap_err();
    assert_eq!(report.get("village_id").unwrap().kind, ErrorKind::Format);
    assert_eq!(wizard.current_step(), 1);

    let report = wizard.review(&conflicts, &location).unwrap_err();
    assert_eq!(report.len(), 1);
    assert!(report.contains("village_id"));

    wizard.focus("ifsc");
    assert!(wizard.finish(&conflicts, &location).is_err());
    assert_eq!(wizard.current_step(), 1);
}

#[tokio::test]
async fn test_mandal_outside_district_is_rejected_without_wizard() {
    let dashboard = dashboard();
    let mut wizard = dashboard.farmer_wizard();
    fill_farmer(&mut wizard, "9700011122", "111122223333");
    wizard.set("mandal_id", "M2");
    wizard.set("village_id", "V2");

    let err = dashboard
        .handle(Command::Submit {
            kind: EntityKind::Farmer,
            submission: Submission::create(wizard.values().clone()),
        })
        .await
        .unwrap_err();
    let DomainError::Validation(report) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(report.get("mandal_id").unwrap().kind, ErrorKind::Format);
    assert_eq!(report.first_step(), Some(1));
}

#[tokio::test]
async fn test_conflict_created_while_wizard_was_open() {
    let dashboard = dashboard();
    let conflicts = dashboard.conflicts(EntityKind::Farmer).await.unwrap();
    let location = dashboard.location_rules().await.unwrap();

    let mut first = dashboard.farmer_wizard();
    fill_farmer(&mut first, "9700011122", "111122223333");
    let mut second = dashboard.farmer_wizard();
    fill_farmer(&mut second, "9700011122", "111122224444");

    let first = first.finish(&conflicts, &location).unwrap();
    let second = second.finish(&conflicts, &location).unwrap();
    dashboard.handle(Command::RegisterFarmer(first)).await.unwrap();

    let err = dashboard.handle(Command::RegisterFarmer(second)).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(ref r) if r.contains("mobile")));
}
