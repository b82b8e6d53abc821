use alarmdeck_core::{
    AlarmCatalog, AlarmDraft, AlarmRepository, AlarmTime, AlarmValidationError,
    InMemoryAlarmRepository, Recurrence, RepoError,
};
use std::collections::HashSet;
use uuid::Uuid;

fn setup() -> InMemoryAlarmRepository {
    InMemoryAlarmRepository::new()
}

fn assert_unique_times(repo: &InMemoryAlarmRepository) {
    let alarms = repo.list_alarms();
    let times = alarms.iter().map(|alarm| alarm.time).collect::<HashSet<_>>();
    assert_eq!(times.len(), alarms.len(), "duplicate alarm times: {alarms:?}");
}

#[test]
fn create_assigns_id_enables_and_appends() {
    let mut repo = setup();

    let first = repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();
    let second = repo.create_alarm(&AlarmDraft::new("06:00", "Earlier")).unwrap();

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert!(first.enabled && second.enabled);
    let ids = repo.list_alarms().iter().map(|a| a.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![first.id, second.id], "creation order, not time order");
}

#[test]
fn create_rejects_duplicate_time() {
    let mut repo = setup();
    repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();
    let before = repo.list_alarms();

    let err = repo
        .create_alarm(&AlarmDraft::new("7:00", "Second wake up"))
        .unwrap_err();

    assert_eq!(err, RepoError::DuplicateTime(AlarmTime::new(7, 0).unwrap()));
    assert_eq!(repo.list_alarms(), before);
}

#[test]
fn create_rejects_empty_fields() {
    let mut repo = setup();

    let err = repo.create_alarm(&AlarmDraft::new("", "Gym")).unwrap_err();
    assert_eq!(err, RepoError::Validation(AlarmValidationError::EmptyTime));

    let err = repo.create_alarm(&AlarmDraft::new("09:00", "")).unwrap_err();
    assert_eq!(err, RepoError::Validation(AlarmValidationError::EmptyLabel));

    assert!(repo.list_alarms().is_empty());
}

#[test]
fn update_preserves_identity_position_and_enabled() {
    let mut repo = setup();
    let wake = repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();
    let lunch = repo.create_alarm(&AlarmDraft::new("12:30", "Lunch")).unwrap();
    repo.set_enabled(wake.id, false).unwrap();

    let updated = repo
        .update_alarm(
            wake.id,
            &AlarmDraft::new("07:30", "Wake Up Later")
                .with_recurrence(Recurrence::Daily)
                .with_sound("Sonar"),
        )
        .unwrap();

    assert_eq!(updated.id, wake.id);
    assert_eq!(updated.time.to_string(), "07:30");
    assert_eq!(updated.label, "Wake Up Later");
    assert_eq!(updated.recurrence, Recurrence::Daily);
    assert_eq!(updated.sound, "Sonar");
    assert!(!updated.enabled);

    let alarms = repo.list_alarms();
    assert_eq!(alarms[0], updated);
    assert_eq!(alarms[1].id, lunch.id);
}

#[test]
fn update_may_keep_own_time_but_not_take_another() {
    let mut repo = setup();
    let wake = repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();
    repo.create_alarm(&AlarmDraft::new("12:30", "Lunch")).unwrap();

    repo.update_alarm(wake.id, &AlarmDraft::new("07:00", "Renamed"))
        .unwrap();

    let before = repo.list_alarms();
    let err = repo
        .update_alarm(wake.id, &AlarmDraft::new("12:30", "Clash"))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateTime(_)));
    assert_eq!(repo.list_alarms(), before);
}

#[test]
fn update_applies_validation_and_not_found() {
    let mut repo = setup();
    let wake = repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();

    let err = repo
        .update_alarm(wake.id, &AlarmDraft::new("07:00", " "))
        .unwrap_err();
    assert_eq!(err, RepoError::Validation(AlarmValidationError::EmptyLabel));

    let missing = Uuid::new_v4();
    let err = repo
        .update_alarm(missing, &AlarmDraft::new("", ""))
        .unwrap_err();
    assert_eq!(err, RepoError::NotFound(missing));
}

#[test]
fn delete_removes_and_reports_missing() {
    let mut repo = setup();
    let wake = repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();

    repo.delete_alarm(wake.id).unwrap();
    assert!(repo.list_alarms().is_empty());
    assert_eq!(repo.get_alarm(wake.id), None);

    let err = repo.delete_alarm(wake.id).unwrap_err();
    assert_eq!(err, RepoError::NotFound(wake.id));
}

#[test]
fn deleted_time_becomes_available_again() {
    let mut repo = setup();
    let wake = repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();
    repo.delete_alarm(wake.id).unwrap();

    repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up again"))
        .unwrap();
}

#[test]
fn set_enabled_is_direct_and_reports_missing() {
    let mut repo = setup();
    let wake = repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();

    let disabled = repo.set_enabled(wake.id, false).unwrap();
    assert!(!disabled.enabled);
    assert!(!repo.get_alarm(wake.id).unwrap().enabled);

    let missing = Uuid::new_v4();
    assert_eq!(
        repo.set_enabled(missing, true).unwrap_err(),
        RepoError::NotFound(missing)
    );
}

#[test]
fn list_is_a_detached_snapshot() {
    let mut repo = setup();
    repo.create_alarm(&AlarmDraft::new("07:00", "Wake Up")).unwrap();

    let mut snapshot = repo.list_alarms();
    snapshot[0].label = "mutated".to_string();
    snapshot.clear();

    assert_eq!(repo.list_alarms()[0].label, "Wake Up");
}

#[test]
fn mixed_create_update_sequence_never_duplicates_times() {
    let mut repo = setup();
    let times = ["07:00", "07:30", "07:00", "08:00", "07:30", "09:15", "08:00"];
    let mut created = Vec::new();

    for (index, time) in times.iter().enumerate() {
        if let Ok(alarm) = repo.create_alarm(&AlarmDraft::new(*time, format!("alarm {index}"))) {
            created.push(alarm.id);
        }
        assert_unique_times(&repo);
    }

    for (index, id) in created.iter().enumerate() {
        for time in times {
            let _ = repo.update_alarm(*id, &AlarmDraft::new(time, format!("edit {index}")));
            assert_unique_times(&repo);
        }
    }
    assert_eq!(repo.list_alarms().len(), 4);
}

#[test]
fn custom_catalog_is_enforced() {
    let catalog = AlarmCatalog {
        sounds: vec!["Bell".to_string()],
        ..AlarmCatalog::default()
    };
    let mut repo = InMemoryAlarmRepository::with_catalog(catalog).unwrap();

    let err = repo
        .create_alarm(&AlarmDraft::new("07:00", "Wake Up").with_sound("Radar"))
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::Validation(AlarmValidationError::UnknownSound("Radar".to_string()))
    );

    let alarm = repo
        .create_alarm(&AlarmDraft::new("07:00", "Wake Up").with_sound("bell"))
        .unwrap();
    assert_eq!(alarm.sound, "Bell");
}

#[test]
fn invalid_catalog_is_rejected_at_construction() {
    let catalog = AlarmCatalog {
        sounds: Vec::new(),
        ..AlarmCatalog::default()
    };
    assert!(InMemoryAlarmRepository::with_catalog(catalog).is_err());
}
