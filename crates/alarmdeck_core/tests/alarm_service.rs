use alarmdeck_core::{
    AlarmCatalog, AlarmService, DeleteOutcome, InMemoryAlarmRepository, Recurrence, RepoError,
    SessionError, SessionState, ToggleOutcome, DELETE_PROMPT_MESSAGE,
};
use uuid::Uuid;

fn setup() -> AlarmService<InMemoryAlarmRepository> {
    AlarmService::new(InMemoryAlarmRepository::new()).unwrap()
}

fn seeded() -> AlarmService<InMemoryAlarmRepository> {
    let mut service = setup();
    service.seed_sample_alarms().unwrap();
    service
}

fn yes(_: &str) -> bool {
    true
}

fn no(_: &str) -> bool {
    false
}

#[test]
fn sample_alarms_match_first_launch_state() {
    let service = seeded();
    let alarms = service.alarms();

    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms[0].time.to_string(), "07:00");
    assert_eq!(alarms[0].label, "Wake Up");
    assert_eq!(alarms[0].recurrence, Recurrence::Weekdays);
    assert!(alarms[0].enabled);
    assert_eq!(alarms[1].time.to_string(), "12:30");
    assert_eq!(alarms[1].label, "Lunch Meeting");
    assert_eq!(alarms[1].sound, "Chimes");
    assert!(!alarms[1].enabled);
}

#[test]
fn toggle_wake_up_respects_confirmation() {
    let mut service = seeded();
    let wake_id = service.alarms()[0].id;

    let outcome = service.request_toggle(wake_id, &mut no).unwrap();
    assert_eq!(outcome, ToggleOutcome::Declined);
    assert!(service.alarms()[0].enabled);

    let outcome = service.request_toggle(wake_id, &mut yes).unwrap();
    assert!(matches!(outcome, ToggleOutcome::Applied(_)));
    assert!(!service.alarms()[0].enabled);
}

#[test]
fn delete_asks_for_confirmation() {
    let mut service = seeded();
    let lunch_id = service.alarms()[1].id;
    let mut asked = Vec::new();

    let outcome = service
        .request_delete(lunch_id, &mut |message: &str| {
            asked.push(message.to_string());
            false
        })
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(asked, vec![DELETE_PROMPT_MESSAGE.to_string()]);
    assert_eq!(service.alarms().len(), 2);

    let outcome = service.request_delete(lunch_id, &mut yes).unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted { closed_edit: false });
    assert_eq!(service.alarms().len(), 1);
}

#[test]
fn delete_of_missing_alarm_fails_without_prompting() {
    let mut service = seeded();
    let missing = Uuid::new_v4();

    let err = service
        .request_delete(missing, &mut |_: &str| -> bool { panic!("no prompt expected") })
        .unwrap_err();
    assert_eq!(err, RepoError::NotFound(missing));
}

#[test]
fn deleting_alarm_under_edit_forces_idle() {
    let mut service = seeded();
    let wake_id = service.alarms()[0].id;

    service.request_start_edit(wake_id).unwrap();
    let outcome = service.request_delete(wake_id, &mut yes).unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted { closed_edit: true });
    assert_eq!(service.session(), &SessionState::Idle);
}

#[test]
fn declined_delete_keeps_edit_open() {
    let mut service = seeded();
    let wake_id = service.alarms()[0].id;

    service.request_start_edit(wake_id).unwrap();
    service.request_delete(wake_id, &mut no).unwrap();

    assert!(matches!(
        service.session(),
        SessionState::Editing { alarm_id, .. } if *alarm_id == wake_id
    ));
}

#[test]
fn add_flow_through_intents() {
    let mut service = seeded();

    service.request_start_add();
    service.request_field_change("time", "21:00").unwrap();
    service.request_field_change("label", "Wind down").unwrap();
    let alarm = service.request_commit().unwrap();

    assert_eq!(service.session(), &SessionState::Idle);
    assert_eq!(service.alarms().last(), Some(&alarm));
}

#[test]
fn duplicate_commit_surfaces_error_and_keeps_form() {
    let mut service = seeded();
    let before = service.alarms();

    service.request_start_add();
    service.request_field_change("time", "07:00").unwrap();
    let err = service.request_commit().unwrap_err();

    assert!(matches!(err, SessionError::Repo(RepoError::DuplicateTime(_))));
    assert!(err.to_string().contains("07:00"));
    assert!(matches!(service.session(), SessionState::Adding { .. }));
    assert_eq!(service.alarms(), before);
}

#[test]
fn edit_flow_preserves_identity() {
    let mut service = seeded();
    let wake = service.alarms()[0].clone();

    service.request_start_edit(wake.id).unwrap();
    service.request_field_change("time", "07:30").unwrap();
    service.request_field_change("label", "Wake Up Later").unwrap();
    let updated = service.request_commit().unwrap();

    assert_eq!(updated.id, wake.id);
    assert_eq!(service.alarms()[0], updated);
    assert_eq!(updated.time.to_string(), "07:30");
}

#[test]
fn cancel_discards_edit_draft() {
    let mut service = seeded();
    let wake = service.alarms()[0].clone();

    service.request_start_edit(wake.id).unwrap();
    service.request_field_change("label", "Not saved").unwrap();
    service.request_cancel();

    assert_eq!(service.session(), &SessionState::Idle);
    assert_eq!(service.alarms()[0], wake);
}

#[test]
fn start_edit_of_missing_alarm_is_not_found() {
    let mut service = setup();
    let missing = Uuid::new_v4();

    assert_eq!(
        service.request_start_edit(missing).unwrap_err(),
        RepoError::NotFound(missing)
    );
    assert_eq!(service.session(), &SessionState::Idle);
}

#[test]
fn field_change_without_form_is_rejected() {
    let mut service = setup();

    assert_eq!(
        service.request_field_change("label", "x").unwrap_err(),
        SessionError::NoActiveDraft
    );
}

#[test]
fn custom_catalog_drives_add_defaults_and_guard() {
    let catalog = AlarmCatalog::from_json_str(
        r#"{"recurrences": ["Daily"], "sounds": ["Bell"], "critical_keywords": ["pill"]}"#,
    )
    .unwrap();
    let mut service =
        AlarmService::new(InMemoryAlarmRepository::with_catalog(catalog).unwrap()).unwrap();

    service.request_start_add();
    service.request_field_change("label", "Morning pill").unwrap();
    let alarm = service.request_commit().unwrap();
    assert_eq!(alarm.recurrence, Recurrence::Daily);
    assert_eq!(alarm.sound, "Bell");

    assert!(service.guard().is_critical(alarm.label.as_str()));
    let outcome = service.request_toggle(alarm.id, &mut no).unwrap();
    assert_eq!(outcome, ToggleOutcome::Declined);
}
