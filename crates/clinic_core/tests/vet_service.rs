use clinic_core::db::open_db_in_memory;
use clinic_core::{
    Certification, Contract, ServiceError, SqliteVetRepository, Vet, VetService,
};

#[test]
fn register_and_fetch_through_the_service() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVetRepository::try_new(&conn).unwrap();
    let service = VetService::new(repo);

    let mut vet = Vet::new("Ana", "Serrano", "2023-06-01");
    vet.set_contract(Some(Contract::new("surgeon", 42_000.0, 37.5)));
    vet.add_certification(Certification::new("surgery", "RCVS"));

    let vet_id = service.register_vet(&mut vet).unwrap();
    assert!(vet_id > 0);

    let fetched = service.require_vet(vet_id).unwrap();
    assert_eq!(fetched.name(), "Ana");
    assert_eq!(fetched.certification_count(), 1);

    let all = service.list_vets().unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn register_rejects_blank_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVetRepository::try_new(&conn).unwrap();
    let service = VetService::new(repo);

    let mut vet = Vet::new("   ", "Serrano", "2023-06-01");
    let err = service.register_vet(&mut vet).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidName));
    assert!(service.list_vets().unwrap().is_empty());
}

#[test]
fn register_rejects_contracts_with_clamped_weekly_hours() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVetRepository::try_new(&conn).unwrap();
    let service = VetService::new(repo);

    let mut vet = Vet::new("Ana", "Serrano", "2023-06-01");
    // 72 hours is outside (0, 60]; the model clamps it to the 0 sentinel.
    vet.set_contract(Some(Contract::new("surgeon", 42_000.0, 72.0)));

    let err = service.register_vet(&mut vet).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidWeeklyHours));
}

#[test]
fn require_vet_distinguishes_absence_from_failure() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVetRepository::try_new(&conn).unwrap();
    let service = VetService::new(repo);

    assert!(service.get_vet(999).unwrap().is_none());
    let err = service.require_vet(999).unwrap_err();
    assert!(matches!(err, ServiceError::VetNotFound(999)));
}

#[test]
fn update_and_remove_ignore_never_persisted_vets() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVetRepository::try_new(&conn).unwrap();
    let service = VetService::new(repo);

    let transient = Vet::new("Ana", "Serrano", "2023-06-01");
    assert!(!service.update_vet(&transient).unwrap());
    assert!(!service.remove_vet(transient.id()).unwrap());
}

#[test]
fn update_and_remove_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVetRepository::try_new(&conn).unwrap();
    let service = VetService::new(repo);

    let mut vet = Vet::new("Ana", "Serrano", "2023-06-01");
    let vet_id = service.register_vet(&mut vet).unwrap();

    vet.set_surname("Serrano-Gil");
    assert!(service.update_vet(&vet).unwrap());
    assert_eq!(service.require_vet(vet_id).unwrap().surname(), "Serrano-Gil");

    assert!(service.remove_vet(vet_id).unwrap());
    assert!(service.get_vet(vet_id).unwrap().is_none());
    assert!(!service.remove_vet(vet_id).unwrap());
}

#[test]
fn load_certifications_materializes_entries_via_the_service() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVetRepository::try_new(&conn).unwrap();
    let service = VetService::new(repo);

    let mut vet = Vet::new("Ana", "Serrano", "2023-06-01");
    vet.add_certification(Certification::new("surgery", "RCVS"));
    let vet_id = service.register_vet(&mut vet).unwrap();

    let mut fetched = service.require_vet(vet_id).unwrap();
    assert_eq!(fetched.loaded_certifications().count(), 0);

    service.load_certifications(&mut fetched).unwrap();
    assert_eq!(fetched.loaded_certifications().count(), 1);
}
