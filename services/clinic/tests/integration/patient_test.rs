use bytes::Bytes;
use chrono::{Duration, Utc};

use carechart_clinic::domain::types::Upload;
use carechart_clinic::error::ClinicError;
use carechart_clinic::usecase::patient::{
    CreatePatientInput, CreatePatientUseCase, DeletePatientUseCase, GetPatientReportUseCase,
    GetPatientUseCase, ListPatientsUseCase, UpdatePatientInput, UpdatePatientUseCase,
};
use carechart_domain::id::{DoctorId, PatientId};

use crate::helpers::{MockAttachmentStore, MockPatientRepo, test_fields, test_patient};

fn upload(filename: &str) -> Option<Upload> {
    Some(Upload {
        filename: filename.to_owned(),
        bytes: Bytes::from_static(b"%PDF-1.7 report"),
    })
}

// ── Create / Get ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_and_read_back_patient() {
    let owner = DoctorId::new();
    let repo = MockPatientRepo::empty();
    let patients = repo.patients_handle();

    let create = CreatePatientUseCase {
        patients: repo,
        attachments: MockAttachmentStore::default(),
    };
    let id = create
        .execute(CreatePatientInput {
            owner,
            fields: test_fields("Izzie Stevens"),
            upload: None,
        })
        .await
        .unwrap();

    let get = GetPatientUseCase {
        patients: MockPatientRepo::new(patients.lock().unwrap().clone()),
    };
    let patient = get.execute(id, owner).await.unwrap();
    assert_eq!(patient.doctor_id, owner);
    assert_eq!(patient.fields, test_fields("Izzie Stevens"));
    assert_eq!(patient.report_image, None);
}

#[tokio::test]
async fn should_store_attachment_under_owner_namespace() {
    let owner = DoctorId::new();
    let repo = MockPatientRepo::empty();
    let patients = repo.patients_handle();
    let store = MockAttachmentStore::default();
    let blobs = store.blobs_handle();

    let uc = CreatePatientUseCase {
        patients: repo,
        attachments: store,
    };
    uc.execute(CreatePatientInput {
        owner,
        fields: test_fields("George O'Malley"),
        upload: upload("../Lab Results.PDF"),
    })
    .await
    .unwrap();

    let key = patients.lock().unwrap()[0].report_image.clone().unwrap();
    assert!(key.starts_with(&format!("{owner}_")), "key {key} not namespaced");
    assert!(key.ends_with("_Lab_Results.PDF"), "key {key} not sanitized");
    assert!(blobs.lock().unwrap().contains_key(&key));
}

#[tokio::test]
async fn should_reject_missing_required_fields() {
    let repo = MockPatientRepo::empty();
    let patients = repo.patients_handle();
    let store = MockAttachmentStore::default();
    let blobs = store.blobs_handle();
    let uc = CreatePatientUseCase {
        patients: repo,
        attachments: store,
    };

    let mut fields = test_fields("Lexie Grey");
    fields.gender.clear();
    let result = uc
        .execute(CreatePatientInput {
            owner: DoctorId::new(),
            fields,
            upload: upload("scan.png"),
        })
        .await;

    assert!(matches!(result, Err(ClinicError::Validation(_))));
    assert!(patients.lock().unwrap().is_empty());
    assert!(blobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_disallowed_attachment_type() {
    let store = MockAttachmentStore::default();
    let blobs = store.blobs_handle();
    let uc = CreatePatientUseCase {
        patients: MockPatientRepo::empty(),
        attachments: store,
    };

    let result = uc
        .execute(CreatePatientInput {
            owner: DoctorId::new(),
            fields: test_fields("Lexie Grey"),
            upload: upload("payload.exe"),
        })
        .await;

    assert!(matches!(result, Err(ClinicError::Validation(_))));
    assert!(blobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_remove_blob_when_insert_fails() {
    let store = MockAttachmentStore::default();
    let blobs = store.blobs_handle();
    let uc = CreatePatientUseCase {
        patients: MockPatientRepo::failing(),
        attachments: store,
    };

    let result = uc
        .execute(CreatePatientInput {
            owner: DoctorId::new(),
            fields: test_fields("Lexie Grey"),
            upload: upload("xray.jpg"),
        })
        .await;

    assert!(matches!(result, Err(ClinicError::Internal(_))));
    assert!(blobs.lock().unwrap().is_empty(), "orphaned blob left behind");
}

#[tokio::test]
async fn should_keep_same_named_uploads_apart() {
    let owner = DoctorId::new();
    let repo = MockPatientRepo::empty();
    let patients = repo.patients_handle();
    let store = MockAttachmentStore::default();

    let create = CreatePatientUseCase {
        patients: repo,
        attachments: store.clone(),
    };
    let mut ids = Vec::new();
    for body in [b"AAA".as_slice(), b"BBB".as_slice()] {
        let id = create
            .execute(CreatePatientInput {
                owner,
                fields: test_fields("Mark Sloan"),
                upload: Some(Upload {
                    filename: "scan.png".to_owned(),
                    bytes: Bytes::copy_from_slice(body),
                }),
            })
            .await
            .unwrap();
        ids.push(id);
    }

    let keys: Vec<_> = patients
        .lock()
        .unwrap()
        .iter()
        .map(|p| p.report_image.clone().unwrap())
        .collect();
    assert_ne!(keys[0], keys[1]);

    let shared_repo = || MockPatientRepo {
        patients: patients.clone(),
        fail_writes: false,
    };
    let report = GetPatientReportUseCase {
        patients: shared_repo(),
        attachments: store.clone(),
    };
    let first = report.execute(ids[0], owner).await.unwrap();
    assert_eq!(first.bytes, Bytes::from_static(b"AAA"));

    let delete = DeletePatientUseCase {
        patients: shared_repo(),
        attachments: store.clone(),
    };
    delete.execute(ids[0], owner).await.unwrap();

    let remaining = report.execute(ids[1], owner).await.unwrap();
    assert_eq!(remaining.bytes, Bytes::from_static(b"BBB"));
}

// ── Ownership isolation ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_hide_other_doctors_records() {
    let owner = DoctorId::new();
    let intruder = DoctorId::new();
    let patient = test_patient(owner, "Denny Duquette");
    let id = patient.id;
    let repo = MockPatientRepo::new(vec![patient]);
    let patients = repo.patients_handle();

    let get = GetPatientUseCase {
        patients: MockPatientRepo::new(patients.lock().unwrap().clone()),
    };
    assert!(matches!(
        get.execute(id, intruder).await,
        Err(ClinicError::NotFoundOrForbidden)
    ));

    let update = UpdatePatientUseCase {
        patients: MockPatientRepo::new(patients.lock().unwrap().clone()),
        attachments: MockAttachmentStore::default(),
    };
    let result = update
        .execute(UpdatePatientInput {
            id,
            owner: intruder,
            fields: test_fields("Hijacked"),
            upload: None,
        })
        .await;
    assert!(matches!(result, Err(ClinicError::NotFoundOrForbidden)));

    let delete = DeletePatientUseCase {
        patients: repo,
        attachments: MockAttachmentStore::default(),
    };
    delete.execute(id, intruder).await.unwrap();
    let remaining = patients.lock().unwrap();
    assert_eq!(remaining.len(), 1, "foreign delete must be a no-op");
    assert_eq!(remaining[0].fields.full_name, "Denny Duquette");
}

#[tokio::test]
async fn should_list_only_own_records_newest_first() {
    let owner = DoctorId::new();
    let mut older = test_patient(owner, "Older");
    older.created_at = Utc::now() - Duration::days(2);
    let newer = test_patient(owner, "Newer");
    let foreign = test_patient(DoctorId::new(), "Foreign");

    let uc = ListPatientsUseCase {
        patients: MockPatientRepo::new(vec![older, foreign, newer]),
    };
    let rows = uc.execute(owner).await.unwrap();

    let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, ["Newer", "Older"]);
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_attachment_when_update_has_no_upload() {
    let owner = DoctorId::new();
    let mut patient = test_patient(owner, "Callie Torres");
    patient.report_image = Some("existing_key.png".to_owned());
    let id = patient.id;
    let repo = MockPatientRepo::new(vec![patient]);
    let patients = repo.patients_handle();
    let store = MockAttachmentStore::with_blob("existing_key.png", b"png");
    let blobs = store.blobs_handle();

    let uc = UpdatePatientUseCase {
        patients: repo,
        attachments: store,
    };
    let mut fields = test_fields("Callie Torres");
    fields.diagnosis = Some("Fractured tibia".to_owned());
    fields.has_allergies = false;
    uc.execute(UpdatePatientInput {
        id,
        owner,
        fields: fields.clone(),
        upload: None,
    })
    .await
    .unwrap();

    let stored = patients.lock().unwrap()[0].clone();
    assert_eq!(stored.fields, fields);
    assert_eq!(stored.report_image.as_deref(), Some("existing_key.png"));
    assert!(blobs.lock().unwrap().contains_key("existing_key.png"));
}

#[tokio::test]
async fn should_replace_attachment_and_remove_previous_blob() {
    let owner = DoctorId::new();
    let mut patient = test_patient(owner, "Callie Torres");
    patient.report_image = Some("old_key.png".to_owned());
    let id = patient.id;
    let repo = MockPatientRepo::new(vec![patient]);
    let patients = repo.patients_handle();
    let store = MockAttachmentStore::with_blob("old_key.png", b"png");
    let blobs = store.blobs_handle();

    let uc = UpdatePatientUseCase {
        patients: repo,
        attachments: store,
    };
    uc.execute(UpdatePatientInput {
        id,
        owner,
        fields: test_fields("Callie Torres"),
        upload: upload("followup.pdf"),
    })
    .await
    .unwrap();

    let new_key = patients.lock().unwrap()[0].report_image.clone().unwrap();
    assert!(new_key.ends_with("_followup.pdf"));
    let blobs = blobs.lock().unwrap();
    assert!(blobs.contains_key(&new_key));
    assert!(!blobs.contains_key("old_key.png"));
}

#[tokio::test]
async fn should_validate_update_before_touching_storage() {
    let owner = DoctorId::new();
    let patient = test_patient(owner, "Callie Torres");
    let id = patient.id;
    let store = MockAttachmentStore::default();
    let blobs = store.blobs_handle();

    let uc = UpdatePatientUseCase {
        patients: MockPatientRepo::new(vec![patient]),
        attachments: store,
    };
    let result = uc
        .execute(UpdatePatientInput {
            id,
            owner,
            fields: test_fields(""),
            upload: upload("scan.gif"),
        })
        .await;

    assert!(matches!(result, Err(ClinicError::Validation(_))));
    assert!(blobs.lock().unwrap().is_empty());
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_idempotently_and_remove_blob() {
    let owner = DoctorId::new();
    let mut patient = test_patient(owner, "Preston Burke");
    patient.report_image = Some("burke_report.pdf".to_owned());
    let id = patient.id;
    let repo = MockPatientRepo::new(vec![patient]);
    let patients = repo.patients_handle();
    let store = MockAttachmentStore::with_blob("burke_report.pdf", b"pdf");
    let blobs = store.blobs_handle();

    let uc = DeletePatientUseCase {
        patients: repo,
        attachments: store,
    };
    uc.execute(id, owner).await.unwrap();
    uc.execute(id, owner).await.unwrap();
    uc.execute(PatientId::new(), owner).await.unwrap();

    assert!(patients.lock().unwrap().is_empty());
    assert!(blobs.lock().unwrap().is_empty());
}

// ── Report ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_report_to_owner_only() {
    let owner = DoctorId::new();
    let mut patient = test_patient(owner, "Addison Montgomery");
    patient.report_image = Some("owner_1_scan.png".to_owned());
    let id = patient.id;

    let uc = GetPatientReportUseCase {
        patients: MockPatientRepo::new(vec![patient]),
        attachments: MockAttachmentStore::with_blob("owner_1_scan.png", b"\x89PNG"),
    };

    let report = uc.execute(id, owner).await.unwrap();
    assert_eq!(report.content_type, "image/png");
    assert_eq!(report.bytes, Bytes::from_static(b"\x89PNG"));

    assert!(matches!(
        uc.execute(id, DoctorId::new()).await,
        Err(ClinicError::NotFoundOrForbidden)
    ));
}

#[tokio::test]
async fn should_return_not_found_when_record_has_no_report() {
    let owner = DoctorId::new();
    let patient = test_patient(owner, "Addison Montgomery");
    let id = patient.id;

    let uc = GetPatientReportUseCase {
        patients: MockPatientRepo::new(vec![patient]),
        attachments: MockAttachmentStore::default(),
    };

    assert!(matches!(
        uc.execute(id, owner).await,
        Err(ClinicError::NotFoundOrForbidden)
    ));
}
